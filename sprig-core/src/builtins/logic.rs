// sprig-core - Logic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use sprig_parser::SprigVal;

use crate::error::Result;

use super::expect_arity;

/// (not x) - true if x is nil or false
pub(crate) fn builtin_not(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("not", args, 1)?;
    Ok(SprigVal::Bool(!args[0].is_truthy()))
}
