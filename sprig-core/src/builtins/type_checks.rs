// sprig-core - Type inspection built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use sprig_parser::SprigVal;

use crate::error::Result;

use super::expect_arity;

/// (type x) - the type of x as a keyword, e.g. `:number`
pub(crate) fn builtin_type(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("type", args, 1)?;
    Ok(SprigVal::keyword(args[0].type_name()))
}
