// sprig-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, not=, <, >, <=, >=

use sprig_parser::SprigVal;

use crate::error::{Error, Result};

use super::expect_number;

// ============================================================================
// Equality
// ============================================================================

fn all_equal(name: &str, args: &[SprigVal]) -> Result<bool> {
    if args.is_empty() {
        return Err(Error::arity(name, "at least 1", 0));
    }
    Ok(args.windows(2).all(|pair| pair[0] == pair[1]))
}

pub(crate) fn builtin_eq(args: &[SprigVal]) -> Result<SprigVal> {
    all_equal("=", args).map(SprigVal::Bool)
}

pub(crate) fn builtin_not_eq(args: &[SprigVal]) -> Result<SprigVal> {
    all_equal("not=", args).map(|eq| SprigVal::Bool(!eq))
}

// ============================================================================
// Ordering
// ============================================================================

/// Check `ord` over each adjacent pair. Every argument must be a number.
fn compare_chain(name: &str, args: &[SprigVal], ord: fn(f64, f64) -> bool) -> Result<SprigVal> {
    if args.is_empty() {
        return Err(Error::arity(name, "at least 1", 0));
    }
    let nums = args
        .iter()
        .map(|arg| expect_number(name, arg))
        .collect::<Result<Vec<_>>>()?;
    Ok(SprigVal::Bool(nums.windows(2).all(|pair| ord(pair[0], pair[1]))))
}

pub(crate) fn builtin_lt(args: &[SprigVal]) -> Result<SprigVal> {
    compare_chain("<", args, |a, b| a < b)
}

pub(crate) fn builtin_gt(args: &[SprigVal]) -> Result<SprigVal> {
    compare_chain(">", args, |a, b| a > b)
}

pub(crate) fn builtin_le(args: &[SprigVal]) -> Result<SprigVal> {
    compare_chain("<=", args, |a, b| a <= b)
}

pub(crate) fn builtin_ge(args: &[SprigVal]) -> Result<SprigVal> {
    compare_chain(">=", args, |a, b| a >= b)
}
