// sprig-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /, %
//!
//! All numbers are `f64`. Division and remainder by zero are errors rather
//! than infinities.

use sprig_parser::SprigVal;

use crate::error::{Error, Result};

use super::expect_number;

fn numbers(name: &str, args: &[SprigVal]) -> Result<Vec<f64>> {
    args.iter().map(|arg| expect_number(name, arg)).collect()
}

/// (+ & nums)
pub(crate) fn builtin_add(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::Number(numbers("+", args)?.into_iter().sum()))
}

/// (- x & nums) - with one argument, negate it
pub(crate) fn builtin_sub(args: &[SprigVal]) -> Result<SprigVal> {
    let nums = numbers("-", args)?;
    match nums.split_first() {
        None => Err(Error::arity("-", "at least 1", 0)),
        Some((x, [])) => Ok(SprigVal::Number(-x)),
        Some((x, rest)) => Ok(SprigVal::Number(rest.iter().fold(*x, |acc, n| acc - n))),
    }
}

/// (* & nums)
pub(crate) fn builtin_mul(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::Number(numbers("*", args)?.into_iter().product()))
}

/// (/ x & nums) - with one argument, the reciprocal
pub(crate) fn builtin_div(args: &[SprigVal]) -> Result<SprigVal> {
    let nums = numbers("/", args)?;
    let (x, rest) = match nums.split_first() {
        None => return Err(Error::arity("/", "at least 1", 0)),
        Some((x, [])) => (1.0, std::slice::from_ref(x)),
        Some((x, rest)) => (*x, rest),
    };
    let mut acc = x;
    for divisor in rest {
        if *divisor == 0.0 {
            return Err(Error::invalid_param("Division by zero"));
        }
        acc /= divisor;
    }
    Ok(SprigVal::Number(acc))
}

/// (% x y) - remainder, taking the sign of x
pub(crate) fn builtin_mod(args: &[SprigVal]) -> Result<SprigVal> {
    let [x, y] = args else {
        return Err(Error::arity("%", 2, args.len()));
    };
    let (x, y) = (expect_number("%", x)?, expect_number("%", y)?);
    if y == 0.0 {
        return Err(Error::invalid_param("Division by zero"));
    }
    Ok(SprigVal::Number(x % y))
}
