// sprig-core - Higher-order built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! map, apply, identity

use sprig_parser::SprigVal;

use crate::error::{Error, Result};
use crate::eval::apply;

use super::{expect_arity, seq_items};

/// (map f coll & colls) - a vector of (f item...), stopping at the
/// shortest collection
pub(crate) fn builtin_map(args: &[SprigVal]) -> Result<SprigVal> {
    if args.len() < 2 {
        return Err(Error::arity("map", "at least 2", args.len()));
    }
    let func = &args[0];

    if args.len() == 2 {
        let mut result = Vec::new();
        for item in seq_items("map", &args[1])? {
            result.push(apply(func, &[item])?);
        }
        return Ok(SprigVal::vector(result));
    }

    let colls = args[1..]
        .iter()
        .map(|coll| seq_items("map", coll))
        .collect::<Result<Vec<_>>>()?;
    let min_len = colls.iter().map(|c| c.len()).min().unwrap_or(0);

    let mut result = Vec::with_capacity(min_len);
    for i in 0..min_len {
        let call_args: Vec<SprigVal> = colls.iter().map(|c| c[i].clone()).collect();
        result.push(apply(func, &call_args)?);
    }
    Ok(SprigVal::vector(result))
}

/// (apply f x y & [more]) - call f with the leading args then the items
/// of the final sequence
pub(crate) fn builtin_apply(args: &[SprigVal]) -> Result<SprigVal> {
    let [func, middle @ .., last] = args else {
        return Err(Error::arity("apply", "at least 2", args.len()));
    };
    let mut call_args = middle.to_vec();
    call_args.extend(seq_items("apply", last)?);
    apply(func, &call_args)
}

pub(crate) fn builtin_identity(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("identity", args, 1)?;
    Ok(args[0].clone())
}
