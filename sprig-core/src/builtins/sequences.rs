// sprig-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations: list, vector, first, rest, count, empty?, cons,
//! nth, conj
//!
//! Lists and vectors share one representation, so most of these accept
//! either. `nil` behaves as the empty sequence.

use sprig_parser::{SprigVal, Vector};

use crate::error::{Error, Result};

use super::{expect_arity, expect_number, seq_items};

pub(crate) fn builtin_list(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::list(args.iter().cloned()))
}

pub(crate) fn builtin_vector(args: &[SprigVal]) -> Result<SprigVal> {
    Ok(SprigVal::vector(args.iter().cloned()))
}

/// (first coll) - nil for an empty sequence or a non-sequence
pub(crate) fn builtin_first(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("first", args, 1)?;
    Ok(args[0]
        .as_seq()
        .and_then(|items| items.front().cloned())
        .unwrap_or(SprigVal::Nil))
}

/// (rest coll) - everything after the first item, always a vector
pub(crate) fn builtin_rest(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("rest", args, 1)?;
    let rest = match args[0].as_seq() {
        Some(items) if !items.is_empty() => items.clone().slice(1..),
        _ => Vector::new(),
    };
    Ok(SprigVal::Vector(rest, None))
}

/// (count coll) - items in a sequence or map, characters in a string
pub(crate) fn builtin_count(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("count", args, 1)?;
    let n = match &args[0] {
        SprigVal::List(items, _) | SprigVal::Vector(items, _) => items.len(),
        SprigVal::Map(map, _) => map.len(),
        SprigVal::String(s) => s.chars().count(),
        SprigVal::Nil => 0,
        other => return Err(Error::type_error("count", "collection", other)),
    };
    Ok(SprigVal::Number(n as f64))
}

pub(crate) fn builtin_empty_p(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("empty?", args, 1)?;
    let empty = match &args[0] {
        SprigVal::List(items, _) | SprigVal::Vector(items, _) => items.is_empty(),
        SprigVal::Map(map, _) => map.is_empty(),
        SprigVal::String(s) => s.is_empty(),
        SprigVal::Nil => true,
        _ => false,
    };
    Ok(SprigVal::Bool(empty))
}

/// (cons x coll) - a list with x in front of the items of coll
pub(crate) fn builtin_cons(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("cons", args, 2)?;
    let mut items = seq_items("cons", &args[1])?;
    items.push_front(args[0].clone());
    Ok(SprigVal::List(items, None))
}

/// (nth coll index not-found?)
pub(crate) fn builtin_nth(args: &[SprigVal]) -> Result<SprigVal> {
    if args.len() != 2 && args.len() != 3 {
        return Err(Error::arity("nth", "2 or 3", args.len()));
    }
    let items = seq_items("nth", &args[0])?;
    let index = expect_number("nth", &args[1])?;
    let found = if index >= 0.0 && index.fract() == 0.0 {
        items.get(index as usize).cloned()
    } else {
        None
    };
    match (found, args.get(2)) {
        (Some(item), _) => Ok(item),
        (None, Some(not_found)) => Ok(not_found.clone()),
        (None, None) => Err(Error::invalid_param(format!(
            "Index {} out of bounds for length {}",
            sprig_parser::printer::format_number(index),
            items.len()
        ))),
    }
}

/// (conj coll & xs) - add to the end of a vector, the front of a list,
/// or merge `[k v]` entries into a map
pub(crate) fn builtin_conj(args: &[SprigVal]) -> Result<SprigVal> {
    let Some((coll, xs)) = args.split_first() else {
        return Err(Error::arity("conj", "at least 1", 0));
    };
    match coll {
        SprigVal::Vector(items, _) => {
            let mut items = items.clone();
            items.extend(xs.iter().cloned());
            Ok(SprigVal::Vector(items, None))
        }
        SprigVal::List(items, _) => {
            let mut items = items.clone();
            for x in xs {
                items.push_front(x.clone());
            }
            Ok(SprigVal::List(items, None))
        }
        SprigVal::Nil => Ok(SprigVal::List(xs.iter().rev().cloned().collect(), None)),
        SprigVal::Map(map, _) => {
            let mut map = map.clone();
            for x in xs {
                match x.as_seq().map(|entry| entry.len()) {
                    Some(2) => {
                        let entry = seq_items("conj", x)?;
                        map = map.assoc(entry[0].clone(), entry[1].clone());
                    }
                    _ => {
                        return Err(Error::invalid_param(
                            "conj on a map requires [key value] entries",
                        ));
                    }
                }
            }
            Ok(SprigVal::Map(map, None))
        }
        other => Err(Error::type_error("conj", "collection", other)),
    }
}
