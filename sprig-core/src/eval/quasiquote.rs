// sprig-core - Syntax quote
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `quasiquote` templates.
//!
//! Lists and vectors are rebuilt with every `(unquote x)` replaced by the
//! value of `x`. Maps are not walked. There is no unquote-splicing, and
//! symbols are not namespace-qualified.

use sprig_parser::{SprigVal, Vector};

use super::eval;
use crate::env::Env;
use crate::error::{Error, Result};

/// (quasiquote form)
pub fn eval_quasiquote(args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    match args {
        [form] => expand(form, env),
        _ => Err(Error::syntax("quasiquote", "requires exactly 1 argument")),
    }
}

fn expand(form: &SprigVal, env: &Env) -> Result<SprigVal> {
    match form {
        SprigVal::List(items, _) if form.is_form("unquote") => match items.get(1) {
            Some(inner) if items.len() == 2 => eval(inner, env),
            _ => Err(Error::syntax("unquote", "requires exactly 1 argument")),
        },
        SprigVal::List(items, span) => Ok(SprigVal::List(expand_all(items, env)?, span.clone())),
        SprigVal::Vector(items, span) => {
            Ok(SprigVal::Vector(expand_all(items, env)?, span.clone()))
        }
        _ => Ok(form.to_data()),
    }
}

fn expand_all(items: &Vector<SprigVal>, env: &Env) -> Result<Vector<SprigVal>> {
    items.iter().map(|item| expand(item, env)).collect()
}
