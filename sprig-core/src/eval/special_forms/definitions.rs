// sprig-core - Definition special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! def, defn, defmacro and fn.

use std::rc::Rc;

use sprig_parser::{SprigFn, SprigVal, Symbol};
use tracing::debug;

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::destructuring::validate_pattern;
use crate::eval::eval;

fn expect_name(form: &str, value: Option<&SprigVal>) -> Result<Symbol> {
    match value {
        Some(SprigVal::Symbol(sym, _)) => Ok(sym.clone()),
        _ => Err(Error::syntax(form, "first argument must be a symbol")),
    }
}

/// Body forms become one expression: nil, the single form, or a `do`.
fn body_expr(body: &[SprigVal]) -> SprigVal {
    match body {
        [] => SprigVal::Nil,
        [form] => form.clone(),
        forms => {
            let mut items = vec![SprigVal::symbol("do")];
            items.extend_from_slice(forms);
            SprigVal::list(items)
        }
    }
}

/// Build a closure or macro from `[params] body*`.
fn make_fn(form: &str, params: Option<&SprigVal>, body: &[SprigVal], env: &Env) -> Result<SprigFn> {
    let params = match params {
        Some(p @ SprigVal::Vector(..)) => p,
        _ => return Err(Error::syntax(form, "parameters must be a vector")),
    };
    // Map patterns are stored as data so calls bind without converting.
    let params = params.to_data();
    validate_pattern(&params)?;
    Ok(SprigFn::new(params, body_expr(body), Rc::new(env.clone())))
}

/// (def name expr)
pub fn eval_def(args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    if args.len() != 2 {
        return Err(Error::syntax("def", "requires a name and a value"));
    }
    let name = expect_name("def", args.first())?;
    let value = eval(&args[1], env)?;
    debug!(name = name.name(), "def");
    env.set(name, value.clone());
    Ok(value)
}

/// (defn name [params] body*)
pub fn eval_defn(args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    let name = expect_name("defn", args.first())?;
    let body = args.get(2..).unwrap_or(&[]);
    let func = make_fn("defn", args.get(1), body, env)?.named(name.clone());
    debug!(name = name.name(), "defn");
    let value = SprigVal::Fn(func);
    env.set(name, value.clone());
    Ok(value)
}

/// (defmacro name [params] body*)
pub fn eval_defmacro(args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    let name = expect_name("defmacro", args.first())?;
    let body = args.get(2..).unwrap_or(&[]);
    let mac = make_fn("defmacro", args.get(1), body, env)?.named(name.clone());
    debug!(name = name.name(), "defmacro");
    let value = SprigVal::Macro(mac);
    env.set(name, value.clone());
    Ok(value)
}

/// (fn [params] body*)
pub fn eval_fn(args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    let body = args.get(1..).unwrap_or(&[]);
    Ok(SprigVal::Fn(make_fn("fn", args.first(), body, env)?))
}
