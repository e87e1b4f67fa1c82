// sprig-core - Special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Special forms for the Sprig evaluator.
//!
//! A special form is recognised by the literal name in operator position,
//! before anything is looked up in the environment.

pub mod control;
pub mod definitions;

pub use control::{eval_do, eval_if, eval_let};
pub use definitions::{eval_def, eval_defmacro, eval_defn, eval_fn};

use sprig_parser::SprigVal;

use super::{Step, exceptions, interop, quasiquote};
use crate::env::Env;
use crate::error::{Error, Result};
use crate::trampoline::Bounce;

/// Names handled here rather than by function application.
pub const SPECIAL_FORMS: &[&str] = &[
    "def",
    "defn",
    "defmacro",
    "if",
    "do",
    "let",
    "fn",
    "quote",
    "quasiquote",
    "unquote",
    "try",
    "throw",
    "new",
    ".",
];

/// Run the special form `name`, or return `None` if `name` is not one.
pub fn dispatch(name: &str, args: &[SprigVal], env: &Env) -> Result<Option<Step>> {
    let step = match name {
        "def" => Bounce::Done(eval_def(args, env)?),
        "defn" => Bounce::Done(eval_defn(args, env)?),
        "defmacro" => Bounce::Done(eval_defmacro(args, env)?),
        "fn" => Bounce::Done(eval_fn(args, env)?),
        "if" => eval_if(args, env)?,
        "do" => eval_do(args, env)?,
        "let" => eval_let(args, env)?,
        "quote" => Bounce::Done(eval_quote(args)?),
        "quasiquote" => Bounce::Done(quasiquote::eval_quasiquote(args, env)?),
        "unquote" => return Err(Error::syntax("unquote", "used outside of quasiquote")),
        "try" => exceptions::eval_try(args, env)?,
        "throw" => return Err(exceptions::eval_throw(args, env)?),
        "new" => Bounce::Done(interop::eval_new(args, env)?),
        "." => Bounce::Done(interop::eval_dot(args, env)?),
        _ => return Ok(None),
    };
    Ok(Some(step))
}

/// (quote form) - the form as data
fn eval_quote(args: &[SprigVal]) -> Result<SprigVal> {
    match args {
        [form] => Ok(form.to_data()),
        _ => Err(Error::syntax("quote", "requires exactly 1 argument")),
    }
}
