// sprig-core - Control flow special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Control flow special forms: if, do, let.
//!
//! Each returns the last form's step unforced so that calls in tail
//! position reach the trampoline.

use sprig_parser::SprigVal;

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::{Step, bind, eval, eval_body, evaluate};
use crate::trampoline::Bounce;

/// (if test then else?)
pub fn eval_if(args: &[SprigVal], env: &Env) -> Result<Step> {
    let (test, then, otherwise) = match args {
        [test, then] => (test, then, None),
        [test, then, otherwise] => (test, then, Some(otherwise)),
        _ => return Err(Error::syntax("if", "requires 2 or 3 arguments")),
    };

    if eval(test, env)?.is_truthy() {
        evaluate(then, env)
    } else {
        match otherwise {
            Some(form) => evaluate(form, env),
            None => Ok(Bounce::Done(SprigVal::Nil)),
        }
    }
}

/// (do exprs*)
pub fn eval_do(args: &[SprigVal], env: &Env) -> Result<Step> {
    eval_body(args, env)
}

/// (let [pattern expr ...] body*)
///
/// Each pair is bound in a fresh frame before the next expression is
/// evaluated, so later expressions see earlier names.
pub fn eval_let(args: &[SprigVal], env: &Env) -> Result<Step> {
    let Some(SprigVal::Vector(bindings, _)) = args.first() else {
        return Err(Error::syntax("let", "requires a vector of bindings"));
    };
    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let",
            "requires an even number of forms in the binding vector",
        ));
    }

    let frame = env.child();
    let pairs: Vec<&SprigVal> = bindings.iter().collect();
    for pair in pairs.chunks(2) {
        let value = eval(pair[1], &frame)?;
        bind(pair[0], &value, &frame)?;
    }

    eval_body(&args[1..], &frame)
}
