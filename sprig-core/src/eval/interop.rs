// sprig-core - Host interop special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Interop special forms: `new`, `.` and `.member` sugar.
//!
//! These only evaluate their operands; everything else is up to the
//! [`Host`](crate::host::Host) carried by the environment.

use sprig_parser::SprigVal;

use super::{eval, eval_args};
use crate::env::Env;
use crate::error::{Error, Result};

/// (new Ctor args...)
///
/// A symbol constructor is taken from the environment when bound there,
/// and from the host's globals otherwise.
pub fn eval_new(args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    let Some((ctor, rest)) = args.split_first() else {
        return Err(Error::syntax("new", "requires a constructor"));
    };
    let ctor = match ctor {
        SprigVal::Symbol(sym, _) if sym.host_global().is_none() => match env.lookup(sym) {
            Some(value) => value,
            None => env.host().global(sym.name())?,
        },
        other => eval(other, env)?,
    };
    let values = eval_args(rest, env)?;
    env.host().construct(&ctor, &values)
}

/// (. target member args...)
pub fn eval_dot(args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    let [target, member, rest @ ..] = args else {
        return Err(Error::syntax(".", "requires a target and a member name"));
    };
    let member = match member {
        SprigVal::Symbol(sym, _) => sym.member_call().unwrap_or(sym.name()).to_string(),
        SprigVal::String(s) => s.to_string(),
        other => {
            return Err(Error::syntax(
                ".",
                format!("member name must be a symbol, got {}", other.type_name()),
            ));
        }
    };
    invoke(target, &member, rest, env)
}

/// (.member target args...)
pub fn eval_member_sugar(member: &str, args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    let Some((target, rest)) = args.split_first() else {
        return Err(Error::syntax(
            &format!(".{}", member),
            "requires a target",
        ));
    };
    invoke(target, member, rest, env)
}

fn invoke(target: &SprigVal, member: &str, args: &[SprigVal], env: &Env) -> Result<SprigVal> {
    let target = eval(target, env)?;
    let values = eval_args(args, env)?;
    env.host().invoke(&target, member, &values)
}
