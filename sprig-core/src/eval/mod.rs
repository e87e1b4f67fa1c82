// sprig-core - AST-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for Sprig forms.
//!
//! [`evaluate`] performs one step and may hand back a deferred tail call;
//! [`eval`] drives it to a value. Every sub-evaluation that is not in tail
//! position goes through [`eval`], so a deferred call never escapes
//! unforced.

pub mod apply;
pub mod destructuring;
pub mod exceptions;
pub mod interop;
pub mod quasiquote;
pub mod special_forms;

pub use apply::{NativeFnImpl, apply, make_native_fn};
pub use destructuring::bind;

use sprig_parser::{SprigMap, SprigVal, Vector, map_lookup};

use self::special_forms::SPECIAL_FORMS;
use crate::env::Env;
use crate::error::{Error, Result};
use crate::trampoline::{self, Bounce};

/// One evaluation step: a value or a deferred tail call.
pub type Step = Bounce<SprigVal, Error>;

/// Evaluate `expr` in `env` to a value.
pub fn eval(expr: &SprigVal, env: &Env) -> Result<SprigVal> {
    trampoline::run(evaluate(expr, env))
}

/// Evaluate `expr` one step. Errors without a location take the
/// location of `expr`.
pub fn evaluate(expr: &SprigVal, env: &Env) -> Result<Step> {
    evaluate_form(expr, env).map_err(|e| e.at(expr.location()))
}

fn evaluate_form(expr: &SprigVal, env: &Env) -> Result<Step> {
    match expr {
        SprigVal::Symbol(sym, _) => {
            if let Some(name) = sym.host_global() {
                return env.host().global(name).map(Bounce::Done);
            }
            env.get(sym).map(Bounce::Done)
        }

        SprigVal::Vector(items, span) => {
            let items = items
                .iter()
                .map(|item| eval(item, env))
                .collect::<Result<Vector<_>>>()?;
            Ok(Bounce::Done(SprigVal::Vector(items, span.clone())))
        }

        // Map literals evaluate key, then value, pair by pair in source order.
        SprigVal::MapForm(pairs, span) => {
            let map = eval_entries(pairs.iter().map(|(k, v)| (k, v)), env)?;
            Ok(Bounce::Done(SprigVal::Map(map, span.clone())))
        }

        // A map built by a macro rather than read from source.
        SprigVal::Map(entries, span) => {
            let map = eval_entries(entries.iter(), env)?;
            Ok(Bounce::Done(SprigVal::Map(map, span.clone())))
        }

        SprigVal::List(items, _) => match items.front() {
            None => Ok(Bounce::Done(SprigVal::Nil)),
            Some(head) => eval_list(head, items, env),
        },

        // Everything else evaluates to itself.
        _ => Ok(Bounce::Done(expr.clone())),
    }
}

/// Evaluate the non-empty list `items` whose operator is `head`: special
/// form, macro call or application. Function arguments are evaluated
/// straight off the list.
fn eval_list(head: &SprigVal, items: &Vector<SprigVal>, env: &Env) -> Result<Step> {
    let args = || items.iter().skip(1);

    if let SprigVal::Symbol(sym, _) = head {
        if SPECIAL_FORMS.contains(&sym.name()) {
            let forms: Vec<SprigVal> = args().cloned().collect();
            if let Some(step) = special_forms::dispatch(sym.name(), &forms, env)? {
                return Ok(step);
            }
        } else if let Some(member) = sym.member_call() {
            let forms: Vec<SprigVal> = args().cloned().collect();
            return interop::eval_member_sugar(member, &forms, env).map(Bounce::Done);
        }
    }

    let op = eval(head, env)?;
    match &op {
        SprigVal::Macro(m) => {
            let forms: Vec<SprigVal> = args().cloned().collect();
            let expansion = apply::expand_macro(m, &forms)?;
            evaluate(&expansion, env)
        }
        SprigVal::Keyword(_) | SprigVal::Fn(_) | SprigVal::NativeFn(_) => {
            let values = args()
                .map(|arg| eval(arg, env))
                .collect::<Result<Vec<_>>>()?;
            apply::apply_step(&op, values)
        }
        _ => Err(Error::not_callable(&op)),
    }
}

fn eval_entries<'a>(
    entries: impl Iterator<Item = (&'a SprigVal, &'a SprigVal)>,
    env: &Env,
) -> Result<SprigMap> {
    let mut map = SprigMap::new();
    for (k, v) in entries {
        let key = eval(k, env)?;
        let value = eval(v, env)?;
        map = map.assoc(key, value);
    }
    Ok(map)
}

/// Evaluate arguments left to right.
pub fn eval_args(args: &[SprigVal], env: &Env) -> Result<Vec<SprigVal>> {
    args.iter().map(|arg| eval(arg, env)).collect()
}

/// Evaluate all but the last form for effect and the last in tail position.
pub fn eval_body(body: &[SprigVal], env: &Env) -> Result<Step> {
    let Some((last, init)) = body.split_last() else {
        return Ok(Bounce::Done(SprigVal::Nil));
    };
    for form in init {
        eval(form, env)?;
    }
    evaluate(last, env)
}

/// `(:k m default?)`: look `k` up in `m`. A missing key, or a target that
/// is not a map, yields the default or nil.
pub fn keyword_lookup(key: &SprigVal, args: &[SprigVal]) -> Result<SprigVal> {
    let (target, default) = match args {
        [target] => (target, SprigVal::Nil),
        [target, default] => (target, default.clone()),
        _ => return Err(Error::arity(&key.to_string(), "1 or 2", args.len())),
    };
    Ok(match target {
        SprigVal::Map(map, _) => map_lookup(map, key).cloned().unwrap_or(default),
        _ => default,
    })
}
