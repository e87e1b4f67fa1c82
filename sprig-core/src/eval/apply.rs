// sprig-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application and macro expansion.

use std::any::Any;
use std::rc::Rc;

use sprig_parser::{SprigFn, SprigNativeFn, SprigVal};
use tracing::debug;

use super::destructuring::bind;
use super::{Step, eval, evaluate, keyword_lookup};
use crate::env::Env;
use crate::error::{Error, Result};
use crate::trampoline::{self, Bounce};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[SprigVal]) -> Result<SprigVal>;

/// Apply a function to arguments, running any tail calls to completion.
pub fn apply(func: &SprigVal, args: &[SprigVal]) -> Result<SprigVal> {
    trampoline::run(apply_step(func, args.to_vec()))
}

/// Apply a function, deferring the body of a closure to the trampoline.
pub fn apply_step(func: &SprigVal, args: Vec<SprigVal>) -> Result<Step> {
    match func {
        SprigVal::Fn(f) => {
            let frame = closure_env(f)?.child();
            bind(&f.params, &SprigVal::vector(args), &frame)?;
            let body = Rc::clone(&f.body);
            Ok(Bounce::more(move || evaluate(&body, &frame)))
        }
        SprigVal::NativeFn(f) => apply_native(f, &args).map(Bounce::Done),
        SprigVal::Keyword(_) => keyword_lookup(func, &args).map(Bounce::Done),
        other => Err(Error::not_callable(other)),
    }
}

fn closure_env(f: &SprigFn) -> Result<&Env> {
    f.env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::host("closure environment has an unexpected type"))
}

/// Apply a native function.
pub(crate) fn apply_native(func: &SprigNativeFn, args: &[SprigVal]) -> Result<SprigVal> {
    let f = func
        .func
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::host(format!("native function '{}' has an invalid type", func.name)))?;
    f(args)
}

/// Expand a macro call. The arguments are bound unevaluated, as data, and
/// the body runs in a child of the macro's defining environment.
pub fn expand_macro(mac: &SprigFn, args: &[SprigVal]) -> Result<SprigVal> {
    let frame = closure_env(mac)?.child();
    bind(&mac.params, &SprigVal::vector(args.iter().map(SprigVal::to_data)), &frame)?;
    let expansion = eval(&mac.body, &frame)?;
    debug!(
        name = mac.name.as_ref().map(|n| n.name()).unwrap_or("<anonymous>"),
        %expansion,
        "macro expanded"
    );
    Ok(expansion)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &str,
    func: impl Fn(&[SprigVal]) -> Result<SprigVal> + 'static,
) -> SprigVal {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    SprigVal::NativeFn(SprigNativeFn::new(name, func_any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_parser::read;

    fn eval_str(src: &str, env: &Env) -> Result<SprigVal> {
        eval(&read(src).unwrap().unwrap(), env)
    }

    #[test]
    fn test_apply_native() {
        let add = make_native_fn("add", |args| {
            let mut total = 0.0;
            for arg in args {
                if let SprigVal::Number(n) = arg {
                    total += n;
                }
            }
            Ok(SprigVal::Number(total))
        });
        let args = [SprigVal::number(1), SprigVal::number(2)];
        assert_eq!(apply(&add, &args).unwrap(), SprigVal::number(3));
    }

    #[test]
    fn test_apply_closure_missing_args_are_nil() {
        let env = Env::new();
        let f = eval_str("(fn [a b] b)", &env).unwrap();
        assert_eq!(apply(&f, &[SprigVal::number(1)]).unwrap(), SprigVal::Nil);
    }

    #[test]
    fn test_apply_keyword() {
        let env = Env::new();
        let m = eval_str("{:a 1}", &env).unwrap();
        assert_eq!(
            apply(&SprigVal::keyword("a"), &[m]).unwrap(),
            SprigVal::number(1)
        );
    }

    #[test]
    fn test_apply_non_callable() {
        let err = apply(&SprigVal::number(1), &[]).unwrap_err();
        assert_eq!(err.message(), "Cannot call value: 1");
    }

    #[test]
    fn test_expand_macro_sees_unevaluated_args() {
        let env = Env::new();
        let SprigVal::Macro(m) = eval_str("(defmacro second-form [a b] (quote b))", &env)
            .and_then(|_| eval_str("second-form", &env))
            .unwrap()
        else {
            panic!("expected a macro");
        };
        let args = [SprigVal::symbol("x"), SprigVal::symbol("y")];
        assert_eq!(expand_macro(&m, &args).unwrap(), SprigVal::symbol("b"));
    }
}
