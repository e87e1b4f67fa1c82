// sprig-core - Exception handling
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Exception handling special forms: throw, try/catch.
//!
//! `catch` sees only the message of the error, never its kind or location.

use sprig_parser::{SprigVal, Symbol};
use tracing::debug;

use super::{Step, eval, eval_body};
use crate::env::Env;
use crate::error::{Error, Result};

/// (throw expr) - build the error raised by a throw.
///
/// Returns the error as a value; the caller raises it.
pub fn eval_throw(args: &[SprigVal], env: &Env) -> Result<Error> {
    match args {
        [expr] => Ok(Error::thrown(&eval(expr, env)?)),
        _ => Err(Error::syntax("throw", "requires exactly 1 argument")),
    }
}

/// (try body... (catch name handler...))
///
/// Body forms are forced one by one so that any error they raise is seen
/// here. The handler runs in tail position.
pub fn eval_try(args: &[SprigVal], env: &Env) -> Result<Step> {
    let mut body = Vec::new();
    let mut catch_clause: Option<(Symbol, Vec<SprigVal>)> = None;

    for arg in args {
        if let SprigVal::List(items, _) = arg
            && arg.is_form("catch")
        {
            let name = match items.get(1) {
                Some(SprigVal::Symbol(sym, _)) => sym.clone(),
                _ => return Err(Error::syntax("catch", "error name must be a symbol")),
            };
            catch_clause = Some((name, items.iter().skip(2).cloned().collect()));
            continue;
        }
        body.push(arg);
    }

    let mut result = Ok(SprigVal::Nil);
    for form in body {
        result = eval(form, env);
        if result.is_err() {
            break;
        }
    }

    match (result, catch_clause) {
        (Ok(value), _) => Ok(Step::Done(value)),
        (Err(err), Some((name, handler))) => {
            debug!(error = %err, "caught");
            let frame = env.with_bindings(&[name], &[SprigVal::string(err.message())]);
            eval_body(&handler, &frame)
        }
        (Err(err), None) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_parser::read;

    fn run(src: &str) -> Result<SprigVal> {
        eval(&read(src).unwrap().unwrap(), &Env::new())
    }

    #[test]
    fn test_catch_binds_message() {
        assert_eq!(
            run("(try (throw \"boom\") (catch e e))").unwrap(),
            SprigVal::string("boom")
        );
    }

    #[test]
    fn test_catch_unbound_symbol() {
        assert_eq!(
            run("(try nope (catch e e))").unwrap(),
            SprigVal::string("Unable to resolve symbol: nope")
        );
    }

    #[test]
    fn test_try_without_error() {
        assert_eq!(run("(try 1 2 (catch e 3))").unwrap(), SprigVal::number(2));
        assert_eq!(run("(try)").unwrap(), SprigVal::Nil);
    }

    #[test]
    fn test_try_without_catch_reraises() {
        let err = run("(try (throw \"boom\"))").unwrap_err();
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_catch_name_must_be_symbol() {
        assert!(run("(try (throw 1) (catch \"e\" 2))").is_err());
    }

    #[test]
    fn test_throw_non_string_uses_display() {
        assert_eq!(
            run("(try (throw :oops) (catch e e))").unwrap(),
            SprigVal::string(":oops")
        );
    }
}
