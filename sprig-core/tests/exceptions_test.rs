// sprig-core - try/catch/throw integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

mod common;

use common::*;

#[test]
fn test_catch_thrown_string() {
    assert_eval!("(try (throw \"boom\") (catch e e))", SprigVal::string("boom"));
}

#[test]
fn test_catch_builtin_error() {
    assert_eval!("(try (/ 1 0) (catch e e))", SprigVal::string("Division by zero"));
}

#[test]
fn test_catch_binds_message_only() {
    // No location prefix even though the failing form is located.
    assert_eval!(
        "(try\n  (undefined-fn 1)\n  (catch e e))",
        SprigVal::string("Unable to resolve symbol: undefined-fn")
    );
}

#[test]
fn test_handler_has_several_forms() {
    assert_eval!(
        "(def log (atom nil)) (try (throw \"x\") (catch e (reset! log e) :handled))",
        SprigVal::keyword("handled")
    );
}

#[test]
fn test_catch_scope() {
    // The error name is only bound inside the handler.
    assert_eval_err_contains!(
        "(try (throw \"x\") (catch e e)) e",
        "Unable to resolve symbol: e"
    );
}

#[test]
fn test_no_catch_reraises() {
    assert_eval_err_contains!("(try (throw \"up\"))", "up");
}

#[test]
fn test_body_stops_at_error() {
    assert_eval!(
        "(def a (atom 0)) (try (reset! a 1) (throw \"stop\") (reset! a 2) (catch e nil)) @a",
        SprigVal::number(1)
    );
}

#[test]
fn test_error_from_called_function() {
    assert_eval!(
        "(defn fail [] (throw \"inner\")) (try (fail) (catch e (str \"caught: \" e)))",
        SprigVal::string("caught: inner")
    );
}

#[test]
fn test_nested_try() {
    assert_eval!(
        "(try (try (throw \"a\") (catch e (throw (str e \"b\")))) (catch e e))",
        SprigVal::string("ab")
    );
}

#[test]
fn test_throw_non_string() {
    assert_eval!("(try (throw [1 2]) (catch e e))", SprigVal::string("[1 2]"));
}

#[test]
fn test_uncaught_throw_kind() {
    let env = new_env();
    let err = eval_all("(throw \"bare\")", &env).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Thrown("bare".to_string()));
    assert!(err.location.is_some());
}
