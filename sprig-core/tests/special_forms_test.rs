// sprig-core - Special forms integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for Sprig special forms.
//!
//! Tests for: def, defn, fn, if, do, let, quote

mod common;

use common::*;

// =============================================================================
// def / defn / fn
// =============================================================================

#[test]
fn test_def_binds_and_returns_value() {
    let env = new_env();
    assert_eq!(eval_str_with_env("(def x 42)", &env).unwrap(), SprigVal::number(42));
    assert_eq!(eval_str_with_env("x", &env).unwrap(), SprigVal::number(42));
}

#[test]
fn test_defn_and_call() {
    assert_eval!("(defn add [a b] (+ a b)) (add 2 3)", SprigVal::number(5));
}

#[test]
fn test_defn_returns_closure() {
    let result = eval_str("(defn f [x] x)").unwrap();
    assert!(matches!(result, SprigVal::Fn(_)));
    assert_eq!(result.to_string(), "#<fn [x]>");
}

#[test]
fn test_defn_multiple_body_forms() {
    assert_eval!(
        "(def log (atom 0)) (defn f [x] (reset! log x) (* x 2)) [(f 4) @log]",
        val("[8 4]")
    );
}

#[test]
fn test_defn_without_params_vector() {
    assert_eval_err_contains!("(defn f x x)", "parameters must be a vector");
}

#[test]
fn test_anonymous_fn() {
    assert_eval!("((fn [x y] (* x y)) 6 7)", SprigVal::number(42));
}

#[test]
fn test_closure_captures_environment() {
    assert_eval!(
        "(defn make-adder [n] (fn [x] (+ x n))) (def add5 (make-adder 5)) (add5 10)",
        SprigVal::number(15)
    );
}

#[test]
fn test_closure_sees_later_redefinition_in_root() {
    assert_eval!("(defn f [] (g)) (defn g [] 1) (f)", SprigVal::number(1));
}

#[test]
fn test_missing_arguments_bind_nil() {
    assert_eval!("((fn [a b] b) 1)", SprigVal::Nil);
}

#[test]
fn test_extra_arguments_ignored() {
    assert_eval!("((fn [a] a) 1 2 3)", SprigVal::number(1));
}

#[test]
fn test_recursion() {
    assert_eval!(
        "(defn fact [n] (if (<= n 1) 1 (* n (fact (- n 1))))) (fact 10)",
        SprigVal::number(3628800)
    );
}

// =============================================================================
// if / do / let
// =============================================================================

#[test]
fn test_if_truthiness() {
    assert_eval!("(if nil :t :f)", SprigVal::keyword("f"));
    assert_eval!("(if false :t :f)", SprigVal::keyword("f"));
    assert_eval!("(if 0 :t :f)", SprigVal::keyword("t"));
    assert_eval!("(if \"\" :t :f)", SprigVal::keyword("t"));
    assert_eval!("(if [] :t :f)", SprigVal::keyword("t"));
    assert_eval!("(if false :t)", SprigVal::Nil);
}

#[test]
fn test_do() {
    assert_eval!("(do (def a 1) (def b 2) (+ a b))", SprigVal::number(3));
    assert_eval!("(do)", SprigVal::Nil);
}

#[test]
fn test_let_sequential_bindings() {
    assert_eval!("(let [a 1 b (+ a 1) c (* b 10)] c)", SprigVal::number(20));
}

#[test]
fn test_let_shadowing_does_not_leak() {
    let env = new_env();
    eval_str_with_env("(def x 1)", &env).unwrap();
    assert_eq!(
        eval_str_with_env("(let [x 2] x)", &env).unwrap(),
        SprigVal::number(2)
    );
    assert_eq!(eval_str_with_env("x", &env).unwrap(), SprigVal::number(1));
}

#[test]
fn test_let_odd_binding_vector() {
    assert_eval_err_contains!("(let [a 1 b] a)", "even number of forms");
}

#[test]
fn test_let_requires_vector() {
    assert_eval_err_contains!("(let (a 1) a)", "requires a vector of bindings");
}

#[test]
fn test_let_empty_body() {
    assert_eval!("(let [a 1])", SprigVal::Nil);
}

// =============================================================================
// quote / literals
// =============================================================================

#[test]
fn test_quote() {
    assert_eval!("'(a b c)", val("(a b c)"));
    assert_eval!("(quote x)", SprigVal::symbol("x"));
    assert_eval!("'[1 (+ 1 1)]", val("[1 (+ 1 1)]"));
}

#[test]
fn test_self_evaluating() {
    assert_eval!("42", SprigVal::number(42));
    assert_eval!("\"hi\"", SprigVal::string("hi"));
    assert_eval!(":k", SprigVal::keyword("k"));
    assert_eval!("nil", SprigVal::Nil);
    assert_eval!("true", SprigVal::Bool(true));
}

#[test]
fn test_empty_list_is_nil() {
    assert_eval!("()", SprigVal::Nil);
}

#[test]
fn test_collection_literals_evaluate_elements() {
    assert_eval!("[(+ 1 1) :a]", val("[2 :a]"));
    assert_eval!("(get {:a (+ 1 2)} :a)", SprigVal::number(3));
}

#[test]
fn test_map_literal_evaluates_in_source_order() {
    let src = "(def log (atom []))
               {:zeta (swap! log conj 1) :alpha (swap! log conj 2) :mid (swap! log conj 3)
                :b (swap! log conj 4) :q (swap! log conj 5)}
               @log";
    assert_eval!(src, val("[1 2 3 4 5]"));
}

#[test]
fn test_map_literal_keys_before_values() {
    let src = "(def log (atom []))
               {(do (swap! log conj :k1) :a) (swap! log conj :v1)
                (do (swap! log conj :k2) :b) (swap! log conj :v2)}
               @log";
    assert_eval!(src, val("[:k1 :v1 :k2 :v2]"));
}

#[test]
fn test_map_literal_duplicate_keys_all_evaluated() {
    // Both values run; the later one wins.
    let src = "(def log (atom []))
               [{:a (swap! log conj 1) :a (swap! log conj 2)} @log]";
    assert_eval!(src, val("[{:a [1 2]} [1 2]]"));
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    let src = "(def log (atom []))
               (defn pair [a b] [a b])
               [(pair (swap! log conj 1) (swap! log conj 2)) @log]";
    assert_eval!(src, val("[[[1] [1 2]] [1 2]]"));
}

#[test]
fn test_quoted_map_literal() {
    assert_eval!("(get '{:a (+ 1 2)} :a)", val("(+ 1 2)"));
    assert_eval!("(count '{:a 1 :a 2})", SprigVal::number(1));
    assert_eval!("(type '{:a 1})", SprigVal::keyword("map"));
}

#[test]
fn test_keyword_as_function() {
    assert_eval!("(:a {:a 1})", SprigVal::number(1));
    assert_eval!("(:b {:a 1})", SprigVal::Nil);
    assert_eval!("(:b {:a 1} :default)", SprigVal::keyword("default"));
    assert_eval!("(:a nil)", SprigVal::Nil);
    assert_eval_err_contains!("(:a)", "Wrong number of arguments");
}

#[test]
fn test_keyword_lookup_uses_value_equality() {
    assert_eval!("(get {[1 2] :found} [1 2])", SprigVal::keyword("found"));
    assert_eval!("(get {[1 2] :found} '(1 2))", SprigVal::keyword("found"));
}

#[test]
fn test_not_callable() {
    assert_eval_err_contains!("(1 2)", "Cannot call value: 1");
    assert_eval_err_contains!("(\"s\")", "Cannot call value: \"s\"");
}

#[test]
fn test_unresolved_symbol() {
    assert_eval_err_contains!("undefined-thing", "Unable to resolve symbol: undefined-thing");
}
