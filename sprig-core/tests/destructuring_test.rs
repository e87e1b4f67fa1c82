// sprig-core - Destructuring integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Destructuring in let bindings and function parameters.

mod common;

use common::*;

// =============================================================================
// Sequential
// =============================================================================

#[test]
fn test_let_vector_pattern() {
    assert_eval!("(let [[a b] [1 2]] (+ a b))", SprigVal::number(3));
}

#[test]
fn test_rest_binding() {
    assert_eval!("(let [[a b & c] [1 2 3 4]] c)", val("[3 4]"));
    assert_eval!("(let [[a & more] '(1)] more)", val("[]"));
}

#[test]
fn test_short_sequence_binds_nil() {
    assert_eval!("(let [[a b c] [1 2]] c)", SprigVal::Nil);
    assert_eval!("(let [[a] nil] a)", SprigVal::Nil);
}

#[test]
fn test_nested_and_as() {
    assert_eval!(
        "(let [[[a b] c :as all] [[1 2] 3]] [a b c all])",
        val("[1 2 3 [[1 2] 3]]")
    );
}

#[test]
fn test_rest_then_as() {
    assert_eval!("(let [[a & r :as all] [1 2 3]] [a r all])", val("[1 [2 3] [1 2 3]]"));
}

#[test]
fn test_dangling_rest_marker() {
    assert_eval_err_contains!(
        "(let [[a &] [1 2]] [a &])",
        "& must be followed by a binding pattern"
    );
    assert_eval_err_contains!("(fn [a &] a)", "& must be followed by a binding pattern");
}

#[test]
fn test_pattern_after_rest() {
    assert_eval_err_contains!(
        "(let [[a & r extra] [1 2 3]] [r extra])",
        "only :as may follow the rest binding"
    );
    assert_eval_err_contains!("(defn f [a & r extra] r)", "only :as may follow the rest binding");
}

#[test]
fn test_sequence_pattern_on_number() {
    assert_eval_err_contains!("(let [[a] 5] a)", "Cannot destructure number as a sequence");
}

#[test]
fn test_variadic_fn() {
    assert_eval!("(defn f [x & xs] xs) (f 1 2 3)", val("[2 3]"));
    assert_eval!("(defn g [& xs] (count xs)) (g)", SprigVal::number(0));
}

#[test]
fn test_fn_param_destructuring() {
    assert_eval!("(defn f [[a b] {:keys [c]}] [a b c]) (f [1 2] {:c 3})", val("[1 2 3]"));
}

// =============================================================================
// Associative
// =============================================================================

#[test]
fn test_keys() {
    assert_eval!("(let [{:keys [x y]} {:x 1 :y 2}] (+ x y))", SprigVal::number(3));
}

#[test]
fn test_keys_missing_is_nil() {
    assert_eval!("(let [{:keys [x]} {}] x)", SprigVal::Nil);
}

#[test]
fn test_or_defaults() {
    assert_eval!(
        "(let [{:keys [x y] :or {y 10}} {:x 1}] [x y])",
        val("[1 10]")
    );
}

#[test]
fn test_or_default_is_lazy() {
    // The default would throw if it were evaluated.
    assert_eval!(
        "(let [{:keys [x] :or {x (throw \"evaluated\")}} {:x 1}] x)",
        SprigVal::number(1)
    );
    assert_eval_err_contains!(
        "(let [{:keys [x] :or {x (throw \"evaluated\")}} {}] x)",
        "evaluated"
    );
}

#[test]
fn test_renaming_pairs() {
    assert_eval!("(let [{n :name} {:name \"sprig\"}] n)", SprigVal::string("sprig"));
    assert_eval!("(let [{v \"k\"} {\"k\" 1}] v)", SprigVal::number(1));
}

#[test]
fn test_map_as() {
    assert_eval!("(let [{:keys [a] :as m} {:a 1 :b 2}] (count m))", SprigVal::number(2));
}

#[test]
fn test_strs() {
    assert_eval!("(let [{:strs [a]} {\"a\" 5}] a)", SprigVal::number(5));
}

#[test]
fn test_nested_map_in_vector() {
    assert_eval!(
        "(let [[{:keys [id]} second] [{:id 7} 8]] [id second])",
        val("[7 8]")
    );
}

#[test]
fn test_map_pattern_on_vector() {
    assert_eval_err_contains!("(let [{:keys [a]} [1 2]] a)", "Cannot destructure vector as a map");
}

#[test]
fn test_invalid_patterns() {
    assert_eval_err_contains!("(fn [{:keys a}] a)", ":keys must be a vector");
    assert_eval_err_contains!("(fn [{:as 1}] 1)", ":as must be followed by a symbol");
    assert_eval_err_contains!("(let [1 2] 1)", "binding pattern must be a symbol");
}
