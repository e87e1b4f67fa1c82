// sprig-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for Sprig integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh environment with builtins
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`eval_all`] - Evaluate code, keeping the raw [`Error`]
//! - [`new_env`] - Create a new environment with builtins registered
//! - [`val`] - Read a literal to compare against
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err_contains!`] - Assert that code fails with a message

// Re-export common types for convenience
pub use sprig_core::builtins::register_builtins;
pub use sprig_core::env::Env;
#[allow(unused_imports)]
pub use sprig_core::error::{Error, ErrorKind};
pub use sprig_core::eval::eval;
#[allow(unused_imports)]
pub use sprig_parser::{Keyword, Parser, SprigVal, Symbol};

/// Evaluate every form in `s` in a fresh environment with builtins.
///
/// # Returns
///
/// Returns the last value, or the error rendered as a string.
#[must_use]
pub fn eval_str(s: &str) -> Result<SprigVal, String> {
    eval_str_with_env(s, &new_env())
}

/// Evaluate every form in `s` in the given environment.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<SprigVal, String> {
    eval_all(s, env).map_err(|e| e.to_string())
}

/// Evaluate every form in `s`, returning the last value or the error.
///
/// Source locations name the file `test.sp`.
pub fn eval_all(s: &str, env: &Env) -> Result<SprigVal, Error> {
    let mut parser = Parser::new(s, "test.sp")?;
    let mut result = SprigVal::Nil;

    while let Some(expr) = parser.parse()? {
        result = eval(&expr, env)?;
    }

    Ok(result)
}

/// Create a new environment with builtins registered.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

/// Read a single literal form without evaluating it.
///
/// # Panics
///
/// Panics if `s` does not contain a form.
#[must_use]
#[allow(dead_code)]
pub fn val(s: &str) -> SprigVal {
    sprig_parser::read(s)
        .expect("literal should read")
        .expect("literal should contain a form")
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", SprigVal::number(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` fails with a message containing `needle`.
///
/// # Example
///
/// ```ignore
/// assert_eval_err_contains!("(/ 1 0)", "Division by zero");
/// ```
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $needle:expr) => {
        match $crate::common::eval_str($input) {
            Ok(v) => panic!("Expected error for '{}' but got {:?}", $input, v),
            Err(msg) => assert!(
                msg.contains($needle),
                "Error for '{}' was {:?}, expected it to contain {:?}",
                $input,
                msg,
                $needle
            ),
        }
    };
}
