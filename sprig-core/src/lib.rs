// sprig-core - Runtime and evaluator for the Sprig language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # sprig-core
//!
//! Runtime and evaluator for the Sprig language.
//! Provides an AST-walking interpreter for `SprigVal` expressions, with
//! tail calls run on a trampoline so deep tail recursion uses constant
//! native stack.
//!
//! ```rust
//! use sprig_core::Engine;
//!
//! let engine = Engine::new();
//! engine.eval("(defn loop [n] (if (= n 0) :done (loop (- n 1))))").unwrap();
//! assert_eq!(engine.eval("(loop 100000)").unwrap().to_string(), ":done");
//! ```

pub mod builtins;
pub mod engine;
pub mod env;
pub mod error;
pub mod eval;
pub mod host;
pub mod trampoline;

pub use builtins::register_builtins;
pub use engine::Engine;
pub use env::Env;
pub use error::{Error, ErrorKind, Result};
pub use eval::{apply, eval, evaluate, make_native_fn};
pub use host::{Host, StdHost};
pub use trampoline::Bounce;

// Re-export parser types for convenience
pub use sprig_parser::{Keyword, SprigVal, Symbol, render};
