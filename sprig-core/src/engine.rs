// sprig-core - Engine implementation
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The Engine struct - the program loader and main entry point for
//! embedding Sprig.

use std::path::Path;
use std::rc::Rc;

use sprig_parser::{Parser, SprigVal, Symbol};
use tracing::debug;

use crate::builtins::register_builtins;
use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::{apply, eval, make_native_fn};
use crate::host::{Host, StdHost};

/// File name reported in locations for code passed to [`Engine::eval`].
const INPUT_NAME: &str = "<input>";

/// The Sprig scripting engine.
///
/// `Engine` owns one long-lived root environment seeded with the builtins
/// and evaluates source against it form by form.
///
/// # Thread Safety
///
/// **`Engine` is NOT thread-safe.** It uses `Rc` and `RefCell` internally.
/// Create a separate `Engine` per thread.
///
/// # Example
///
/// ```rust
/// use sprig_core::Engine;
///
/// let engine = Engine::new();
/// let result = engine.eval("(+ 1 2 3)").unwrap();
/// assert_eq!(result.to_string(), "6");
/// ```
pub struct Engine {
    env: Env,
}

impl Engine {
    /// Create a new Engine on the default host.
    pub fn new() -> Self {
        Engine::with_host(Rc::new(StdHost::new()))
    }

    /// Create a new Engine whose interop forms talk to `host`.
    pub fn with_host(host: Rc<dyn Host>) -> Self {
        let env = Env::with_host(host);
        register_builtins(&env);
        Engine { env }
    }

    /// The root environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Evaluate a string of Sprig code.
    ///
    /// Returns the result of the last expression.
    ///
    /// # Errors
    ///
    /// A lexical error aborts before anything is evaluated. A syntax error
    /// stops at the malformed form, after the forms before it have run.
    /// Evaluation errors stop at the failing form.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sprig_core::Engine;
    ///
    /// let engine = Engine::new();
    /// let result = engine.eval("(def x 42) (* x 2)").unwrap();
    /// assert_eq!(result.to_string(), "84");
    /// ```
    pub fn eval(&self, code: &str) -> Result<SprigVal> {
        self.eval_named(code, INPUT_NAME)
    }

    /// Evaluate code, reporting locations against `file`.
    pub fn eval_named(&self, code: &str, file: &str) -> Result<SprigVal> {
        let mut parser = Parser::new(code, file)?;

        let mut result = SprigVal::Nil;
        while let Some(expr) = parser.parse()? {
            debug!(file, form = %expr, "evaluating");
            result = eval(&expr, &self.env)?;
        }
        Ok(result)
    }

    /// Evaluate a file of Sprig code.
    ///
    /// Returns the result of the last expression.
    pub fn eval_file(&self, path: impl AsRef<Path>) -> Result<SprigVal> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.eval_named(&code, &path.display().to_string())
    }

    /// Get a value from the root environment.
    ///
    /// Returns `None` if the symbol is not defined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SprigVal> {
        self.env.lookup(&Symbol::new(name))
    }

    /// Bind a value in the root environment.
    pub fn define(&self, name: &str, value: impl Into<SprigVal>) {
        self.env.set(Symbol::new(name), value.into());
    }

    /// Call a function by name with arguments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sprig_core::Engine;
    /// use sprig_parser::SprigVal;
    ///
    /// let engine = Engine::new();
    /// let result = engine.call("+", &[
    ///     SprigVal::number(1),
    ///     SprigVal::number(2),
    ///     SprigVal::number(3),
    /// ]).unwrap();
    /// assert_eq!(result.to_string(), "6");
    /// ```
    pub fn call(&self, name: &str, args: &[SprigVal]) -> Result<SprigVal> {
        let func = self.get(name).ok_or_else(|| Error::reference(name))?;
        apply(&func, args)
    }

    /// Register a native Rust function.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sprig_core::Engine;
    /// use sprig_parser::SprigVal;
    ///
    /// let engine = Engine::new();
    /// engine.register_native("double", |args| match args {
    ///     [SprigVal::Number(n)] => Ok(SprigVal::Number(n * 2.0)),
    ///     _ => Ok(SprigVal::Nil),
    /// });
    /// assert_eq!(engine.eval("(double 21)").unwrap(), SprigVal::number(42));
    /// ```
    pub fn register_native<F>(&self, name: &str, func: F)
    where
        F: Fn(&[SprigVal]) -> Result<SprigVal> + 'static,
    {
        self.env.set(Symbol::new(name), make_native_fn(name, func));
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
