// sprig-core - Trampoline for tail calls
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Deferred calls for stack-safe tail recursion.
//!
//! A function in tail position returns [`Bounce::More`] holding the rest of
//! the work instead of calling it. [`run`] keeps invoking continuations
//! until one yields [`Bounce::Done`], so a chain of tail calls uses a
//! constant amount of native stack. Calls outside tail position still
//! recurse normally.

use tracing::trace;

/// Either a finished value or the next step of a computation.
pub enum Bounce<T, E> {
    Done(T),
    More(Box<dyn FnOnce() -> Result<Bounce<T, E>, E>>),
}

impl<T, E> Bounce<T, E> {
    /// Defer `f` to the driver loop.
    pub fn more(f: impl FnOnce() -> Result<Bounce<T, E>, E> + 'static) -> Self {
        Bounce::More(Box::new(f))
    }
}

/// Drive `step` until it produces a value.
pub fn run<T, E>(step: Result<Bounce<T, E>, E>) -> Result<T, E> {
    let mut current = step?;
    let mut bounces = 0usize;
    loop {
        match current {
            Bounce::Done(value) => {
                if bounces > 0 {
                    trace!(bounces, "trampoline finished");
                }
                return Ok(value);
            }
            Bounce::More(next) => {
                bounces += 1;
                current = next()?;
            }
        }
    }
}
