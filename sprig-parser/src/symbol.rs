// sprig-parser - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols name bindings in the environment.
//!
//! Two symbols are equal when their names are equal. Names are interned,
//! so the comparison is a pointer check.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::intern::intern;

/// Names starting with this prefix are resolved against the host's globals.
pub const HOST_PREFIX: &str = "host/";

/// An interned symbol name.
#[derive(Clone)]
pub struct Symbol {
    name: Arc<str>,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol { name: intern(name) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The global name this symbol refers to, if it uses the host prefix.
    #[must_use]
    pub fn host_global(&self) -> Option<&str> {
        self.name
            .strip_prefix(HOST_PREFIX)
            .filter(|rest| !rest.is_empty())
    }

    /// The member name of `.member` call sugar, e.g. `.toUpperCase`.
    #[must_use]
    pub fn member_call(&self) -> Option<&str> {
        self.name.strip_prefix('.').filter(|rest| !rest.is_empty())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.name).hash(state);
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}
