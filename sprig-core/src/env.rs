// sprig-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment frames for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sprig_parser::{SprigVal, Symbol};

use crate::error::{Error, Result};
use crate::host::{Host, StdHost};

/// A lexical environment frame.
///
/// Frames form a chain through parent references. Lookup walks outward and
/// the first match wins; [`Env::set`] only ever writes to the frame it is
/// called on. Frames are shared, so a frame lives as long as the longest
/// lived closure or call that captured it.
///
/// # Examples
///
/// ```
/// use sprig_core::Env;
/// use sprig_parser::{SprigVal, Symbol};
///
/// let env = Env::new();
/// env.set(Symbol::new("x"), SprigVal::number(42));
///
/// let child = env.child();
/// assert_eq!(child.get(&Symbol::new("x")).unwrap(), SprigVal::number(42));
///
/// // Shadowing in the child leaves the parent alone
/// child.set(Symbol::new("x"), SprigVal::number(100));
/// assert_eq!(child.get(&Symbol::new("x")).unwrap(), SprigVal::number(100));
/// assert_eq!(env.get(&Symbol::new("x")).unwrap(), SprigVal::number(42));
/// ```
#[derive(Clone)]
pub struct Env {
    inner: Rc<EnvInner>,
}

struct EnvInner {
    bindings: RefCell<HashMap<Symbol, SprigVal>>,
    parent: Option<Env>,
    /// Shared by every frame of one chain.
    host: Rc<dyn Host>,
}

impl Env {
    /// Create a root frame backed by the standard host.
    pub fn new() -> Self {
        Env::with_host(Rc::new(StdHost::new()))
    }

    /// Create a root frame backed by `host`.
    pub fn with_host(host: Rc<dyn Host>) -> Self {
        Env {
            inner: Rc::new(EnvInner {
                bindings: RefCell::new(HashMap::new()),
                parent: None,
                host,
            }),
        }
    }

    /// Create a child frame of this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(EnvInner {
                bindings: RefCell::new(HashMap::new()),
                parent: Some(self.clone()),
                host: Rc::clone(&self.inner.host),
            }),
        }
    }

    /// Create a child frame binding `names[i]` to `values[i]`, up to the
    /// shorter of the two.
    #[must_use]
    pub fn with_bindings(&self, names: &[Symbol], values: &[SprigVal]) -> Self {
        let env = self.child();
        {
            let mut bindings = env.inner.bindings.borrow_mut();
            for (name, value) in names.iter().zip(values) {
                bindings.insert(name.clone(), value.clone());
            }
        }
        env
    }

    /// Bind `name` in this frame.
    pub fn set(&self, name: Symbol, value: SprigVal) {
        self.inner.bindings.borrow_mut().insert(name, value);
    }

    /// Look `name` up through the chain.
    pub fn get(&self, name: &Symbol) -> Result<SprigVal> {
        self.lookup(name)
            .ok_or_else(|| Error::reference(name.name()))
    }

    /// Like [`Env::get`] but without an error for missing names.
    /// Iterative, so deep chains do not grow the stack.
    #[must_use]
    pub fn lookup(&self, name: &Symbol) -> Option<SprigVal> {
        let mut current = self;
        loop {
            if let Some(value) = current.inner.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            current = current.inner.parent.as_ref()?;
        }
    }

    #[must_use]
    pub fn is_defined(&self, name: &Symbol) -> bool {
        self.lookup(name).is_some()
    }

    /// The host interop collaborator for this chain.
    #[must_use]
    pub fn host(&self) -> Rc<dyn Host> {
        Rc::clone(&self.inner.host)
    }

    /// Number of frames from here to the root, inclusive.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Some(parent) = &current.inner.parent {
            depth += 1;
            current = parent;
        }
        depth
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("bindings", &self.inner.bindings.borrow().len())
            .field("depth", &self.depth())
            .finish()
    }
}
