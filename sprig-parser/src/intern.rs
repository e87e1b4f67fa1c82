// sprig-parser - String interning for symbols and keywords
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! A process-wide string table.
//!
//! Symbols and keywords are interned so that equality is a pointer
//! comparison. Interned strings are never freed: the table only grows,
//! which is fine for the bounded set of names a program uses.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock};

static STRINGS: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();

/// Return the canonical `Arc<str>` for `s`.
pub(crate) fn intern(s: &str) -> Arc<str> {
    let table = STRINGS.get_or_init(|| Mutex::new(HashSet::new()));
    // A poisoned table still holds valid strings.
    let mut table = table.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(existing) = table.get(s) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(s);
    table.insert(Arc::clone(&interned));
    interned
}
