// sprig-parser - Value hashing for the persistent map
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! 32-bit hashes consistent with [`SprigVal`] equality.
//!
//! Lists and vectors hash alike because they compare equal by content.
//! Identity values (atoms, functions, host objects) hash their address.

use crate::hamt::TrieKey;
use crate::printer::format_number;
use crate::value::SprigVal;

const KEYWORD_SALT: u32 = 0x9e37_79b9;
const TRUE_HASH: u32 = 1231;
const FALSE_HASH: u32 = 1237;

/// Multiplicative string hash over UTF-16 code units.
#[must_use]
pub fn string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(u32::from(c)))
}

/// Integral numbers in the safe-integer range hash to their low 32 bits;
/// everything else hashes its printed form. `-0.0` and `0.0` both hash to 0.
#[must_use]
pub fn number_hash(n: f64) -> u32 {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        (n as i64) as u32
    } else {
        string_hash(&format_number(n))
    }
}

fn seq_hash<'a>(items: impl Iterator<Item = &'a SprigVal>) -> u32 {
    items.fold(1u32, |h, item| h.wrapping_mul(31).wrapping_add(item.trie_hash()))
}

impl TrieKey for SprigVal {
    fn trie_hash(&self) -> u32 {
        match self {
            SprigVal::Nil => 0,
            SprigVal::Bool(true) => TRUE_HASH,
            SprigVal::Bool(false) => FALSE_HASH,
            SprigVal::Number(n) => number_hash(*n),
            SprigVal::String(s) => string_hash(s),
            SprigVal::Symbol(sym, _) => string_hash(sym.name()),
            SprigVal::Keyword(kw) => string_hash(kw.name()).wrapping_add(KEYWORD_SALT),
            SprigVal::List(items, _) | SprigVal::Vector(items, _) => seq_hash(items.iter()),
            SprigVal::Map(map, _) => map
                .iter()
                .fold(0, |h, (k, v)| h ^ (k.trie_hash() ^ v.trie_hash())),
            SprigVal::MapForm(..) => self.to_data().trie_hash(),
            SprigVal::Atom(a) => a.addr() as u32,
            SprigVal::HostObject(o) => o.addr() as u32,
            SprigVal::Fn(f) | SprigVal::Macro(f) => std::rc::Rc::as_ptr(&f.body) as usize as u32,
            SprigVal::NativeFn(f) => std::rc::Rc::as_ptr(&f.func) as *const () as usize as u32,
        }
    }
}
