// sprig-parser - Persistent hash array mapped trie
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! An immutable map backed by a hash array mapped trie (HAMT).
//!
//! The 32-bit key hash is consumed five bits per level, giving 32-way
//! branching. Every update rebuilds only the nodes on the path to the
//! changed entry; all other subtries are shared with the previous version
//! through `Rc`.
//!
//! There are three node shapes:
//!
//! - a **value** node holding one entry,
//! - a **collision** node holding several entries whose hashes are equal,
//! - a **bitmap** node whose bitmap records which of the 32 slots are in
//!   use, with a compact child array indexed by the popcount of the bits
//!   below the slot.
//!
//! ```
//! use sprig_parser::hamt::{PersistentMap, TrieKey};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Id(u32);
//!
//! impl TrieKey for Id {
//!     fn trie_hash(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let empty = PersistentMap::new();
//! let one = empty.assoc(Id(1), "one");
//! assert_eq!(one.get(&Id(1)), Some(&"one"));
//! assert!(empty.get(&Id(1)).is_none());
//! ```

use std::fmt;
use std::rc::Rc;

const BITS: u32 = 5;
const MASK: u32 = 0x1f;

/// Keys stored in a [`PersistentMap`].
///
/// Implementations must keep `trie_hash` consistent with `PartialEq`:
/// equal keys have equal hashes.
pub trait TrieKey: PartialEq {
    fn trie_hash(&self) -> u32;
}

#[inline]
fn mask(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & MASK
}

#[inline]
fn bitpos(hash: u32, shift: u32) -> u32 {
    1 << mask(hash, shift)
}

#[inline]
fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

enum Node<K, V> {
    Value { hash: u32, key: K, value: V },
    Collision { hash: u32, entries: Vec<(K, V)> },
    Bitmap { bitmap: u32, children: Vec<Rc<Node<K, V>>> },
}

/// Outcome of removing a key from a subtrie.
enum Removed<K, V> {
    /// The key was not present; the subtrie is unchanged.
    Absent,
    /// The subtrie became empty.
    Emptied,
    Replaced(Rc<Node<K, V>>),
}

impl<K: TrieKey + Clone, V: Clone> Node<K, V> {
    fn leaf(hash: u32, key: K, value: V) -> Rc<Self> {
        Rc::new(Node::Value { hash, key, value })
    }

    /// Hash shared by every entry of a leaf. Bitmap nodes have none.
    fn leaf_hash(&self) -> Option<u32> {
        match self {
            Node::Value { hash, .. } | Node::Collision { hash, .. } => Some(*hash),
            Node::Bitmap { .. } => None,
        }
    }

    /// Insert or replace. The flag is true when the map gained an entry.
    fn assoc(self: &Rc<Self>, shift: u32, hash: u32, key: K, value: V) -> (Rc<Self>, bool) {
        match &**self {
            Node::Value {
                hash: h,
                key: k,
                value: v,
            } => {
                if *h != hash {
                    let merged = merge_two(shift, Rc::clone(self), *h, Node::leaf(hash, key, value), hash);
                    (merged, true)
                } else if *k == key {
                    (Node::leaf(hash, key, value), false)
                } else {
                    let entries = vec![(k.clone(), v.clone()), (key, value)];
                    (Rc::new(Node::Collision { hash, entries }), true)
                }
            }
            Node::Collision { hash: h, entries } => {
                if *h != hash {
                    let merged = merge_two(shift, Rc::clone(self), *h, Node::leaf(hash, key, value), hash);
                    return (merged, true);
                }
                let mut entries = entries.clone();
                let added = match entries.iter().position(|(k, _)| *k == key) {
                    Some(pos) => {
                        entries[pos] = (key, value);
                        false
                    }
                    None => {
                        entries.push((key, value));
                        true
                    }
                };
                (Rc::new(Node::Collision { hash, entries }), added)
            }
            Node::Bitmap { bitmap, children } => {
                let bit = bitpos(hash, shift);
                let idx = index(*bitmap, bit);
                let mut children = children.clone();
                if bitmap & bit != 0 {
                    let (child, added) = children[idx].assoc(shift + BITS, hash, key, value);
                    children[idx] = child;
                    let node = Node::Bitmap {
                        bitmap: *bitmap,
                        children,
                    };
                    (Rc::new(node), added)
                } else {
                    children.insert(idx, Node::leaf(hash, key, value));
                    let node = Node::Bitmap {
                        bitmap: bitmap | bit,
                        children,
                    };
                    (Rc::new(node), true)
                }
            }
        }
    }

    fn get(&self, shift: u32, hash: u32, key: &K) -> Option<&V> {
        match self {
            Node::Value {
                hash: h,
                key: k,
                value,
            } => (*h == hash && k == key).then_some(value),
            Node::Collision { hash: h, entries } => {
                if *h != hash {
                    return None;
                }
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            Node::Bitmap { bitmap, children } => {
                let bit = bitpos(hash, shift);
                if bitmap & bit == 0 {
                    return None;
                }
                children[index(*bitmap, bit)].get(shift + BITS, hash, key)
            }
        }
    }

    fn without(&self, shift: u32, hash: u32, key: &K) -> Removed<K, V> {
        match self {
            Node::Value { hash: h, key: k, .. } => {
                if *h == hash && k == key {
                    Removed::Emptied
                } else {
                    Removed::Absent
                }
            }
            Node::Collision { hash: h, entries } => {
                if *h != hash {
                    return Removed::Absent;
                }
                let Some(pos) = entries.iter().position(|(k, _)| k == key) else {
                    return Removed::Absent;
                };
                if entries.len() == 2 {
                    let (k, v) = entries[1 - pos].clone();
                    return Removed::Replaced(Node::leaf(hash, k, v));
                }
                let mut entries = entries.clone();
                entries.remove(pos);
                Removed::Replaced(Rc::new(Node::Collision { hash, entries }))
            }
            Node::Bitmap { bitmap, children } => {
                let bit = bitpos(hash, shift);
                if bitmap & bit == 0 {
                    return Removed::Absent;
                }
                let idx = index(*bitmap, bit);
                match children[idx].without(shift + BITS, hash, key) {
                    Removed::Absent => Removed::Absent,
                    Removed::Emptied if children.len() == 1 => Removed::Emptied,
                    Removed::Emptied => {
                        let mut children = children.clone();
                        children.remove(idx);
                        Removed::Replaced(Rc::new(Node::Bitmap {
                            bitmap: bitmap & !bit,
                            children,
                        }))
                    }
                    Removed::Replaced(child) => {
                        let mut children = children.clone();
                        children[idx] = child;
                        Removed::Replaced(Rc::new(Node::Bitmap {
                            bitmap: *bitmap,
                            children,
                        }))
                    }
                }
            }
        }
    }
}

/// Build the smallest subtrie holding two leaves with different hashes.
/// Recurses while both hashes select the same slot at `shift`.
fn merge_two<K: TrieKey + Clone, V: Clone>(
    shift: u32,
    a: Rc<Node<K, V>>,
    a_hash: u32,
    b: Rc<Node<K, V>>,
    b_hash: u32,
) -> Rc<Node<K, V>> {
    debug_assert_ne!(a_hash, b_hash);
    let a_bit = bitpos(a_hash, shift);
    let b_bit = bitpos(b_hash, shift);
    if a_bit == b_bit {
        let child = merge_two(shift + BITS, a, a_hash, b, b_hash);
        return Rc::new(Node::Bitmap {
            bitmap: a_bit,
            children: vec![child],
        });
    }
    let children = if a_bit < b_bit { vec![a, b] } else { vec![b, a] };
    Rc::new(Node::Bitmap {
        bitmap: a_bit | b_bit,
        children,
    })
}

// ============================================================================
// PersistentMap
// ============================================================================

/// An immutable hash map with structural sharing.
///
/// `assoc` and `without` return new maps and leave `self` untouched.
/// Iteration order follows the trie layout and should not be relied on.
pub struct PersistentMap<K, V> {
    root: Option<Rc<Node<K, V>>>,
    len: usize,
}

impl<K, V> Clone for PersistentMap<K, V> {
    fn clone(&self) -> Self {
        PersistentMap {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K, V> Default for PersistentMap<K, V> {
    fn default() -> Self {
        PersistentMap { root: None, len: 0 }
    }
}

impl<K: TrieKey + Clone, V: Clone> PersistentMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return a map with `key` bound to `value`.
    #[must_use]
    pub fn assoc(&self, key: K, value: V) -> Self {
        let hash = key.trie_hash();
        match &self.root {
            None => PersistentMap {
                root: Some(Node::leaf(hash, key, value)),
                len: 1,
            },
            Some(root) => {
                let (root, added) = root.assoc(0, hash, key, value);
                PersistentMap {
                    root: Some(root),
                    len: if added { self.len + 1 } else { self.len },
                }
            }
        }
    }

    /// Return a map without `key`. Removing a missing key returns a map
    /// sharing the same root.
    #[must_use]
    pub fn without(&self, key: &K) -> Self {
        let Some(root) = &self.root else {
            return self.clone();
        };
        match root.without(0, key.trie_hash(), key) {
            Removed::Absent => self.clone(),
            Removed::Emptied => PersistentMap::new(),
            Removed::Replaced(root) => PersistentMap {
                root: Some(root),
                len: self.len - 1,
            },
        }
    }

    /// Look up `key`. `None` means absent, which is distinct from a stored
    /// value that happens to represent nothing.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.root.as_ref()?.get(0, key.trie_hash(), key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            stack: self.root.iter().map(|r| &**r).collect(),
            entries: Default::default(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Depth of the deepest leaf, counting the root as 1. Used to check
    /// that colliding prefixes split into nested bitmap nodes.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn walk<K, V>(node: &Node<K, V>) -> usize {
            match node {
                Node::Bitmap { children, .. } => {
                    1 + children.iter().map(|c| walk(c)).max().unwrap_or(0)
                }
                _ => 1,
            }
        }
        self.root.as_ref().map_or(0, |r| walk(r))
    }

    /// True when both maps share the same root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// True when the entry for `key` lives in a collision node.
    #[must_use]
    pub fn is_collision(&self, key: &K) -> bool {
        let hash = key.trie_hash();
        let mut shift = 0;
        let mut node = match &self.root {
            Some(root) => &**root,
            None => return false,
        };
        loop {
            match node {
                Node::Bitmap { bitmap, children } => {
                    let bit = bitpos(hash, shift);
                    if bitmap & bit == 0 {
                        return false;
                    }
                    node = &children[index(*bitmap, bit)];
                    shift += BITS;
                }
                other => {
                    return matches!(other, Node::Collision { .. }) && other.leaf_hash() == Some(hash);
                }
            }
        }
    }
}

/// Iterator over the entries of a [`PersistentMap`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    entries: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.entries.next() {
                return Some((k, v));
            }
            match self.stack.pop()? {
                Node::Value { key, value, .. } => return Some((key, value)),
                Node::Collision { entries, .. } => self.entries = entries.iter(),
                Node::Bitmap { children, .. } => {
                    self.stack.extend(children.iter().rev().map(|c| &**c));
                }
            }
        }
    }
}

impl<'a, K: TrieKey + Clone, V: Clone> IntoIterator for &'a PersistentMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: TrieKey + Clone, V: Clone> FromIterator<(K, V)> for PersistentMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PersistentMap::new(), |map, (k, v)| map.assoc(k, v))
    }
}

impl<K: TrieKey + Clone, V: Clone + PartialEq> PartialEq for PersistentMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: TrieKey + Clone + fmt::Debug, V: Clone + fmt::Debug> fmt::Debug for PersistentMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
