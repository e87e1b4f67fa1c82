// sprig-parser - Core value types for Sprig
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime values and parsed forms share one type, [`SprigVal`].
//!
//! Collections are persistent: vectors and lists use `im::Vector`, maps use
//! the crate's own [`PersistentMap`]. Forms produced by the parser carry
//! their source location; locations never take part in equality or hashing.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::hamt::PersistentMap;
use crate::keyword::Keyword;
use crate::location::{SourceLocation, Span};
use crate::printer;
use crate::symbol::Symbol;

/// Maps from values to values.
pub type SprigMap = PersistentMap<SprigVal, SprigVal>;

/// A Sprig value.
#[derive(Clone)]
pub enum SprigVal {
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Symbol(Symbol, Span),
    Keyword(Keyword),
    List(Vector<SprigVal>, Span),
    Vector(Vector<SprigVal>, Span),
    Map(SprigMap, Span),
    /// A map literal as read: key and value forms in source order.
    /// Evaluation or [`SprigVal::to_data`] turns it into a `Map`.
    MapForm(Vector<(SprigVal, SprigVal)>, Span),
    Atom(SprigAtom),
    Fn(SprigFn),
    Macro(SprigFn),
    NativeFn(SprigNativeFn),
    HostObject(HostObject),
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl SprigVal {
    pub fn nil() -> Self {
        SprigVal::Nil
    }

    pub fn bool(b: bool) -> Self {
        SprigVal::Bool(b)
    }

    pub fn number(n: impl Into<f64>) -> Self {
        SprigVal::Number(n.into())
    }

    pub fn string(s: impl AsRef<str>) -> Self {
        SprigVal::String(Rc::from(s.as_ref()))
    }

    pub fn symbol(name: &str) -> Self {
        SprigVal::Symbol(Symbol::new(name), None)
    }

    pub fn keyword(name: &str) -> Self {
        SprigVal::Keyword(Keyword::new(name))
    }

    pub fn list(items: impl IntoIterator<Item = SprigVal>) -> Self {
        SprigVal::List(items.into_iter().collect(), None)
    }

    pub fn vector(items: impl IntoIterator<Item = SprigVal>) -> Self {
        SprigVal::Vector(items.into_iter().collect(), None)
    }

    pub fn map(pairs: impl IntoIterator<Item = (SprigVal, SprigVal)>) -> Self {
        SprigVal::Map(pairs.into_iter().collect(), None)
    }

    pub fn atom(value: SprigVal) -> Self {
        SprigVal::Atom(SprigAtom::new(value))
    }

    /// Everything except `false` and `nil` is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, SprigVal::Nil | SprigVal::Bool(false))
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, SprigVal::Nil)
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            SprigVal::Nil => "nil",
            SprigVal::Bool(_) => "boolean",
            SprigVal::Number(_) => "number",
            SprigVal::String(_) => "string",
            SprigVal::Symbol(..) => "symbol",
            SprigVal::Keyword(_) => "keyword",
            SprigVal::List(..) => "list",
            SprigVal::Vector(..) => "vector",
            SprigVal::Map(..) | SprigVal::MapForm(..) => "map",
            SprigVal::Atom(_) => "atom",
            SprigVal::Fn(_) => "fn",
            SprigVal::Macro(_) => "macro",
            SprigVal::NativeFn(_) => "native-fn",
            SprigVal::HostObject(_) => "host-object",
        }
    }

    /// Source location of a located form.
    #[must_use]
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            SprigVal::Symbol(_, span)
            | SprigVal::List(_, span)
            | SprigVal::Vector(_, span)
            | SprigVal::Map(_, span)
            | SprigVal::MapForm(_, span) => span.as_deref(),
            _ => None,
        }
    }

    /// The form as plain data, with every map literal inside it built into
    /// a map. Later duplicate keys win.
    #[must_use]
    pub fn to_data(&self) -> SprigVal {
        match self {
            SprigVal::MapForm(pairs, span) => {
                let map = pairs
                    .iter()
                    .fold(SprigMap::new(), |map, (k, v)| map.assoc(k.to_data(), v.to_data()));
                SprigVal::Map(map, span.clone())
            }
            SprigVal::List(items, span) => {
                SprigVal::List(items.iter().map(SprigVal::to_data).collect(), span.clone())
            }
            SprigVal::Vector(items, span) => {
                SprigVal::Vector(items.iter().map(SprigVal::to_data).collect(), span.clone())
            }
            other => other.clone(),
        }
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            SprigVal::Symbol(s, _) => Some(s),
            _ => None,
        }
    }

    /// Elements of a list or vector.
    #[must_use]
    pub fn as_seq(&self) -> Option<&Vector<SprigVal>> {
        match self {
            SprigVal::List(items, _) | SprigVal::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    /// True for a list whose head is the symbol `name`.
    #[must_use]
    pub fn is_form(&self, name: &str) -> bool {
        match self {
            SprigVal::List(items, _) => {
                matches!(items.front(), Some(SprigVal::Symbol(s, _)) if s.name() == name)
            }
            _ => false,
        }
    }
}

/// Look `key` up in `map`, falling back to a linear equality scan when the
/// hashed lookup misses.
#[must_use]
pub fn map_lookup<'a>(map: &'a SprigMap, key: &SprigVal) -> Option<&'a SprigVal> {
    map.get(key)
        .or_else(|| map.iter().find(|(k, _)| *k == key).map(|(_, v)| v))
}

impl From<f64> for SprigVal {
    fn from(n: f64) -> Self {
        SprigVal::Number(n)
    }
}

impl From<i32> for SprigVal {
    fn from(n: i32) -> Self {
        SprigVal::Number(f64::from(n))
    }
}

impl From<bool> for SprigVal {
    fn from(b: bool) -> Self {
        SprigVal::Bool(b)
    }
}

impl From<&str> for SprigVal {
    fn from(s: &str) -> Self {
        SprigVal::string(s)
    }
}

impl From<String> for SprigVal {
    fn from(s: String) -> Self {
        SprigVal::String(Rc::from(s))
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for SprigVal {
    fn eq(&self, other: &Self) -> bool {
        use SprigVal::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Symbol(a, _), Symbol(b, _)) => a == b,
            (Keyword(a), Keyword(b)) => a == b,
            (List(a, _) | Vector(a, _), List(b, _) | Vector(b, _)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Map(a, _), Map(b, _)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| map_lookup(b, k) == Some(v))
            }
            (Atom(a), Atom(b)) => a == b,
            (Fn(a), Fn(b)) | (Macro(a), Macro(b)) => a == b,
            (NativeFn(a), NativeFn(b)) => a == b,
            (HostObject(a), HostObject(b)) => a == b,
            (MapForm(..), _) | (_, MapForm(..)) => self.to_data() == other.to_data(),
            _ => false,
        }
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable reference cell. Atoms compare by identity.
#[derive(Clone)]
pub struct SprigAtom {
    value: Rc<RefCell<SprigVal>>,
}

impl SprigAtom {
    pub fn new(value: SprigVal) -> Self {
        SprigAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    pub fn deref(&self) -> SprigVal {
        self.value.borrow().clone()
    }

    /// Replace the value, returning the new one.
    pub fn reset(&self, new_val: SprigVal) -> SprigVal {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.value) as *const () as usize
    }
}

impl PartialEq for SprigAtom {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for SprigAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<atom {:?}>", self.value.borrow())
    }
}

// ============================================================================
// Function Types
// ============================================================================

/// A user closure or macro.
///
/// The captured environment lives in `sprig-core`, so it is stored
/// type-erased and downcast by the evaluator.
#[derive(Clone)]
pub struct SprigFn {
    pub name: Option<Symbol>,
    /// Parameter pattern, normally a vector.
    pub params: Rc<SprigVal>,
    pub body: Rc<SprigVal>,
    pub env: Rc<dyn Any>,
}

impl SprigFn {
    pub fn new(params: SprigVal, body: SprigVal, env: Rc<dyn Any>) -> Self {
        SprigFn {
            name: None,
            params: Rc::new(params),
            body: Rc::new(body),
            env,
        }
    }

    #[must_use]
    pub fn named(mut self, name: Symbol) -> Self {
        self.name = Some(name);
        self
    }
}

impl PartialEq for SprigFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl fmt::Debug for SprigFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<fn {}>", printer::render(&self.params, true))
    }
}

/// A function implemented by the host. The callable is type-erased for
/// the same reason as [`SprigFn::env`].
#[derive(Clone)]
pub struct SprigNativeFn {
    pub name: Rc<str>,
    pub func: Rc<dyn Any>,
}

impl SprigNativeFn {
    pub fn new(name: &str, func: Rc<dyn Any>) -> Self {
        SprigNativeFn {
            name: Rc::from(name),
            func,
        }
    }
}

impl PartialEq for SprigNativeFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for SprigNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native {}>", self.name)
    }
}

/// An opaque object owned by the host, such as a string builder.
#[derive(Clone)]
pub struct HostObject {
    pub type_name: Rc<str>,
    pub state: Rc<dyn Any>,
}

impl HostObject {
    pub fn new(type_name: &str, state: Rc<dyn Any>) -> Self {
        HostObject {
            type_name: Rc::from(type_name),
            state,
        }
    }

    /// Borrow the state as a concrete type.
    pub fn downcast<T: 'static>(&self) -> Option<&T> {
        self.state.downcast_ref::<T>()
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.state) as *const () as usize
    }
}

impl PartialEq for HostObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

// ============================================================================
// Formatting
// ============================================================================

impl fmt::Display for SprigVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printer::render(self, true))
    }
}

impl fmt::Debug for SprigVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printer::render(self, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Position;

    #[test]
    fn test_truthiness() {
        assert!(!SprigVal::Nil.is_truthy());
        assert!(!SprigVal::Bool(false).is_truthy());
        assert!(SprigVal::Bool(true).is_truthy());
        assert!(SprigVal::number(0).is_truthy());
        assert!(SprigVal::string("").is_truthy());
        assert!(SprigVal::vector(Vec::new()).is_truthy());
    }

    #[test]
    fn test_location_ignored_by_equality() {
        let loc = Rc::new(SourceLocation::new(
            "a".into(),
            Position::new(1, 1, 0),
            Position::new(1, 4, 3),
        ));
        let located = SprigVal::Symbol(Symbol::new("foo"), Some(loc));
        assert_eq!(located, SprigVal::symbol("foo"));
    }

    #[test]
    fn test_list_equals_vector() {
        let list = SprigVal::list([SprigVal::number(1), SprigVal::number(2)]);
        let vector = SprigVal::vector([SprigVal::number(1), SprigVal::number(2)]);
        assert_eq!(list, vector);
        assert_ne!(list, SprigVal::vector([SprigVal::number(1)]));
    }

    #[test]
    fn test_map_equality_by_content() {
        let a = SprigVal::map([(SprigVal::keyword("a"), SprigVal::number(1)), (SprigVal::keyword("b"), SprigVal::number(2))]);
        let b = SprigVal::map([(SprigVal::keyword("b"), SprigVal::number(2)), (SprigVal::keyword("a"), SprigVal::number(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_form_to_data() {
        let form = SprigVal::MapForm(
            Vector::from(vec![
                (SprigVal::keyword("a"), SprigVal::number(1)),
                (SprigVal::keyword("b"), SprigVal::vector([SprigVal::number(2)])),
                (SprigVal::keyword("a"), SprigVal::number(3)),
            ]),
            None,
        );
        let SprigVal::Map(map, _) = form.to_data() else {
            panic!("expected a map");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&SprigVal::keyword("a")), Some(&SprigVal::number(3)));
        assert_eq!(
            form,
            SprigVal::map([
                (SprigVal::keyword("b"), SprigVal::vector([SprigVal::number(2)])),
                (SprigVal::keyword("a"), SprigVal::number(3)),
            ])
        );
    }

    #[test]
    fn test_atom_identity() {
        let a = SprigAtom::new(1.into());
        let b = SprigAtom::new(1.into());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        a.reset(5.into());
        assert_eq!(a.deref(), SprigVal::number(5));
    }

    #[test]
    fn test_is_form() {
        let form = SprigVal::list([SprigVal::symbol("quote"), SprigVal::symbol("x")]);
        assert!(form.is_form("quote"));
        assert!(!form.is_form("deref"));
        assert!(!SprigVal::vector([SprigVal::symbol("quote")]).is_form("quote"));
    }
}
