// sprig-core - Map built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Map operations: hash-map, get, assoc, dissoc, keys, vals, contains?
//!
//! Every update returns a new map; the argument is never changed. `nil`
//! is accepted wherever a map is expected and behaves as the empty map.

use sprig_parser::{SprigMap, SprigVal, map_lookup};

use crate::error::{Error, Result};

use super::expect_arity;

fn expect_map(name: &str, val: &SprigVal) -> Result<SprigMap> {
    match val {
        SprigVal::Map(map, _) => Ok(map.clone()),
        SprigVal::Nil => Ok(SprigMap::new()),
        other => Err(Error::type_error(name, "map", other)),
    }
}

/// Vector index for `get`/`contains?`, if `key` is a whole number in range.
fn vector_index(len: usize, key: &SprigVal) -> Option<usize> {
    match key {
        SprigVal::Number(n) if *n >= 0.0 && n.fract() == 0.0 && (*n as usize) < len => {
            Some(*n as usize)
        }
        _ => None,
    }
}

fn assoc_pairs(name: &str, mut map: SprigMap, kvs: &[SprigVal]) -> Result<SprigMap> {
    if kvs.len() % 2 != 0 {
        return Err(Error::invalid_param(format!(
            "{} expects an even number of key/value arguments",
            name
        )));
    }
    for pair in kvs.chunks(2) {
        map = map.assoc(pair[0].clone(), pair[1].clone());
    }
    Ok(map)
}

/// (hash-map & kvs)
pub(crate) fn builtin_hash_map(args: &[SprigVal]) -> Result<SprigVal> {
    let map = assoc_pairs("hash-map", SprigMap::new(), args)?;
    Ok(SprigVal::Map(map, None))
}

/// (get coll key not-found?)
pub(crate) fn builtin_get(args: &[SprigVal]) -> Result<SprigVal> {
    if args.len() != 2 && args.len() != 3 {
        return Err(Error::arity("get", "2 or 3", args.len()));
    }
    let found = match &args[0] {
        SprigVal::Map(map, _) => map_lookup(map, &args[1]).cloned(),
        SprigVal::Vector(items, _) => {
            vector_index(items.len(), &args[1]).and_then(|i| items.get(i).cloned())
        }
        _ => None,
    };
    Ok(found
        .or_else(|| args.get(2).cloned())
        .unwrap_or(SprigVal::Nil))
}

/// (assoc map k v & kvs)
pub(crate) fn builtin_assoc(args: &[SprigVal]) -> Result<SprigVal> {
    if args.len() < 3 {
        return Err(Error::arity("assoc", "at least 3", args.len()));
    }
    let map = assoc_pairs("assoc", expect_map("assoc", &args[0])?, &args[1..])?;
    Ok(SprigVal::Map(map, None))
}

/// (dissoc map & ks)
pub(crate) fn builtin_dissoc(args: &[SprigVal]) -> Result<SprigVal> {
    let Some((map, keys)) = args.split_first() else {
        return Err(Error::arity("dissoc", "at least 1", 0));
    };
    let mut map = expect_map("dissoc", map)?;
    for key in keys {
        map = map.without(key);
    }
    Ok(SprigVal::Map(map, None))
}

/// (keys map) - a vector in unspecified order
pub(crate) fn builtin_keys(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("keys", args, 1)?;
    let map = expect_map("keys", &args[0])?;
    Ok(SprigVal::vector(map.keys().cloned()))
}

/// (vals map) - a vector in the same order as `keys`
pub(crate) fn builtin_vals(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("vals", args, 1)?;
    let map = expect_map("vals", &args[0])?;
    Ok(SprigVal::vector(map.values().cloned()))
}

/// (contains? coll key) - for vectors, whether key is a valid index
pub(crate) fn builtin_contains_p(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("contains?", args, 2)?;
    let found = match &args[0] {
        SprigVal::Map(map, _) => map_lookup(map, &args[1]).is_some(),
        SprigVal::Vector(items, _) => vector_index(items.len(), &args[1]).is_some(),
        SprigVal::Nil => false,
        other => return Err(Error::type_error("contains?", "map or vector", other)),
    };
    Ok(SprigVal::Bool(found))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(name: &str) -> SprigVal {
        SprigVal::keyword(name)
    }

    fn n(x: f64) -> SprigVal {
        SprigVal::Number(x)
    }

    #[test]
    fn test_hash_map_and_get() {
        let m = builtin_hash_map(&[kw("a"), n(1.0), kw("b"), n(2.0)]).unwrap();
        assert_eq!(builtin_get(&[m.clone(), kw("b")]).unwrap(), n(2.0));
        assert_eq!(builtin_get(&[m.clone(), kw("z")]).unwrap(), SprigVal::Nil);
        assert_eq!(builtin_get(&[m, kw("z"), n(0.0)]).unwrap(), n(0.0));
        assert!(builtin_hash_map(&[kw("a")]).is_err());
    }

    #[test]
    fn test_get_on_vector_and_nil() {
        let v = SprigVal::vector([n(10.0), n(20.0)]);
        assert_eq!(builtin_get(&[v.clone(), n(1.0)]).unwrap(), n(20.0));
        assert_eq!(builtin_get(&[v, n(2.0)]).unwrap(), SprigVal::Nil);
        assert_eq!(builtin_get(&[SprigVal::Nil, kw("a")]).unwrap(), SprigVal::Nil);
    }

    #[test]
    fn test_assoc_is_persistent() {
        let m1 = builtin_hash_map(&[kw("a"), n(1.0)]).unwrap();
        let m2 = builtin_assoc(&[m1.clone(), kw("b"), n(2.0)]).unwrap();
        assert_eq!(map_len(&m1), 1);
        assert_eq!(map_len(&m2), 2);
        assert_eq!(builtin_get(&[m1, kw("b")]).unwrap(), SprigVal::Nil);
    }

    #[test]
    fn test_assoc_onto_nil() {
        let m = builtin_assoc(&[SprigVal::Nil, kw("a"), n(1.0)]).unwrap();
        assert_eq!(builtin_get(&[m, kw("a")]).unwrap(), n(1.0));
    }

    #[test]
    fn test_dissoc() {
        let m1 = builtin_hash_map(&[kw("a"), n(1.0), kw("b"), n(2.0)]).unwrap();
        let m2 = builtin_dissoc(&[m1.clone(), kw("a"), kw("zz")]).unwrap();
        assert_eq!(map_len(&m2), 1);
        assert_eq!(map_len(&m1), 2);
    }

    #[test]
    fn test_keys_and_vals_line_up() {
        let m = builtin_hash_map(&[kw("a"), n(1.0), kw("b"), n(2.0)]).unwrap();
        let keys = builtin_keys(&[m.clone()]).unwrap();
        let vals = builtin_vals(&[m.clone()]).unwrap();
        let (Some(keys), Some(vals)) = (keys.as_seq(), vals.as_seq()) else {
            panic!("expected vectors");
        };
        assert_eq!(keys.len(), 2);
        for (k, v) in keys.iter().zip(vals.iter()) {
            assert_eq!(&builtin_get(&[m.clone(), k.clone()]).unwrap(), v);
        }
    }

    #[test]
    fn test_contains() {
        let m = builtin_hash_map(&[kw("a"), SprigVal::Nil]).unwrap();
        assert_eq!(builtin_contains_p(&[m.clone(), kw("a")]).unwrap(), SprigVal::Bool(true));
        assert_eq!(builtin_contains_p(&[m, kw("b")]).unwrap(), SprigVal::Bool(false));
        let v = SprigVal::vector([n(1.0)]);
        assert_eq!(builtin_contains_p(&[v, n(0.0)]).unwrap(), SprigVal::Bool(true));
    }

    fn map_len(val: &SprigVal) -> usize {
        match val {
            SprigVal::Map(map, _) => map.len(),
            _ => panic!("expected a map"),
        }
    }
}
