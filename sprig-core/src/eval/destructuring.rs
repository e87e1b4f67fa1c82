// sprig-core - Destructuring support
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Destructuring patterns for let bindings, function parameters and
//! macro parameters.
//!
//! - Symbols bind directly, `_` included.
//! - Vectors bind positionally: `[a b]`, `[a & rest]`, `[a :as all]`.
//!   Missing positions bind to nil; the rest is always a vector. `&` takes
//!   exactly one pattern and only `:as sym` may follow it.
//! - Maps bind by key: `{:keys [a b]}`, `{:strs [a]}`, `{:syms [a]}`,
//!   `{x :x}`, `{:as m}`, `{:or {a 1}}`. `:or` defaults are evaluated only
//!   for keys that are missing.
//!
//! `nil` destructures as an empty sequence or an empty map.

use sprig_parser::{Keyword, SprigMap, SprigVal, Symbol, Vector, map_lookup};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::eval;

/// Bind `pattern` against `value` in the frame `env`.
pub fn bind(pattern: &SprigVal, value: &SprigVal, env: &Env) -> Result<()> {
    match pattern {
        SprigVal::Symbol(sym, _) => {
            env.set(sym.clone(), value.clone());
            Ok(())
        }
        SprigVal::Vector(patterns, _) => bind_sequential(patterns, value, env),
        SprigVal::Map(pattern, _) => bind_associative(pattern, value, env),
        SprigVal::MapForm(..) => bind(&pattern.to_data(), value, env),
        other => Err(invalid_pattern(other)),
    }
}

fn invalid_pattern(pattern: &SprigVal) -> Error {
    Error::syntax(
        "destructure",
        format!(
            "binding pattern must be a symbol, vector or map, got {}",
            pattern.type_name()
        ),
    )
}

fn is_keyword(value: &SprigVal, name: &str) -> bool {
    matches!(value, SprigVal::Keyword(kw) if kw.name() == name)
}

fn is_rest_marker(value: &SprigVal) -> bool {
    matches!(value, SprigVal::Symbol(sym, _) if sym.name() == "&")
}

/// `&` at `at` takes exactly one pattern, and only `:as sym` may follow it.
fn check_rest(patterns: &[&SprigVal], at: usize) -> Result<()> {
    if patterns.get(at + 1).is_none() {
        return Err(Error::syntax("destructure", "& must be followed by a binding pattern"));
    }
    match &patterns[at + 2..] {
        [] => Ok(()),
        [marker, SprigVal::Symbol(..)] if is_keyword(marker, "as") => Ok(()),
        _ => Err(Error::syntax(
            "destructure",
            "only :as may follow the rest binding",
        )),
    }
}

fn bind_sequential(patterns: &Vector<SprigVal>, value: &SprigVal, env: &Env) -> Result<()> {
    let items = match value {
        SprigVal::List(items, _) | SprigVal::Vector(items, _) => items.clone(),
        SprigVal::Nil => Vector::new(),
        other => {
            return Err(Error::invalid_param(format!(
                "Cannot destructure {} as a sequence",
                other.type_name()
            )));
        }
    };

    let patterns: Vec<&SprigVal> = patterns.iter().collect();
    let mut i = 0;
    let mut position = 0;
    while i < patterns.len() {
        let pattern = patterns[i];
        if is_rest_marker(pattern) {
            check_rest(&patterns, i)?;
            let rest = items.clone().slice(position.min(items.len())..);
            bind(patterns[i + 1], &SprigVal::Vector(rest, None), env)?;
            position = items.len();
            i += 2;
        } else if is_keyword(pattern, "as") {
            let Some(SprigVal::Symbol(sym, _)) = patterns.get(i + 1) else {
                return Err(Error::syntax("destructure", ":as must be followed by a symbol"));
            };
            env.set(sym.clone(), value.clone());
            i += 2;
        } else {
            let item = items.get(position).cloned().unwrap_or(SprigVal::Nil);
            bind(pattern, &item, env)?;
            position += 1;
            i += 1;
        }
    }
    Ok(())
}

fn bind_associative(pattern: &SprigMap, value: &SprigVal, env: &Env) -> Result<()> {
    let empty = SprigMap::new();
    let map = match value {
        SprigVal::Map(map, _) => map,
        SprigVal::Nil => &empty,
        other => {
            return Err(Error::invalid_param(format!(
                "Cannot destructure {} as a map",
                other.type_name()
            )));
        }
    };

    let defaults = match pattern.get(&SprigVal::keyword("or")) {
        Some(SprigVal::Map(defaults, _)) => Some(defaults),
        Some(_) => return Err(Error::syntax("destructure", ":or must be a map")),
        None => None,
    };

    // A missing key binds to its `:or` default, evaluated now, or nil.
    let lookup = |key: &SprigVal, sym: Option<&Symbol>| -> Result<SprigVal> {
        if let Some(found) = map_lookup(map, key) {
            return Ok(found.clone());
        }
        let default = sym.and_then(|sym| {
            defaults.and_then(|d| map_lookup(d, &SprigVal::Symbol(sym.clone(), None)))
        });
        match default {
            Some(expr) => eval(expr, env),
            None => Ok(SprigVal::Nil),
        }
    };

    for (key, target) in pattern.iter() {
        match key {
            SprigVal::Keyword(kw) if matches!(kw.name(), "keys" | "strs" | "syms") => {
                let SprigVal::Vector(names, _) = target else {
                    return Err(Error::syntax(
                        "destructure",
                        format!(":{} must be a vector of symbols", kw.name()),
                    ));
                };
                for name in names.iter() {
                    let Some(sym) = name.as_symbol() else {
                        return Err(Error::syntax(
                            "destructure",
                            format!(":{} must be a vector of symbols", kw.name()),
                        ));
                    };
                    let source = match kw.name() {
                        "keys" => SprigVal::Keyword(Keyword::new(sym.name())),
                        "strs" => SprigVal::string(sym.name()),
                        _ => SprigVal::Symbol(sym.clone(), None),
                    };
                    let bound = lookup(&source, Some(sym))?;
                    env.set(sym.clone(), bound);
                }
            }
            SprigVal::Keyword(kw) if kw.name() == "as" => {
                let Some(sym) = target.as_symbol() else {
                    return Err(Error::syntax("destructure", ":as must be followed by a symbol"));
                };
                env.set(sym.clone(), value.clone());
            }
            SprigVal::Keyword(kw) if kw.name() == "or" => {}
            target_pattern => {
                // `{local-pattern source-key}`
                let bound = lookup(target, target_pattern.as_symbol())?;
                bind(target_pattern, &bound, env)?;
            }
        }
    }
    Ok(())
}

/// Check the shape of a parameter pattern before it is used.
pub fn validate_pattern(pattern: &SprigVal) -> Result<()> {
    match pattern {
        SprigVal::Symbol(..) => Ok(()),
        SprigVal::Vector(items, _) => {
            let items: Vec<&SprigVal> = items.iter().collect();
            let mut i = 0;
            while i < items.len() {
                if is_keyword(items[i], "as") {
                    if !matches!(items.get(i + 1), Some(SprigVal::Symbol(..))) {
                        return Err(Error::syntax("destructure", ":as must be followed by a symbol"));
                    }
                    i += 2;
                } else if is_rest_marker(items[i]) {
                    check_rest(&items, i)?;
                    validate_pattern(items[i + 1])?;
                    i += 2;
                } else {
                    validate_pattern(items[i])?;
                    i += 1;
                }
            }
            Ok(())
        }
        SprigVal::Map(entries, _) => {
            for (key, target) in entries.iter() {
                match key {
                    SprigVal::Keyword(kw) if matches!(kw.name(), "keys" | "strs" | "syms") => {
                        let valid = matches!(target, SprigVal::Vector(names, _)
                            if names.iter().all(|n| n.as_symbol().is_some()));
                        if !valid {
                            return Err(Error::syntax(
                                "destructure",
                                format!(":{} must be a vector of symbols", kw.name()),
                            ));
                        }
                    }
                    SprigVal::Keyword(kw) if kw.name() == "as" => {
                        if target.as_symbol().is_none() {
                            return Err(Error::syntax("destructure", ":as must be followed by a symbol"));
                        }
                    }
                    SprigVal::Keyword(kw) if kw.name() == "or" => {
                        if !matches!(target, SprigVal::Map(..)) {
                            return Err(Error::syntax("destructure", ":or must be a map"));
                        }
                    }
                    local => validate_pattern(local)?,
                }
            }
            Ok(())
        }
        SprigVal::MapForm(..) => validate_pattern(&pattern.to_data()),
        other => Err(invalid_pattern(other)),
    }
}
