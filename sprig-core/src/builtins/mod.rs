// sprig-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The base binding set seeded into every root environment.

mod arithmetic;
mod atoms;
mod collections;
mod comparison;
mod higher_order;
mod io;
mod logic;
mod sequences;
mod type_checks;

use sprig_parser::{SprigVal, Symbol, Vector};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mod, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_atom_p, builtin_deref, builtin_reset, builtin_swap};
use collections::{
    builtin_assoc, builtin_contains_p, builtin_dissoc, builtin_get, builtin_hash_map,
    builtin_keys, builtin_vals,
};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt, builtin_not_eq};
use higher_order::{builtin_apply, builtin_identity, builtin_map};
use io::{builtin_pr_str, builtin_print, builtin_println, builtin_str};
use logic::builtin_not;
use sequences::{
    builtin_conj, builtin_cons, builtin_count, builtin_empty_p, builtin_first, builtin_list,
    builtin_nth, builtin_rest, builtin_vector,
};
use type_checks::builtin_type;

/// Register all built-in functions in the given environment.
pub fn register_builtins(env: &Env) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);
    env.define_native("%", builtin_mod);

    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("not=", builtin_not_eq);
    env.define_native("<", builtin_lt);
    env.define_native(">", builtin_gt);
    env.define_native("<=", builtin_le);
    env.define_native(">=", builtin_ge);
    env.define_native("not", builtin_not);

    // Strings and output
    env.define_native("str", builtin_str);
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("print", builtin_print);
    env.define_native("println", builtin_println);

    // Sequences
    env.define_native("list", builtin_list);
    env.define_native("vector", builtin_vector);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("count", builtin_count);
    env.define_native("empty?", builtin_empty_p);
    env.define_native("cons", builtin_cons);
    env.define_native("nth", builtin_nth);
    env.define_native("conj", builtin_conj);
    env.define_native("map", builtin_map);

    // Maps
    env.define_native("hash-map", builtin_hash_map);
    env.define_native("get", builtin_get);
    env.define_native("assoc", builtin_assoc);
    env.define_native("dissoc", builtin_dissoc);
    env.define_native("keys", builtin_keys);
    env.define_native("vals", builtin_vals);
    env.define_native("contains?", builtin_contains_p);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("atom?", builtin_atom_p);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // Functions
    env.define_native("apply", builtin_apply);
    env.define_native("identity", builtin_identity);
    env.define_native("type", builtin_type);
}

/// Helper trait to define native functions more easily.
pub trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[SprigVal]) -> Result<SprigVal>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[SprigVal]) -> Result<SprigVal>) {
        self.set(Symbol::new(name), make_native_fn(name, func));
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

pub(crate) fn expect_arity(name: &str, args: &[SprigVal], n: usize) -> Result<()> {
    if args.len() != n {
        return Err(Error::arity(name, n, args.len()));
    }
    Ok(())
}

pub(crate) fn expect_number(name: &str, val: &SprigVal) -> Result<f64> {
    match val {
        SprigVal::Number(n) => Ok(*n),
        other => Err(Error::type_error(name, "number", other)),
    }
}

/// The items of a list or vector. `nil` is the empty sequence.
pub(crate) fn seq_items(name: &str, val: &SprigVal) -> Result<Vector<SprigVal>> {
    match val {
        SprigVal::List(items, _) | SprigVal::Vector(items, _) => Ok(items.clone()),
        SprigVal::Nil => Ok(Vector::new()),
        other => Err(Error::type_error(name, "sequence", other)),
    }
}
