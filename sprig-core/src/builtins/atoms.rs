// sprig-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, atom?, deref, reset!, swap!
//!
//! Atoms are the only mutable values. There is one thread, so the last
//! write wins.

use sprig_parser::{SprigAtom, SprigVal};

use crate::error::{Error, Result};
use crate::eval::apply;

use super::expect_arity;

fn expect_atom<'a>(name: &str, val: &'a SprigVal) -> Result<&'a SprigAtom> {
    match val {
        SprigVal::Atom(a) => Ok(a),
        other => Err(Error::type_error(name, "atom", other)),
    }
}

// ============================================================================
// Construction and Predicates
// ============================================================================

/// (atom x) - Create an atom with initial value x
pub(crate) fn builtin_atom(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("atom", args, 1)?;
    Ok(SprigVal::atom(args[0].clone()))
}

/// (atom? x) - Returns true if x is an atom
pub(crate) fn builtin_atom_p(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("atom?", args, 1)?;
    Ok(SprigVal::Bool(matches!(args[0], SprigVal::Atom(_))))
}

// ============================================================================
// Basic Operations
// ============================================================================

/// (deref atom) - also written `@atom`
pub(crate) fn builtin_deref(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("deref", args, 1)?;
    Ok(expect_atom("deref", &args[0])?.deref())
}

/// (reset! atom newval) - Set atom value, returns newval
pub(crate) fn builtin_reset(args: &[SprigVal]) -> Result<SprigVal> {
    expect_arity("reset!", args, 2)?;
    Ok(expect_atom("reset!", &args[0])?.reset(args[1].clone()))
}

/// (swap! atom f & args) - Set atom value to (f current args...), returns it
pub(crate) fn builtin_swap(args: &[SprigVal]) -> Result<SprigVal> {
    if args.len() < 2 {
        return Err(Error::arity("swap!", "at least 2", args.len()));
    }
    let atom = expect_atom("swap!", &args[0])?;
    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(&args[2..]);
    let new_val = apply(&args[1], &call_args)?;
    Ok(atom.reset(new_val))
}
