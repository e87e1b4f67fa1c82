// sprig-core - Host interop collaborator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The host platform as seen from Sprig.
//!
//! The evaluator needs exactly three things from the host: read a global by
//! name (`host/Name`), construct an object (`new`), and invoke a named member
//! (`.` and `.member`). Embedders can supply their own [`Host`]; [`StdHost`]
//! provides a small default platform.

use std::cell::RefCell;
use std::rc::Rc;

use sprig_parser::{HostObject, SprigVal, printer};

use crate::error::{Error, Result};
use crate::eval::make_native_fn;

/// Entry points into the host platform.
pub trait Host {
    /// Read the global `name`.
    fn global(&self, name: &str) -> Result<SprigVal>;

    /// Construct a new object from the constructor value `ctor`.
    fn construct(&self, ctor: &SprigVal, args: &[SprigVal]) -> Result<SprigVal>;

    /// Invoke `member` on `target`.
    fn invoke(&self, target: &SprigVal, member: &str, args: &[SprigVal]) -> Result<SprigVal>;
}

/// Type tag of constructor objects returned by [`StdHost::global`].
const CONSTRUCTOR: &str = "Constructor";
const STRING_BUILDER: &str = "StringBuilder";
const MATH: &str = "Math";

/// The default host: a `Math` namespace, a `StringBuilder` type,
/// `parseFloat`, and a few string members.
#[derive(Debug, Default)]
pub struct StdHost;

impl StdHost {
    pub fn new() -> Self {
        StdHost
    }
}

fn number_arg(member: &str, args: &[SprigVal], i: usize) -> Result<f64> {
    match args.get(i) {
        Some(SprigVal::Number(n)) => Ok(*n),
        Some(other) => Err(Error::type_error(member, "number", other)),
        None => Err(Error::arity(member, i + 1, args.len())),
    }
}

fn string_arg<'a>(member: &str, args: &'a [SprigVal], i: usize) -> Result<&'a str> {
    match args.get(i) {
        Some(SprigVal::String(s)) => Ok(s),
        Some(other) => Err(Error::type_error(member, "string", other)),
        None => Err(Error::arity(member, i + 1, args.len())),
    }
}

fn unary(member: &str, args: &[SprigVal], f: fn(f64) -> f64) -> Result<SprigVal> {
    Ok(SprigVal::Number(f(number_arg(member, args, 0)?)))
}

fn fold_numbers(member: &str, args: &[SprigVal], init: f64, f: fn(f64, f64) -> f64) -> Result<SprigVal> {
    let mut acc = init;
    for i in 0..args.len() {
        acc = f(acc, number_arg(member, args, i)?);
    }
    Ok(SprigVal::Number(acc))
}

impl StdHost {
    fn invoke_math(&self, member: &str, args: &[SprigVal]) -> Result<SprigVal> {
        match member {
            "PI" => Ok(SprigVal::Number(std::f64::consts::PI)),
            "E" => Ok(SprigVal::Number(std::f64::consts::E)),
            "floor" => unary(member, args, f64::floor),
            "ceil" => unary(member, args, f64::ceil),
            // Halves round toward positive infinity.
            "round" => unary(member, args, |n| (n + 0.5).floor()),
            "sqrt" => unary(member, args, f64::sqrt),
            "abs" => unary(member, args, f64::abs),
            "pow" => Ok(SprigVal::Number(
                number_arg(member, args, 0)?.powf(number_arg(member, args, 1)?),
            )),
            "max" => fold_numbers(member, args, f64::NEG_INFINITY, f64::max),
            "min" => fold_numbers(member, args, f64::INFINITY, f64::min),
            _ => Err(Error::host(format!("Math has no member '{}'", member))),
        }
    }

    fn invoke_builder(
        &self,
        target: &SprigVal,
        buf: &RefCell<String>,
        member: &str,
        args: &[SprigVal],
    ) -> Result<SprigVal> {
        match member {
            "append" => {
                for arg in args {
                    buf.borrow_mut().push_str(&printer::display(arg));
                }
                Ok(target.clone())
            }
            "toString" => Ok(SprigVal::string(buf.borrow().as_str())),
            "length" => Ok(SprigVal::from(buf.borrow().chars().count() as f64)),
            _ => Err(Error::host(format!("StringBuilder has no member '{}'", member))),
        }
    }

    fn invoke_string(&self, s: &str, member: &str, args: &[SprigVal]) -> Result<SprigVal> {
        match member {
            "toUpperCase" => Ok(SprigVal::string(s.to_uppercase())),
            "toLowerCase" => Ok(SprigVal::string(s.to_lowercase())),
            "trim" => Ok(SprigVal::string(s.trim())),
            "length" => Ok(SprigVal::from(s.chars().count() as f64)),
            "includes" => Ok(SprigVal::Bool(s.contains(string_arg(member, args, 0)?))),
            "startsWith" => Ok(SprigVal::Bool(s.starts_with(string_arg(member, args, 0)?))),
            _ => Err(Error::host(format!("string has no member '{}'", member))),
        }
    }
}

impl Host for StdHost {
    fn global(&self, name: &str) -> Result<SprigVal> {
        match name {
            MATH => Ok(SprigVal::HostObject(HostObject::new(MATH, Rc::new(())))),
            STRING_BUILDER => Ok(SprigVal::HostObject(HostObject::new(
                CONSTRUCTOR,
                Rc::new(STRING_BUILDER),
            ))),
            "parseFloat" => Ok(make_native_fn("parseFloat", |args| {
                let s = string_arg("parseFloat", args, 0)?;
                Ok(s.trim()
                    .parse::<f64>()
                    .map(SprigVal::Number)
                    .unwrap_or(SprigVal::Number(f64::NAN)))
            })),
            _ => Err(Error::reference(format!("host/{}", name))),
        }
    }

    fn construct(&self, ctor: &SprigVal, args: &[SprigVal]) -> Result<SprigVal> {
        let name = match ctor {
            SprigVal::HostObject(o) if &*o.type_name == CONSTRUCTOR => {
                o.downcast::<&'static str>().copied()
            }
            _ => None,
        };
        match name {
            Some(STRING_BUILDER) => {
                let initial: String = args.iter().map(printer::display).collect();
                Ok(SprigVal::HostObject(HostObject::new(
                    STRING_BUILDER,
                    Rc::new(RefCell::new(initial)),
                )))
            }
            _ => Err(Error::host(format!(
                "{} is not a constructor",
                printer::render(ctor, true)
            ))),
        }
    }

    fn invoke(&self, target: &SprigVal, member: &str, args: &[SprigVal]) -> Result<SprigVal> {
        match target {
            SprigVal::String(s) => self.invoke_string(s, member, args),
            SprigVal::HostObject(o) if &*o.type_name == MATH => self.invoke_math(member, args),
            SprigVal::HostObject(o) if &*o.type_name == STRING_BUILDER => {
                match o.downcast::<RefCell<String>>() {
                    Some(buf) => self.invoke_builder(target, buf, member, args),
                    None => Err(Error::host("corrupt StringBuilder")),
                }
            }
            other => Err(Error::host(format!(
                "Cannot invoke '{}' on {}",
                member,
                other.type_name()
            ))),
        }
    }
}
