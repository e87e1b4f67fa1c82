// sprig-parser - Printer for Sprig values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Value to text conversion.
//!
//! Readable output can be fed back to the reader for every literal value.
//! Display output differs only in printing strings raw. Functions, macros,
//! atoms and host objects print as `#<...>` placeholders that do not read
//! back.

use std::fmt::Write;

use crate::value::SprigVal;

/// Render `value`. With `readable` set, strings are quoted and escaped.
#[must_use]
pub fn render(value: &SprigVal, readable: bool) -> String {
    let mut out = String::new();
    write_value(&mut out, value, readable);
    out
}

/// Shorthand for display rendering, as used by `str` and `print`.
#[must_use]
pub fn display(value: &SprigVal) -> String {
    render(value, false)
}

/// Integral values print without a fractional part.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "##NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "##Inf" } else { "##-Inf" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn write_value(out: &mut String, value: &SprigVal, readable: bool) {
    match value {
        SprigVal::Nil => out.push_str("nil"),
        SprigVal::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        SprigVal::Number(n) => out.push_str(&format_number(*n)),
        SprigVal::String(s) if readable => write_escaped(out, s),
        SprigVal::String(s) => out.push_str(s),
        SprigVal::Symbol(sym, _) => out.push_str(sym.name()),
        SprigVal::Keyword(kw) => {
            let _ = write!(out, "{}", kw);
        }
        SprigVal::List(items, _) => write_seq(out, "(", ")", items.iter(), readable),
        SprigVal::Vector(items, _) => write_seq(out, "[", "]", items.iter(), readable),
        SprigVal::Map(map, _) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_value(out, k, readable);
                out.push(' ');
                write_value(out, v, readable);
            }
            out.push('}');
        }
        SprigVal::MapForm(pairs, _) => {
            out.push('{');
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_value(out, k, readable);
                out.push(' ');
                write_value(out, v, readable);
            }
            out.push('}');
        }
        SprigVal::Atom(atom) => {
            out.push_str("#<atom ");
            write_value(out, &atom.deref(), readable);
            out.push('>');
        }
        SprigVal::Fn(f) => {
            out.push_str("#<fn ");
            write_value(out, &f.params, true);
            out.push('>');
        }
        SprigVal::Macro(m) => {
            out.push_str("#<macro ");
            write_value(out, &m.params, true);
            out.push('>');
        }
        SprigVal::NativeFn(f) => {
            let _ = write!(out, "#<native {}>", f.name);
        }
        SprigVal::HostObject(o) => {
            let _ = write!(out, "#<host {}>", o.type_name);
        }
    }
}

fn write_seq<'a>(
    out: &mut String,
    open: &str,
    close: &str,
    items: impl Iterator<Item = &'a SprigVal>,
    readable: bool,
) {
    out.push_str(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_value(out, item, readable);
    }
    out.push_str(close);
}

fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
