// sprig-core - String and output built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! str, pr-str, print, println

use sprig_parser::{SprigVal, display, render};

use crate::error::Result;

/// (str & args) - concatenate display renderings; nil contributes nothing
pub(crate) fn builtin_str(args: &[SprigVal]) -> Result<SprigVal> {
    let mut out = String::new();
    for arg in args {
        if !arg.is_nil() {
            out.push_str(&display(arg));
        }
    }
    Ok(SprigVal::string(out))
}

/// (pr-str & args) - readable renderings joined by spaces
pub(crate) fn builtin_pr_str(args: &[SprigVal]) -> Result<SprigVal> {
    let parts: Vec<String> = args.iter().map(|arg| render(arg, true)).collect();
    Ok(SprigVal::string(parts.join(" ")))
}

fn display_joined(args: &[SprigVal]) -> String {
    let parts: Vec<String> = args.iter().map(display).collect();
    parts.join(" ")
}

/// (print & args) - print args separated by spaces
pub(crate) fn builtin_print(args: &[SprigVal]) -> Result<SprigVal> {
    print!("{}", display_joined(args));
    Ok(SprigVal::Nil)
}

/// (println & args) - print args with newline
pub(crate) fn builtin_println(args: &[SprigVal]) -> Result<SprigVal> {
    println!("{}", display_joined(args));
    Ok(SprigVal::Nil)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str() {
        let args = [
            SprigVal::string("a"),
            SprigVal::number(1),
            SprigVal::Nil,
            SprigVal::keyword("k"),
        ];
        assert_eq!(builtin_str(&args).unwrap(), SprigVal::string("a1:k"));
        assert_eq!(builtin_str(&[]).unwrap(), SprigVal::string(""));
    }

    #[test]
    fn test_pr_str() {
        let args = [SprigVal::string("a\"b"), SprigVal::Nil];
        assert_eq!(builtin_pr_str(&args).unwrap(), SprigVal::string("\"a\\\"b\" nil"));
    }

    #[test]
    fn test_print_returns_nil() {
        assert_eq!(builtin_println(&[]).unwrap(), SprigVal::Nil);
    }
}
