//! # Debug Dump
//!
//! Render the state of a parser node in a human-readable form. The output
//! lists every registered flag and option name with its fallback and all its
//! occurrences, followed by the positional arguments and the command that
//! was found:
//!
//! ```txt
//! Flags/Options:
//!   verbose: 2
//!   name: (anon) [foo, bar]
//!
//! Arguments:
//!   [none]
//!
//! Command:
//!   go
//! ```
//!
//! Aliases are listed separately, in the internal order of the name
//! registry. The order is stable for a given set of registrations.

use crate::{
    opt::{Kind, Opt, Value},
    parser::Parser,
};

/// Displayable state of a parser node, see [`Parser::dump()`].
pub struct Dump<'this, 'args> {
    parser: &'this Parser<'args>,
}

impl<'args>
    core::fmt::Display
for
    Value<'args>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::String(v) => f.write_str(v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:.6}", v),
        }
    }
}

fn fmt_opt(f: &mut core::fmt::Formatter<'_>, opt: &Opt<'_>) -> core::fmt::Result {
    if opt.kind() == Kind::Flag {
        return write!(f, "{}", opt.count());
    }

    f.write_str("(")?;
    if let Some(v) = opt.fallback() {
        write!(f, "{}", v)?;
    }
    f.write_str(") [")?;
    for (i, v) in opt.values().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", v)?;
    }
    f.write_str("]")
}

impl<'this, 'args>
    core::fmt::Display
for
    Dump<'this, 'args>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let p = self.parser;

        writeln!(f, "Flags/Options:")?;
        if p.option_names.is_empty() {
            writeln!(f, "  [none]")?;
        }
        for (name, &idx) in p.option_names.iter() {
            write!(f, "  {}: ", name)?;
            fmt_opt(f, &p.options[idx])?;
            writeln!(f)?;
        }

        writeln!(f, "\nArguments:")?;
        if p.positionals.is_empty() {
            writeln!(f, "  [none]")?;
        }
        for v in p.positionals.iter() {
            writeln!(f, "  {}", v)?;
        }

        writeln!(f, "\nCommand:")?;
        match p.command_name() {
            Some(v) => writeln!(f, "  {}", v),
            None => writeln!(f, "  [none]"),
        }
    }
}

impl<'args> Parser<'args> {
    /// Yield a displayable dump of the state of this parser node.
    pub fn dump(&self) -> Dump<'_, 'args> {
        Dump {
            parser: self,
        }
    }

    /// Write the state of this parser node to standard output.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        std::print!("{}", self.dump());
    }
}
