//! # Parser Errors
//!
//! Errors raised while parsing program arguments or while inspecting parse
//! results. All of them are fatal to the parse: they abort parsing at the
//! point of detection and are never aggregated.

use crate::opt;

/// Enumeration of all errors reported by the argument parser, other than
/// memory exhaustion.
///
/// The `Display` implementation renders the single-line diagnostic, without
/// any `error:` prefix.
#[derive(Clone, Debug, PartialEq)]
pub enum Error<'args> {
    /// A numeric value is syntactically valid, but does not fit the target
    /// type.
    OutOfRange {
        value: &'args str,
    },

    /// A value could not be parsed as an integer.
    IntegerInvalid {
        value: &'args str,
    },

    /// A value could not be parsed as a floating-point number.
    FloatInvalid {
        value: &'args str,
    },

    /// The name of an option given with an inline value (`--name=value` or
    /// `-n=value`) is unknown. `prefix` is the dash-prefix used.
    OptionUnknown {
        prefix: &'static str,
        name: &'args str,
    },

    /// A flag was given an inline value.
    FlagUnexpectedValue {
        prefix: &'static str,
        name: &'args str,
    },

    /// An option requires a value, but none was given.
    OptionNoValue {
        prefix: &'static str,
        name: &'args str,
    },

    /// The long flag or option is unknown.
    LongUnknown {
        name: &'args str,
    },

    /// The short flag or option `short` within the bundle `shorts` is
    /// unknown. `shorts` is provided without its leading dash.
    ShortUnknown {
        short: char,
        shorts: &'args str,
    },

    /// The short option `short` within the bundle `shorts` requires a value,
    /// but no arguments are left.
    ShortNoValue {
        short: char,
        shorts: &'args str,
    },

    /// The automatic `help` command was given an unknown command name.
    CommandUnknown {
        name: &'args str,
    },

    /// The automatic `help` command was given no command name.
    HelpNoCommand,

    /// A name was queried that was never registered on the parser.
    NameUnregistered {
        name: &'args str,
    },

    /// A value was queried with an accessor of a different kind than the
    /// option was registered with.
    KindMismatch {
        name: &'args str,
        kind: opt::Kind,
    },
}

/// Early termination of a parse.
///
/// This is returned by [`Parser::try_parse()`](crate::Parser::try_parse) if
/// the arguments request help or version information, or if they are
/// invalid. [`Parser::parse()`](crate::Parser::parse) turns it into process
/// termination via [`Exit::code()`].
#[derive(Clone, Debug, PartialEq)]
pub enum Exit<'args> {
    /// Help text was requested and is to be printed to standard output.
    Help(alloc::string::String),
    /// Version text was requested and is to be printed to standard output.
    Version(alloc::string::String),
    /// The arguments are invalid.
    Error(Error<'args>),
}

// Short bundles of a single character are reported without the bundle.
fn is_bundle(shorts: &str) -> bool {
    shorts.chars().nth(1).is_some()
}

impl<'args> core::fmt::Display for Error<'args> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Error::OutOfRange { value } => {
                write!(f, "'{}' is out of range", value)
            },
            Error::IntegerInvalid { value } => {
                write!(f, "cannot parse '{}' as an integer", value)
            },
            Error::FloatInvalid { value } => {
                write!(f, "cannot parse '{}' as a floating-point value", value)
            },
            Error::OptionUnknown { prefix, name } => {
                write!(f, "{}{} is not a recognised option name", prefix, name)
            },
            Error::FlagUnexpectedValue { prefix, name } => {
                write!(f, "flag {}{} does not accept an argument", prefix, name)
            },
            Error::OptionNoValue { prefix, name } => {
                write!(f, "missing argument for {}{}", prefix, name)
            },
            Error::LongUnknown { name } => {
                write!(f, "--{} is not a recognised flag or option name", name)
            },
            Error::ShortUnknown { short, shorts } => {
                if is_bundle(shorts) {
                    write!(f, "'{}' in -{} is not a recognised flag or option name", short, shorts)
                } else {
                    write!(f, "-{} is not a recognised flag or option name", shorts)
                }
            },
            Error::ShortNoValue { short, shorts } => {
                if is_bundle(shorts) {
                    write!(f, "missing argument for '{}' in -{}", short, shorts)
                } else {
                    write!(f, "missing argument for -{}", shorts)
                }
            },
            Error::CommandUnknown { name } => {
                write!(f, "'{}' is not a recognised command", name)
            },
            Error::HelpNoCommand => {
                f.write_str("the 'help' command requires an argument")
            },
            Error::NameUnregistered { name } => {
                write!(f, "'{}' is not a registered flag or option name", name)
            },
            Error::KindMismatch { name, kind } => {
                write!(f, "'{}' is not {} option", name, kind.article())
            },
        }
    }
}

impl<'args> core::error::Error for Error<'args> {
}

impl<'args> Exit<'args> {
    /// Yield the process exit status matching this termination.
    pub fn code(&self) -> i32 {
        match self {
            Exit::Help(_) | Exit::Version(_) => 0,
            Exit::Error(_) => 1,
        }
    }
}

impl<'args> core::convert::From<Error<'args>> for Exit<'args> {
    fn from(v: Error<'args>) -> Self {
        Exit::Error(v)
    }
}

impl<'args> core::fmt::Display for Exit<'args> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Exit::Help(v) | Exit::Version(v) => f.write_str(v),
            Exit::Error(v) => write!(f, "error: {}", v),
        }
    }
}
