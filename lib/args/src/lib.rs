//! # Command-Line Argument Parsing
//!
//! This library implements a parser for program arguments, supporting flags,
//! typed options, positional arguments, and nested sub-commands in the style
//! of `tool cmd --flag value arg`.
//!
//! A caller builds a tree of [`Parser`] nodes by registering flags, options,
//! and commands, then hands the argument vector to [`Parser::parse()`] (or
//! the non-terminating [`Parser::try_parse()`]). Afterwards, the results are
//! queried by name on the respective parser node.
//!
//! Two classes of errors are kept apart:
//!
//! - **Resource exhaustion** is recorded as a sticky fault on the parser node
//!   and all its ancestors, and is reported to the caller via return values
//!   (see [`mem::Exhausted`]).
//! - **Input errors** (unknown names, missing values, malformed numbers, ...)
//!   abort parsing immediately (see [`Error`] and [`Exit`]). With the `std`
//!   feature, [`Parser::parse()`] turns them into a diagnostic on standard
//!   error and process termination.
//!
//! The library does not require any particular runtime, but depends on the
//! `alloc` crate. Process-level behavior requires the `std` feature.

#![no_std]

extern crate alloc;
extern crate core;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod cursor;
pub mod dump;
pub mod error;
pub mod exit;
pub mod map;
pub mod mem;
pub mod opt;
pub mod parse;
pub mod parser;
pub mod seq;


pub use error::{Error, Exit};
pub use opt::{Kind, Value};
pub use parser::{Callback, Parser};
