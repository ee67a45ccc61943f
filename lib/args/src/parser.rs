//! # Parser Nodes
//!
//! A [`Parser`] holds the registered flags, options, and commands of one level
//! of the command tree, as well as everything found for that level while
//! parsing. Every registered command owns a child parser, so a program with
//! sub-commands forms a tree of parsers rooted at the one created by the
//! caller.
//!
//! Flags and options are registered under one or more space-separated names
//! (e.g., `"help h ?"`). Single-character names are used as short options
//! (`-h`), all other names as long options (`--help`).
//!
//! After parsing, results are queried by name. Querying a name that was
//! never registered, or querying a value with an accessor of the wrong kind,
//! is a programming error and fatal.

use alloc::{string::String, sync::Arc, vec::Vec};
use core::sync::atomic::{AtomicBool, Ordering};
use crate::{
    error::Error,
    exit,
    map,
    mem,
    opt::{self, Kind, Opt, Value},
    seq,
};

/// Callback of a command, invoked with the command name and the command
/// parser once the command was parsed. Its return value is recorded as exit
/// code on the parent parser.
pub type Callback<'args> = fn(&'args str, &mut Parser<'args>) -> i32;

// Sticky memory fault, shared with all descendants. Raising it on a parser
// also raises it on every ancestor.
#[derive(Debug, Default)]
struct Fault {
    raised: AtomicBool,
    up: Option<Arc<Fault>>,
}

/// A node in the command tree, holding registrations and parse results of
/// one level.
///
/// `'args` is the lifetime of the argument vector. Positional arguments and
/// string values borrow from it.
#[derive(Debug)]
pub struct Parser<'args> {
    pub(crate) help: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) options: seq::Sequence<Opt<'args>>,
    pub(crate) option_names: map::Map<usize>,
    pub(crate) commands: seq::Sequence<Parser<'args>>,
    pub(crate) command_names: map::Map<usize>,
    pub(crate) positionals: seq::Sequence<&'args str>,
    pub(crate) command: Option<(&'args str, usize)>,
    pub(crate) callback: Option<Callback<'args>>,
    pub(crate) callback_code: i32,
    pub(crate) help_command: bool,
    pub(crate) first_positional_ends_options: bool,
    fault: Arc<Fault>,
}

impl Fault {
    fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);
        if let Some(up) = &self.up {
            up.raise();
        }
    }
}

impl<'args> Parser<'args> {
    fn with_fault(fault: Arc<Fault>) -> Self {
        Self {
            help: None,
            version: None,
            options: seq::Sequence::new(),
            option_names: map::Map::new(),
            commands: seq::Sequence::new(),
            command_names: map::Map::new(),
            positionals: seq::Sequence::new(),
            command: None,
            callback: None,
            callback_code: 0,
            help_command: false,
            first_positional_ends_options: false,
            fault: fault,
        }
    }

    /// Create a new root parser without any registrations.
    pub fn new() -> Self {
        Self::with_fault(Default::default())
    }

    // Record a memory fault on this parser and all its ancestors.
    pub(crate) fn raise_fault(&self) {
        tracing::warn!("memory allocation failed, parse results are incomplete");
        self.fault.raise();
    }

    // Run `f`, recording a memory fault if it fails.
    fn faultable<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, mem::Exhausted>,
    ) -> Result<T, mem::Exhausted> {
        let r = f(self);
        if r.is_err() {
            self.raise_fault();
        }
        r
    }

    /// Check whether an allocation failed on this parser or any of its
    /// descendants.
    pub fn had_memory_error(&self) -> bool {
        self.fault.raised.load(Ordering::Relaxed)
    }

    /// Check whether this parser belongs to a command, rather than being the
    /// root parser.
    pub fn is_command(&self) -> bool {
        self.fault.up.is_some()
    }

    fn copy_text(text: &str) -> Result<Option<String>, mem::Exhausted> {
        if text.is_empty() {
            Ok(None)
        } else {
            mem::try_to_owned(text).map(Some)
        }
    }

    /// Set the help text of this parser. A non-empty text enables the
    /// automatic `--help` and `-h` flags, unless these names are registered
    /// explicitly. An empty text clears the help text.
    pub fn set_help_text(&mut self, text: &str) -> Result<(), mem::Exhausted> {
        self.help = None;
        self.faultable(|this| {
            this.help = Self::copy_text(text)?;
            Ok(())
        })
    }

    /// Yield the help text of this parser.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the version text of this parser. A non-empty text enables the
    /// automatic `--version` and `-v` flags, unless these names are
    /// registered explicitly. An empty text clears the version text.
    pub fn set_version_text(&mut self, text: &str) -> Result<(), mem::Exhausted> {
        self.version = None;
        self.faultable(|this| {
            this.version = Self::copy_text(text)?;
            Ok(())
        })
    }

    /// Yield the version text of this parser.
    pub fn version_text(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Make the first positional argument end option parsing. All following
    /// arguments are treated as positional arguments, even if they start
    /// with a dash.
    pub fn enable_first_positional_ends_options(&mut self) {
        self.first_positional_ends_options = true;
    }

    /// Enable or disable the automatic `help <command>` command. It is enabled
    /// by every call to [`Self::add_command()`].
    pub fn enable_help_command(&mut self, enable: bool) {
        self.help_command = enable;
    }

    fn register(&mut self, names: &str, opt: Opt<'args>) -> Result<(), mem::Exhausted> {
        self.faultable(|this| {
            let idx = this.options.len();
            this.options.reserve_one()?;
            this.option_names.set_split(names, idx)?;
            this.options.push(opt)
        })
    }

    /// Register a flag under the given names.
    pub fn add_flag(&mut self, names: &str) -> Result<(), mem::Exhausted> {
        self.register(names, Opt::flag())
    }

    /// Register a string option under the given names.
    pub fn add_string_option(
        &mut self,
        names: &str,
        fallback: &'args str,
    ) -> Result<(), mem::Exhausted> {
        self.register(names, Opt::string(fallback))
    }

    /// Register an integer option under the given names.
    pub fn add_integer_option(
        &mut self,
        names: &str,
        fallback: i32,
    ) -> Result<(), mem::Exhausted> {
        self.register(names, Opt::integer(fallback))
    }

    /// Register a floating-point option under the given names.
    pub fn add_float_option(
        &mut self,
        names: &str,
        fallback: f64,
    ) -> Result<(), mem::Exhausted> {
        self.register(names, Opt::float(fallback))
    }

    /// Register a greedy string option under the given names. Once matched,
    /// it consumes all remaining arguments as its values.
    pub fn add_greedy_string_option(&mut self, names: &str) -> Result<(), mem::Exhausted> {
        self.register(names, Opt::greedy_string())
    }

    /// Register a command under the given names, yielding its parser.
    ///
    /// This also enables the automatic `help <command>` command.
    pub fn add_command(&mut self, names: &str) -> Result<&mut Parser<'args>, mem::Exhausted> {
        let child = Self::with_fault(Arc::new(Fault {
            raised: Default::default(),
            up: Some(self.fault.clone()),
        }));

        let idx = self.faultable(|this| {
            let idx = this.commands.len();
            this.commands.reserve_one()?;
            this.command_names.set_split(names, idx)?;
            this.commands.push(child)?;
            Ok(idx)
        })?;

        self.help_command = true;
        Ok(&mut self.commands[idx])
    }

    /// Set the callback of this command parser.
    pub fn set_callback(&mut self, callback: Callback<'args>) {
        self.callback = Some(callback);
    }

    /// Look up a flag or option by name, without treating unknown names as
    /// fatal.
    pub fn option(&self, name: &str) -> Option<&Opt<'args>> {
        self.option_names.get(name).map(|&v| &self.options[v])
    }

    fn lookup<'name>(&self, name: &'name str) -> &Opt<'args> {
        match self.option(name) {
            Some(v) => v,
            None => exit::fatal(Error::NameUnregistered { name: name }),
        }
    }

    fn lookup_kind<'name>(&self, name: &'name str, kind: Kind) -> &Opt<'args> {
        let v = self.lookup(name);
        if v.kind() != kind {
            exit::fatal(Error::KindMismatch { name: name, kind: kind });
        }
        v
    }

    /// Yield the number of times the flag or option was found.
    pub fn count(&self, name: &str) -> usize {
        self.lookup(name).count()
    }

    /// Check whether the flag or option was found at least once.
    pub fn found(&self, name: &str) -> bool {
        self.lookup(name).found()
    }

    /// Yield the last value of a string option, or its fallback.
    pub fn value_str(&self, name: &str) -> &'args str {
        self.lookup_kind(name, Kind::String)
            .value()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    /// Yield the last value of an integer option, or its fallback.
    pub fn value_int(&self, name: &str) -> i32 {
        self.lookup_kind(name, Kind::Integer)
            .value()
            .and_then(|v| v.as_int())
            .unwrap_or_default()
    }

    /// Yield the last value of a floating-point option, or its fallback.
    pub fn value_float(&self, name: &str) -> f64 {
        self.lookup_kind(name, Kind::Float)
            .value()
            .and_then(|v| v.as_float())
            .unwrap_or_default()
    }

    /// Yield the value at the given position of a string option. The
    /// position must be lower than [`Self::count()`].
    pub fn value_str_at(&self, name: &str, at: usize) -> &'args str {
        self.lookup_kind(name, Kind::String)
            .value_at(at)
            .as_str()
            .unwrap_or_default()
    }

    /// Yield the value at the given position of an integer option. The
    /// position must be lower than [`Self::count()`].
    pub fn value_int_at(&self, name: &str, at: usize) -> i32 {
        self.lookup_kind(name, Kind::Integer)
            .value_at(at)
            .as_int()
            .unwrap_or_default()
    }

    /// Yield the value at the given position of a floating-point option. The
    /// position must be lower than [`Self::count()`].
    pub fn value_float_at(&self, name: &str, at: usize) -> f64 {
        self.lookup_kind(name, Kind::Float)
            .value_at(at)
            .as_float()
            .unwrap_or_default()
    }

    /// Yield a copy of all values of a string option.
    pub fn values_str(&self, name: &str) -> Vec<&'args str> {
        self.lookup_kind(name, Kind::String)
            .values()
            .iter()
            .filter_map(Value::as_str)
            .collect()
    }

    /// Yield a copy of all values of an integer option.
    pub fn values_int(&self, name: &str) -> Vec<i32> {
        self.lookup_kind(name, Kind::Integer)
            .values()
            .iter()
            .filter_map(Value::as_int)
            .collect()
    }

    /// Yield a copy of all values of a floating-point option.
    pub fn values_float(&self, name: &str) -> Vec<f64> {
        self.lookup_kind(name, Kind::Float)
            .values()
            .iter()
            .filter_map(Value::as_float)
            .collect()
    }

    /// Check whether any positional arguments were found.
    pub fn has_positionals(&self) -> bool {
        !self.positionals.is_empty()
    }

    /// Yield the number of positional arguments.
    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    /// Yield the positional argument at the given position.
    pub fn positional_at(&self, at: usize) -> &'args str {
        self.positionals[at]
    }

    /// Yield a copy of all positional arguments.
    pub fn positionals(&self) -> Vec<&'args str> {
        self.positionals.as_slice().to_vec()
    }

    /// Parse all positional arguments as integers, failing on the first
    /// argument that is not one.
    pub fn try_positionals_as_ints(&self) -> Result<Vec<i32>, Error<'args>> {
        self.positionals.iter().map(|&v| opt::parse_int(v)).collect()
    }

    /// Parse all positional arguments as floating-point numbers, failing on
    /// the first argument that is not one.
    pub fn try_positionals_as_floats(&self) -> Result<Vec<f64>, Error<'args>> {
        self.positionals.iter().map(|&v| opt::parse_float(v)).collect()
    }

    /// Parse all positional arguments as integers. Any argument that is not
    /// an integer is fatal.
    pub fn positionals_as_ints(&self) -> Vec<i32> {
        self.try_positionals_as_ints().unwrap_or_else(|e| exit::fatal(e))
    }

    /// Parse all positional arguments as floating-point numbers. Any
    /// argument that is not a number is fatal.
    pub fn positionals_as_floats(&self) -> Vec<f64> {
        self.try_positionals_as_floats().unwrap_or_else(|e| exit::fatal(e))
    }

    /// Check whether a command was found.
    pub fn found_command(&self) -> bool {
        self.command.is_some()
    }

    /// Yield the name of the command that was found, as given in the
    /// arguments.
    pub fn command_name(&self) -> Option<&'args str> {
        self.command.map(|(v, _)| v)
    }

    /// Yield the parser of the command that was found.
    pub fn command(&self) -> Option<&Parser<'args>> {
        self.command.map(|(_, v)| &self.commands[v])
    }

    /// Yield the mutable parser of the command that was found.
    pub fn command_mut(&mut self) -> Option<&mut Parser<'args>> {
        self.command.map(|(_, v)| &mut self.commands[v])
    }

    /// Yield the exit code returned by the callback of the command that was
    /// found. This is 0 if no callback was invoked.
    pub fn command_exit_code(&self) -> i32 {
        self.callback_code
    }

    /// Look up the parser of a registered command by name.
    pub fn find_command(&self, name: &str) -> Option<&Parser<'args>> {
        self.command_names.get(name).map(|&v| &self.commands[v])
    }

    /// Look up the mutable parser of a registered command by name.
    pub fn find_command_mut(&mut self, name: &str) -> Option<&mut Parser<'args>> {
        let idx = *self.command_names.get(name)?;
        Some(&mut self.commands[idx])
    }
}

impl<'args> core::default::Default for Parser<'args> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration() {
        let mut p = Parser::new();

        p.add_flag("verbose v").unwrap();
        p.add_string_option("name n", "anon").unwrap();
        p.add_integer_option("timeout t", -1).unwrap();
        p.add_float_option("ratio", 0.5).unwrap();
        p.add_greedy_string_option("tags").unwrap();

        assert_eq!(p.options.len(), 5);
        assert_eq!(p.option_names.len(), 8);
        assert!(!p.had_memory_error());
        assert!(!p.is_command());

        assert_eq!(p.option("v").map(|v| v.kind()), Some(Kind::Flag));
        assert_eq!(p.option("tags").map(|v| v.is_greedy()), Some(true));
        assert!(p.option("x").is_none());

        assert_eq!(p.count("verbose"), 0);
        assert!(!p.found("v"));
        assert_eq!(p.value_str("n"), "anon");
        assert_eq!(p.value_int("timeout"), -1);
        assert_eq!(p.value_float("ratio"), 0.5);
        assert_eq!(p.value_str("tags"), "");
        assert!(p.values_int("t").is_empty());
    }

    #[test]
    fn aliases_share_option() {
        let mut p = Parser::new();

        p.add_flag("help h ?").unwrap();

        let a = p.option("help").unwrap() as *const Opt;
        let b = p.option("?").unwrap() as *const Opt;
        assert_eq!(a, b);
    }

    #[test]
    fn texts() {
        let mut p = Parser::new();

        assert_eq!(p.help_text(), None);

        p.set_help_text("usage").unwrap();
        p.set_version_text("1.0").unwrap();
        assert_eq!(p.help_text(), Some("usage"));
        assert_eq!(p.version_text(), Some("1.0"));

        p.set_help_text("other").unwrap();
        assert_eq!(p.help_text(), Some("other"));

        p.set_help_text("").unwrap();
        assert_eq!(p.help_text(), None);
    }

    #[test]
    fn commands() {
        let mut p = Parser::new();

        assert!(!p.help_command);

        let c = p.add_command("go g").unwrap();
        c.add_flag("fast").unwrap();
        assert!(c.is_command());

        assert!(p.help_command);
        assert_eq!(p.commands.len(), 1);
        assert!(p.find_command("go").is_some());
        assert!(p.find_command("g").is_some());
        assert!(p.find_command("stop").is_none());
        assert!(p.find_command_mut("g").unwrap().option("fast").is_some());

        assert!(!p.found_command());
        assert_eq!(p.command_name(), None);
        assert!(p.command().is_none());
        assert_eq!(p.command_exit_code(), 0);

        p.enable_help_command(false);
        assert!(!p.help_command);
    }

    #[test]
    fn fault_propagation() {
        let mut root = Parser::new();
        let mid = root.add_command("mid").unwrap();
        let leaf = mid.add_command("leaf").unwrap();

        assert!(!leaf.had_memory_error());
        leaf.raise_fault();
        assert!(leaf.had_memory_error());

        assert!(root.find_command("mid").unwrap().had_memory_error());
        assert!(root.had_memory_error());

        let mut other = Parser::new();
        other.add_command("a").unwrap();
        other.raise_fault();
        assert!(!other.find_command("a").unwrap().had_memory_error());
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser<'static>>();

        let argv = ["prog", "-v", "go", "x"];
        let mut p = Parser::new();
        p.add_flag("v").unwrap();
        p.add_command("go").unwrap();
        assert_eq!(p.try_parse(&argv), Ok(true));

        let p = &p;
        std::thread::scope(|s| {
            s.spawn(move || assert_eq!(p.count("v"), 1));
            s.spawn(move || assert_eq!(p.command().unwrap().positionals(), ["x"]));
        });
    }
}
