//! # Argument Parsing
//!
//! Parse raw program arguments into the state of a tree of [`Parser`]
//! nodes. Arguments are consumed strictly left to right, without
//! backtracking. Each argument is dispatched by the first matching rule:
//!
//! 1. `--` ends option parsing. All remaining arguments are positional.
//! 2. `--name` and `--name=value` are long flags and options.
//! 3. `-abc` and `-n=value` are short flags and options. A lone `-`, or a
//!    dash followed by a digit (e.g., `-5`), is a positional argument.
//! 4. A registered command name, if no positional argument was found yet,
//!    hands all remaining arguments to the command parser.
//! 5. `help <command>` prints the help text of a command, if enabled and no
//!    positional argument was found yet.
//! 6. Anything else is a positional argument.
//!
//! Options that take a value consume the following argument, or all
//! remaining arguments if they are greedy.

use crate::{
    cursor::Cursor,
    error::{Error, Exit},
    opt::Kind,
    parser::Parser,
};

impl<'args> Parser<'args> {
    /// Parse the argument vector `argv` without terminating the process.
    ///
    /// The first element is taken as program name and ignored. An empty
    /// vector is valid and yields no results.
    ///
    /// Yields `Ok(true)` on success, and `Ok(false)` if memory could not be
    /// allocated, in which case the results are incomplete. Requests for help
    /// or version information, as well as invalid arguments, abort parsing
    /// and are returned as [`Exit`].
    pub fn try_parse<S: AsRef<str>>(&mut self, argv: &'args [S]) -> Result<bool, Exit<'args>> {
        if self.had_memory_error() {
            return Ok(false);
        }

        let Some(args) = argv.get(1..) else {
            return Ok(true);
        };

        self.parse_cursor(&mut Cursor::with(args))?;

        Ok(!self.had_memory_error())
    }

    /// Parse the argument vector `argv`, terminating the process on invalid
    /// arguments and on requests for help or version information.
    ///
    /// Yields `false` if memory could not be allocated. See
    /// [`Self::try_parse()`] for details.
    #[cfg(feature = "std")]
    pub fn parse<S: AsRef<str>>(&mut self, argv: &'args [S]) -> bool {
        match self.try_parse(argv) {
            Ok(v) => v,
            Err(e) => crate::exit::terminate(&e),
        }
    }

    fn push_positional(&mut self, arg: &'args str) {
        if self.positionals.push(arg).is_err() {
            self.raise_fault();
        }
    }

    fn push_remaining<S: AsRef<str>>(&mut self, cursor: &mut Cursor<'args, S>) {
        for arg in cursor {
            self.push_positional(arg);
        }
    }

    // Decode `token` and record it as occurrence of the option at `idx`.
    fn store(&mut self, idx: usize, token: &'args str) -> Result<(), Error<'args>> {
        let opt = &mut self.options[idx];
        let value = opt.decode(token)?;
        if opt.append(value).is_err() {
            self.raise_fault();
        }
        Ok(())
    }

    // Record an occurrence of the flag or option at `idx`, consuming its
    // values from the cursor. Yields `false` if a value is required but no
    // arguments are left.
    fn take<S: AsRef<str>>(
        &mut self,
        idx: usize,
        cursor: &mut Cursor<'args, S>,
    ) -> Result<bool, Error<'args>> {
        let opt = &mut self.options[idx];

        if opt.kind() == Kind::Flag {
            opt.increment();
            return Ok(true);
        }

        if !cursor.has_next() {
            return Ok(false);
        }

        if opt.is_greedy() {
            while let Some(v) = cursor.next() {
                self.store(idx, v)?;
            }
        } else if let Some(v) = cursor.next() {
            self.store(idx, v)?;
        }

        Ok(true)
    }

    fn help_exit(&self) -> Option<Exit<'args>> {
        self.help.clone().map(Exit::Help)
    }

    fn version_exit(&self) -> Option<Exit<'args>> {
        self.version.clone().map(Exit::Version)
    }

    fn parse_equals<S: AsRef<str>>(
        &mut self,
        cursor: &mut Cursor<'args, S>,
        prefix: &'static str,
        name: &'args str,
        value: &'args str,
    ) -> Result<(), Exit<'args>> {
        let Some(&idx) = self.option_names.get(name) else {
            return Err(Error::OptionUnknown { prefix: prefix, name: name }.into());
        };

        let opt = &self.options[idx];
        if opt.kind() == Kind::Flag {
            return Err(Error::FlagUnexpectedValue { prefix: prefix, name: name }.into());
        }
        if value.is_empty() {
            return Err(Error::OptionNoValue { prefix: prefix, name: name }.into());
        }
        let greedy = opt.is_greedy();

        self.store(idx, value)?;

        if greedy {
            while let Some(v) = cursor.next() {
                self.store(idx, v)?;
            }
        }

        Ok(())
    }

    fn parse_long<S: AsRef<str>>(
        &mut self,
        cursor: &mut Cursor<'args, S>,
        name: &'args str,
    ) -> Result<(), Exit<'args>> {
        if let Some(&idx) = self.option_names.get(name) {
            if !self.take(idx, cursor)? {
                return Err(Error::OptionNoValue { prefix: "--", name: name }.into());
            }
            return Ok(());
        }

        let auto = match name {
            "help" => self.help_exit(),
            "version" => self.version_exit(),
            _ => None,
        };
        if let Some(v) = auto {
            tracing::debug!(flag = name, "automatic flag requested");
            return Err(v);
        }

        Err(Error::LongUnknown { name: name }.into())
    }

    fn parse_short<S: AsRef<str>>(
        &mut self,
        cursor: &mut Cursor<'args, S>,
        shorts: &'args str,
    ) -> Result<(), Exit<'args>> {
        for short in shorts.chars() {
            let mut buf = [0u8; 4];
            let key: &str = short.encode_utf8(&mut buf);

            let Some(&idx) = self.option_names.get(key) else {
                let auto = match short {
                    'h' => self.help_exit(),
                    'v' => self.version_exit(),
                    _ => None,
                };
                if let Some(v) = auto {
                    tracing::debug!(flag = key, "automatic flag requested");
                    return Err(v);
                }

                return Err(Error::ShortUnknown { short: short, shorts: shorts }.into());
            };

            if !self.take(idx, cursor)? {
                return Err(Error::ShortNoValue { short: short, shorts: shorts }.into());
            }
        }

        Ok(())
    }

    fn parse_command<S: AsRef<str>>(
        &mut self,
        cursor: &mut Cursor<'args, S>,
        name: &'args str,
        idx: usize,
    ) -> Result<(), Exit<'args>> {
        tracing::debug!(command = name, "entering command");

        self.command = Some((name, idx));
        self.commands[idx].parse_cursor(cursor)?;

        // The fault is shared with all ancestors, so checking this level
        // covers faults raised anywhere below it.
        if let Some(callback) = self.commands[idx].callback {
            if !self.had_memory_error() {
                self.callback_code = callback(name, &mut self.commands[idx]);
                tracing::debug!(command = name, code = self.callback_code, "command callback returned");
            }
        }

        Ok(())
    }

    fn parse_help_command<S: AsRef<str>>(
        &self,
        cursor: &mut Cursor<'args, S>,
    ) -> Exit<'args> {
        let Some(name) = cursor.next() else {
            return Error::HelpNoCommand.into();
        };

        match self.command_names.get(name) {
            Some(&idx) => Exit::Help(self.commands[idx].help.clone().unwrap_or_default()),
            None => Error::CommandUnknown { name: name }.into(),
        }
    }

    pub(crate) fn parse_cursor<S: AsRef<str>>(
        &mut self,
        cursor: &mut Cursor<'args, S>,
    ) -> Result<(), Exit<'args>> {
        if self.had_memory_error() {
            return Ok(());
        }

        while let Some(arg) = cursor.next() {
            tracing::trace!(arg, "dispatching argument");

            if arg == "--" {
                self.push_remaining(cursor);
            } else if let Some(long) = arg.strip_prefix("--") {
                match long.split_once('=') {
                    Some((name, value)) => self.parse_equals(cursor, "--", name, value)?,
                    None => self.parse_long(cursor, long)?,
                }
            } else if let Some(shorts) = arg.strip_prefix('-') {
                if shorts.is_empty() || shorts.starts_with(|c: char| c.is_ascii_digit()) {
                    self.push_positional(arg);
                } else {
                    match shorts.split_once('=') {
                        Some((name, value)) => self.parse_equals(cursor, "-", name, value)?,
                        None => self.parse_short(cursor, shorts)?,
                    }
                }
            } else if let Some(idx) = self.command_names.get(arg)
                .filter(|_| self.positionals.is_empty())
                .copied()
            {
                self.parse_command(cursor, arg, idx)?;
            } else if self.positionals.is_empty() && self.help_command && arg == "help" {
                return Err(self.parse_help_command(cursor));
            } else {
                self.push_positional(arg);
                if self.first_positional_ends_options {
                    self.push_remaining(cursor);
                }
            }
        }

        Ok(())
    }
}
