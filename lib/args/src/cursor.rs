//! # Argument Cursor
//!
//! A forward-only cursor over the raw argument list. The parser never looks
//! back, and never looks further ahead than whether another argument exists.

/// Forward-only cursor over a list of arguments.
pub struct Cursor<'args, S> {
    args: &'args [S],
    index: usize,
}

impl<'args, S: AsRef<str>> Cursor<'args, S> {
    /// Create a new cursor pointing at the first element of `args`.
    pub fn with(args: &'args [S]) -> Self {
        Self {
            args: args,
            index: 0,
        }
    }

    /// Check whether any arguments are left.
    pub fn has_next(&self) -> bool {
        self.index < self.args.len()
    }

    /// Yield the number of arguments left.
    pub fn remaining(&self) -> usize {
        self.args.len() - self.index
    }
}

impl<'args, S: AsRef<str>>
    core::iter::Iterator
for
    Cursor<'args, S>
{
    type Item = &'args str;

    fn next(&mut self) -> Option<Self::Item> {
        let args: &'args [S] = self.args;
        let v = args.get(self.index)?;
        self.index += 1;
        Some(v.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl<'args, S: AsRef<str>>
    core::iter::ExactSizeIterator
for
    Cursor<'args, S>
{
}
