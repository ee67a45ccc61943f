//! # Memory Eater
//!
//! Support library of the `eatmemory` utility, which allocates a given
//! amount of memory and holds on to it until told to release it. This is
//! useful to test the behavior of a system under memory pressure.
//!
//! The library provides the size notation of the command-line (see
//! [`size`]), queries of system memory statistics (see [`sysmem`]), and the
//! chunked allocator (see [`eat`]).

pub mod eat;
pub mod size;
pub mod sysmem;

/// Errors of the memory eater.
#[derive(Clone, Copy, Debug, Hash)]
#[derive(Eq, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// A command-line argument is not valid UTF-8.
    ArgumentNotUtf8,
    /// The size is not a number with an optional unit suffix.
    SizeInvalid,
    /// The size is zero or negative.
    SizeNotPositive,
    /// The size overflows the address space.
    SizeOverflow,
    /// The size is relative to free memory, but free memory is unknown.
    FreeUnknown,
    /// The allocation failed after the given number of bytes.
    Exhausted(usize),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ArgumentNotUtf8 => write!(f, "argument is not valid UTF-8"),
            Error::SizeInvalid => write!(f, "invalid size format"),
            Error::SizeNotPositive => write!(f, "size must be a positive integer"),
            Error::SizeOverflow => write!(f, "size is too large"),
            Error::FreeUnknown => write!(f, "free memory is unknown on this system"),
            Error::Exhausted(v) => {
                write!(f, "could not allocate the memory (gave up after {})", size::Bytes(Some(*v as u64)))
            },
        }
    }
}

impl core::error::Error for Error {
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics() {
        assert_eq!(Error::ArgumentNotUtf8.to_string(), "argument is not valid UTF-8");
        assert_eq!(Error::SizeInvalid.to_string(), "invalid size format");
        assert_eq!(Error::SizeNotPositive.to_string(), "size must be a positive integer");
        assert_eq!(
            Error::Exhausted(3 << 20).to_string(),
            "could not allocate the memory (gave up after 3M)",
        );
    }
}
