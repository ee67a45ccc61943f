//! # Memory Exhaustion
//!
//! All growable storage of the parser reserves memory fallibly. Failures are
//! reported as [`Exhausted`] rather than aborting the process, so a caller can
//! decide how to handle a system under memory pressure.

/// Error returned when memory for a container could not be reserved.
#[derive(Clone, Copy, Debug, Default, Hash)]
#[derive(Eq, Ord, PartialEq, PartialOrd)]
pub struct Exhausted;

impl core::fmt::Display for Exhausted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl core::error::Error for Exhausted {
}

impl core::convert::From<alloc::collections::TryReserveError> for Exhausted {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Self
    }
}

/// Create an owned copy of `v`, reserving its memory fallibly.
pub fn try_to_owned(v: &str) -> Result<alloc::string::String, Exhausted> {
    let mut s = alloc::string::String::new();
    s.try_reserve_exact(v.len())?;
    s.push_str(v);
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_copy() {
        let s = try_to_owned("foobar").unwrap();
        assert_eq!(s, "foobar");
        assert!(s.capacity() >= 6);

        assert_eq!(try_to_owned("").unwrap(), "");
    }

    #[test]
    fn reserve_failure() {
        let mut v = alloc::vec::Vec::<u64>::new();
        let e: Exhausted = v.try_reserve(usize::MAX).unwrap_err().into();
        assert_eq!(e, Exhausted);
    }
}
