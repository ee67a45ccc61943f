//! # Size Notation
//!
//! Sizes are given as a decimal number of bytes with an optional unit
//! suffix. `K`, `M`, and `G` scale by powers of 1024, and `%` takes the
//! given percentage of the currently free memory. Suffixes are
//! case-insensitive.

use crate::Error;

pub const KIB: u64 = 1 << 10;
pub const MIB: u64 = 1 << 20;
pub const GIB: u64 = 1 << 30;

/// Byte count in human-readable form.
///
/// Unknown counts render as `N/A`. Counts are truncated to the largest unit
/// they fill, e.g., `1536` renders as `1K`.
#[derive(Clone, Copy, Debug, Hash)]
#[derive(Eq, Ord, PartialEq, PartialOrd)]
pub struct Bytes(pub Option<u64>);

/// Parse a size given on the command-line into a number of bytes.
///
/// `free` is the amount of free memory, used for percentages. The result is
/// always positive.
pub fn parse(value: &str, free: Option<u64>) -> Result<u64, Error> {
    let (digits, unit) = match value.char_indices().last() {
        Some((idx, c)) if !c.is_ascii_digit() => (&value[..idx], Some(c.to_ascii_uppercase())),
        _ => (value, None),
    };

    let number: i64 = digits.parse().map_err(|_| Error::SizeInvalid)?;
    if number <= 0 {
        return Err(Error::SizeNotPositive);
    }
    let number = number as u64;

    let bytes = match unit {
        None => Some(number),
        Some('K') => number.checked_mul(KIB),
        Some('M') => number.checked_mul(MIB),
        Some('G') => number.checked_mul(GIB),
        Some('%') => {
            let free = free.ok_or(Error::FreeUnknown)?;
            number.checked_mul(free).map(|v| v / 100)
        },
        Some(_) => return Err(Error::SizeInvalid),
    };

    match bytes {
        None => Err(Error::SizeOverflow),
        Some(0) => Err(Error::SizeNotPositive),
        Some(v) => Ok(v),
    }
}

impl core::fmt::Display for Bytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            None => write!(f, "N/A"),
            Some(v) if v < KIB => write!(f, "{} bytes", v),
            Some(v) if v < MIB - 1 => write!(f, "{}K", v / KIB),
            Some(v) if v < GIB - 1 => write!(f, "{}M", v / MIB),
            Some(v) => write!(f, "{}G", v / GIB),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(parse("1024", None), Ok(1024));
        assert_eq!(parse("1k", None), Ok(1024));
        assert_eq!(parse("15M", None), Ok(15 * MIB));
        assert_eq!(parse("2g", None), Ok(2 * GIB));
        assert_eq!(parse("50%", Some(1000)), Ok(500));
        assert_eq!(parse("1%", Some(99)), Err(Error::SizeNotPositive));
    }

    #[test]
    fn invalid() {
        assert_eq!(parse("", None), Err(Error::SizeInvalid));
        assert_eq!(parse("M", None), Err(Error::SizeInvalid));
        assert_eq!(parse("12X", None), Err(Error::SizeInvalid));
        assert_eq!(parse("1.5G", None), Err(Error::SizeInvalid));
        assert_eq!(parse("0", None), Err(Error::SizeNotPositive));
        assert_eq!(parse("-4K", None), Err(Error::SizeNotPositive));
        assert_eq!(parse("50%", None), Err(Error::FreeUnknown));
        assert_eq!(parse("9223372036854775807G", None), Err(Error::SizeOverflow));
    }

    #[test]
    fn display() {
        assert_eq!(Bytes(None).to_string(), "N/A");
        assert_eq!(Bytes(Some(0)).to_string(), "0 bytes");
        assert_eq!(Bytes(Some(1023)).to_string(), "1023 bytes");
        assert_eq!(Bytes(Some(1536)).to_string(), "1K");
        assert_eq!(Bytes(Some(15 * MIB)).to_string(), "15M");
        assert_eq!(Bytes(Some(3 * GIB + 1)).to_string(), "3G");
    }
}
