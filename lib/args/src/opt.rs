//! # Flags and Options
//!
//! An [`Opt`] is a typed, repeatable value slot. Every time it is matched on
//! the command-line, an occurrence is recorded. Flags only count their
//! occurrences, while options of all other kinds decode a value for each
//! occurrence. If an option was never matched, its fallback value is used.

use crate::{error::Error, mem, seq};

/// Kind of a flag or option, fixed at registration.
#[derive(Clone, Copy, Debug, Hash)]
#[derive(Eq, Ord, PartialEq, PartialOrd)]
pub enum Kind {
    /// No value, only the number of occurrences is recorded.
    Flag,
    /// Values are taken verbatim.
    String,
    /// Values are decoded as `i32`.
    Integer,
    /// Values are decoded as `f64`.
    Float,
}

/// A decoded option value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'args> {
    /// Verbatim argument, borrowed from the argument vector.
    String(&'args str),
    /// Decoded integer.
    Integer(i32),
    /// Decoded floating-point number.
    Float(f64),
}

/// A registered flag or option, with all its occurrences.
#[derive(Clone, Debug)]
pub struct Opt<'args> {
    kind: Kind,
    greedy: bool,
    flags: usize,
    values: seq::Sequence<Value<'args>>,
    fallback: Option<Value<'args>>,
}

/// Decode `value` as a C-style integer literal.
///
/// The literal is an optional sign followed by a hexadecimal (`0x` prefix),
/// octal (`0` prefix), or decimal number. Leading whitespace is skipped. The
/// entire remainder must be consumed, and the result must fit into `i32`.
pub fn parse_int(value: &str) -> Result<i32, Error<'_>> {
    let invalid = || Error::IntegerInvalid { value: value };

    let v = value.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, v) = match v.as_bytes().first() {
        Some(b'-') => (true, &v[1..]),
        Some(b'+') => (false, &v[1..]),
        _ => (false, v),
    };
    let (radix, digits) = match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None if v.len() > 1 && v.starts_with('0') => (8, &v[1..]),
        None => (10, v),
    };

    if digits.is_empty() {
        return Err(invalid());
    }

    let mut acc: i64 = 0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            return Err(invalid());
        };
        acc = acc
            .checked_mul(radix as i64)
            .and_then(|v| v.checked_add(digit as i64))
            .ok_or(Error::OutOfRange { value: value })?;
    }

    if negative {
        acc = -acc;
    }

    i32::try_from(acc).map_err(|_| Error::OutOfRange { value: value })
}

// Decode a hexadecimal floating-point literal after its `0x` prefix, in the
// form `h[.h][p[+-]d]`. Yields the unsigned value and whether any mantissa
// digit is non-zero.
fn parse_hex_float(digits: &str) -> Option<(f64, bool)> {
    let (mantissa, exponent) = match digits.find(['p', 'P']) {
        Some(idx) => (&digits[..idx], Some(&digits[idx + 1..])),
        None => (digits, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }

    let mut m = 0.0f64;
    let mut nonzero = false;
    for c in int.chars().chain(frac.chars()) {
        let d = c.to_digit(16)?;
        nonzero |= d != 0;
        m = m * 16.0 + d as f64;
    }

    let exp = match exponent {
        Some(v) => v.parse::<i64>().ok()?,
        None => 0,
    };

    // Scaling beyond these bounds only yields zero or infinity.
    let mut exp = exp.saturating_sub(4 * frac.len() as i64).clamp(-2200, 2200);
    while exp > 0 {
        m *= 2.0;
        exp -= 1;
    }
    while exp < 0 {
        m *= 0.5;
        exp += 1;
    }

    Some((m, nonzero))
}

/// Decode `value` as a floating-point literal.
///
/// Decimal literals with optional exponent and hexadecimal literals (`0x`
/// prefix, optional binary exponent `p`) are accepted. Leading whitespace is
/// skipped, and the entire remainder must be consumed. Infinity and NaN are
/// accepted if spelled out. Literals that overflow `f64`, or that are not
/// zero but underflow to zero or a subnormal value, are out of range.
pub fn parse_float(value: &str) -> Result<f64, Error<'_>> {
    let invalid = || Error::FloatInvalid { value: value };

    let v = value.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, unsigned) = match v.as_bytes().first() {
        Some(b'-') => (true, &v[1..]),
        Some(b'+') => (false, &v[1..]),
        _ => (false, v),
    };

    let (r, nonzero) = match unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        Some(hex) => {
            let (m, nonzero) = parse_hex_float(hex).ok_or_else(invalid)?;
            (if negative { -m } else { m }, nonzero)
        },
        None => {
            let r: f64 = v.parse().map_err(|_| invalid())?;
            let mantissa = unsigned.split(['e', 'E']).next().unwrap_or_default();
            (r, mantissa.bytes().any(|b| (b'1'..=b'9').contains(&b)))
        },
    };

    if r.is_infinite()
        && !unsigned.eq_ignore_ascii_case("inf")
        && !unsigned.eq_ignore_ascii_case("infinity")
    {
        return Err(Error::OutOfRange { value: value });
    }
    if nonzero && (r == 0.0 || r.is_subnormal()) {
        return Err(Error::OutOfRange { value: value });
    }

    Ok(r)
}

impl Kind {
    /// Yield the kind prefixed with its indefinite article.
    pub fn article(&self) -> &'static str {
        match self {
            Kind::Flag => "a flag",
            Kind::String => "a string",
            Kind::Integer => "an integer",
            Kind::Float => "a floating-point",
        }
    }
}

impl<'args> Value<'args> {
    /// Yield the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
        }
    }

    /// Yield the string, if this is a string value.
    pub fn as_str(&self) -> Option<&'args str> {
        match *self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Yield the integer, if this is an integer value.
    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Yield the floating-point number, if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl<'args> Opt<'args> {
    fn with(kind: Kind, fallback: Option<Value<'args>>) -> Self {
        Self {
            kind: kind,
            greedy: false,
            flags: 0,
            values: seq::Sequence::new(),
            fallback: fallback,
        }
    }

    /// Create a new flag.
    pub fn flag() -> Self {
        Self::with(Kind::Flag, None)
    }

    /// Create a new string option with the given fallback.
    pub fn string(fallback: &'args str) -> Self {
        Self::with(Kind::String, Some(Value::String(fallback)))
    }

    /// Create a new greedy string option. Once matched, it takes all
    /// remaining arguments as values.
    pub fn greedy_string() -> Self {
        let mut v = Self::string("");
        v.greedy = true;
        v
    }

    /// Create a new integer option with the given fallback.
    pub fn integer(fallback: i32) -> Self {
        Self::with(Kind::Integer, Some(Value::Integer(fallback)))
    }

    /// Create a new floating-point option with the given fallback.
    pub fn float(fallback: f64) -> Self {
        Self::with(Kind::Float, Some(Value::Float(fallback)))
    }

    /// Yield the kind of this option.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Check whether this option is greedy.
    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    /// Yield the number of occurrences.
    pub fn count(&self) -> usize {
        match self.kind {
            Kind::Flag => self.flags,
            _ => self.values.len(),
        }
    }

    /// Check whether the option occurred at least once.
    pub fn found(&self) -> bool {
        self.count() > 0
    }

    /// Yield the fallback value. Flags have none.
    pub fn fallback(&self) -> Option<Value<'args>> {
        self.fallback
    }

    /// Yield the value of the last occurrence, or the fallback if there was
    /// none. Flags have no value.
    pub fn value(&self) -> Option<Value<'args>> {
        self.values.last().copied().or(self.fallback)
    }

    /// Yield the value of the occurrence at the specified position.
    ///
    /// The position must be lower than [`Self::count()`].
    pub fn value_at(&self, at: usize) -> Value<'args> {
        self.values[at]
    }

    /// Yield the values of all occurrences, in order.
    pub fn values(&self) -> &[Value<'args>] {
        self.values.as_slice()
    }

    /// Record an occurrence of a flag.
    pub fn increment(&mut self) {
        self.flags += 1;
    }

    /// Decode `token` into a value of the kind of this option.
    ///
    /// Flags take no values, so decoding for them is a programming error.
    pub fn decode(&self, token: &'args str) -> Result<Value<'args>, Error<'args>> {
        match self.kind {
            Kind::Flag => unreachable!("flags take no values"),
            Kind::String => Ok(Value::String(token)),
            Kind::Integer => parse_int(token).map(Value::Integer),
            Kind::Float => parse_float(token).map(Value::Float),
        }
    }

    /// Record an occurrence with the given value.
    pub fn append(&mut self, value: Value<'args>) -> Result<(), mem::Exhausted> {
        debug_assert_eq!(value.kind(), self.kind);
        self.values.push(value)
    }
}
