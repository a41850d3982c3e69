//! Exact-decimal betting lines.
//!
//! A line (the "condition" of a bet) is always handled as a
//! `rust_decimal::Decimal` and crosses every boundary as a string, so
//! quarter steps never pick up binary floating-point drift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::error::LineError;
use crate::types::OddType;

/// Distance from a quarter line to each of its two half-lines.
pub const QUARTER: Decimal = dec!(0.25);

/// Largest accepted line magnitude at the string boundary.
pub const MAX_LINE: Decimal = dec!(1000000);

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// A handicap or goal-total line, stored in canonical (normalized) form.
///
/// Canonical form has no trailing zeros and no negative zero, so
/// `"-0.50"`, `"-0.5"` and `"-.5"` all compare, hash and print the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Line(Decimal);

impl Line {
    pub const ZERO: Line = Line(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value.normalize())
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self::new(self.0.abs())
    }

    /// Whether the fractional part is `.25` or `.75`.
    ///
    /// Such a line is settled as two adjacent half-lines.
    pub fn is_quarter(&self) -> bool {
        match self.0.checked_mul(dec!(4)) {
            Some(quarters) => quarters.fract().is_zero() && !(quarters % dec!(2)).is_zero(),
            None => false,
        }
    }

    /// The sub-lines this line settles against: `[line - 0.25, line + 0.25]`
    /// for a quarter line, `[line]` otherwise.
    pub fn sub_lines(&self) -> Vec<Line> {
        if !self.is_quarter() {
            return vec![*self];
        }
        match (self.0.checked_sub(QUARTER), self.0.checked_add(QUARTER)) {
            (Some(lower), Some(upper)) => vec![Self::new(lower), Self::new(upper)],
            _ => vec![*self],
        }
    }

    /// Text with an explicit `+` on strictly positive values.
    pub fn signed_text(&self) -> String {
        if self.is_positive() {
            format!("+{self}")
        } else {
            self.to_string()
        }
    }

    /// Display text for a bet direction: signed for handicaps, bare otherwise.
    pub fn display_for(&self, odd_type: OddType) -> String {
        if odd_type.is_handicap() {
            self.signed_text()
        } else {
            self.to_string()
        }
    }

    /// Sign of `score_for + self - score_against`.
    ///
    /// A line too large to add to a score decides the comparison by its own sign.
    pub fn compare_scores(&self, score_for: u64, score_against: u64) -> Ordering {
        match Decimal::from(score_for).checked_add(self.0) {
            Some(lhs) => lhs.cmp(&Decimal::from(score_against)),
            None => self.0.cmp(&Decimal::ZERO),
        }
    }

    /// Parse-time bound check.
    fn bounded(value: Decimal, input: &str) -> Result<Self, LineError> {
        if value.abs() > MAX_LINE {
            return Err(LineError::Invalid {
                input: input.to_string(),
                reason: format!("magnitude exceeds {MAX_LINE}"),
            });
        }
        Ok(Self::new(value))
    }
}

/// Render `line` the way it is shown next to a bet of `odd_type`.
pub fn format_line(line: &Line, odd_type: OddType) -> String {
    line.display_for(odd_type)
}

impl From<Decimal> for Line {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Line {
    fn from(value: i64) -> Self {
        Self::new(Decimal::from(value))
    }
}

impl Neg for Line {
    type Output = Line;

    fn neg(self) -> Line {
        Line::new(-self.0)
    }
}

impl Add for Line {
    type Output = Line;

    fn add(self, rhs: Line) -> Line {
        Line::new(self.0 + rhs.0)
    }
}

impl Sub for Line {
    type Output = Line;

    fn sub(self, rhs: Line) -> Line {
        Line::new(self.0 - rhs.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Line {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LineError::Empty);
        }
        let value = Decimal::from_str(trimmed).map_err(|e| LineError::Invalid {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Line::bounded(value, s)
    }
}

// ---------------------------------------------------------------------------
// Serde: lines travel as strings
// ---------------------------------------------------------------------------

impl Serialize for Line {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct LineVisitor;

impl<'de> Visitor<'de> for LineVisitor {
    type Value = Line;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal line as a string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Line, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Line, E> {
        Line::bounded(Decimal::from(v), &v.to_string()).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Line, E> {
        Line::bounded(Decimal::from(v), &v.to_string()).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Line {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LineVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
