//! Selectable line ladders.
//!
//! Lines are enumerated by stepping an exact decimal counter. Each ladder
//! emits a value and only then checks the upper bound, so the last entry is
//! the first value past the nominal maximum (`10.25` for a `-10..10`
//! ladder).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LadderError;
use crate::line::{Line, MAX_LINE};
use crate::types::OddType;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Upper bound on the entries of any one ladder.
pub const MAX_LADDER_ENTRIES: u32 = 10_000;

/// Ladder bounds. Defaults match the admin selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    pub handicap_min: Line,
    pub handicap_max: Line,
    pub total_min: Line,
    pub total_max: Line,
    pub step: Line,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            handicap_min: Line::new(dec!(-10)),
            handicap_max: Line::new(dec!(10)),
            total_min: Line::new(dec!(0.25)),
            total_max: Line::new(dec!(15)),
            step: Line::new(dec!(0.25)),
        }
    }
}

impl LadderConfig {
    pub fn validate(&self) -> Result<(), LadderError> {
        if !self.step.is_positive() {
            return Err(LadderError::NonPositiveStep(self.step.to_string()));
        }
        let bounds = [
            ("handicap_min", self.handicap_min),
            ("handicap_max", self.handicap_max),
            ("total_min", self.total_min),
            ("total_max", self.total_max),
            ("step", self.step),
        ];
        for (field, value) in bounds {
            if value.value().abs() > MAX_LINE {
                return Err(LadderError::OutOfRange {
                    field,
                    value: value.to_string(),
                });
            }
        }
        check_range("handicap", self.handicap_min, self.handicap_max, self.step)?;
        check_range("total", self.total_min, self.total_max, self.step)?;
        Ok(())
    }
}

fn check_range(range: &'static str, min: Line, max: Line, step: Line) -> Result<(), LadderError> {
    if min > max {
        return Err(LadderError::InvertedRange {
            range,
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    let steps = (max.value() - min.value()).checked_div(step.value());
    match steps {
        Some(n) if n <= Decimal::from(MAX_LADDER_ENTRIES - 2) => Ok(()),
        _ => Err(LadderError::TooManyEntries {
            range,
            limit: MAX_LADDER_ENTRIES,
        }),
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// One entry of a selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOption {
    pub value: Line,
    pub label: String,
    pub negative: bool,
}

impl LineOption {
    fn bare(value: Line) -> Self {
        Self {
            value,
            label: value.to_string(),
            negative: value.is_negative(),
        }
    }

    fn for_direction(value: Line, odd_type: OddType) -> Self {
        Self {
            value,
            label: value.display_for(odd_type),
            negative: value.is_negative(),
        }
    }
}

/// Step from `start` by `step`, stopping after the first value above `end`.
///
/// `step` must be positive.
pub fn step_range(start: Line, end: Line, step: Line) -> Vec<Line> {
    let mut out = Vec::new();
    let mut num: Decimal = start.value();
    loop {
        out.push(Line::new(num));
        if num > end.value() {
            break;
        }
        match num.checked_add(step.value()) {
            Some(next) if next > num => num = next,
            _ => break,
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Ladder
// ---------------------------------------------------------------------------

/// Precomputed selection lists.
#[derive(Debug, Clone)]
pub struct Ladder {
    conditions: Vec<LineOption>,
    handicaps: Vec<LineOption>,
    totals: Vec<LineOption>,
}

impl Ladder {
    pub fn new(config: &LadderConfig) -> Result<Self, LadderError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &LadderConfig) -> Self {
        let handicap_values = step_range(config.handicap_min, config.handicap_max, config.step);
        let conditions: Vec<_> = handicap_values.iter().copied().map(LineOption::bare).collect();
        let handicaps: Vec<_> = handicap_values
            .into_iter()
            .map(|v| LineOption::for_direction(v, OddType::Ah1))
            .collect();
        let totals: Vec<_> = step_range(config.total_min, config.total_max, config.step)
            .into_iter()
            .map(LineOption::bare)
            .collect();

        debug!(
            conditions = conditions.len(),
            handicaps = handicaps.len(),
            totals = totals.len(),
            "Ladder built"
        );

        Self {
            conditions,
            handicaps,
            totals,
        }
    }

    /// Raw values over the handicap domain, tagged by sign.
    pub fn conditions(&self) -> &[LineOption] {
        &self.conditions
    }

    /// Handicap values labelled with an explicit sign.
    pub fn handicaps(&self) -> &[LineOption] {
        &self.handicaps
    }

    /// Goal-total values.
    pub fn totals(&self) -> &[LineOption] {
        &self.totals
    }

    /// The list offered for a direction: totals for over/under, handicaps otherwise.
    pub fn options_for(&self, odd_type: Option<OddType>) -> &[LineOption] {
        match odd_type {
            Some(t) if t.is_total() => &self.totals,
            _ => &self.handicaps,
        }
    }
}

impl Default for Ladder {
    fn default() -> Self {
        Self::build(&LadderConfig::default())
    }
}

/// Replacement for the current selection after switching to `odd_type`.
///
/// Goal totals cannot be negative or zero: a negative selection becomes its
/// absolute value and zero becomes `0.25`. Returns `None` when the current
/// value can stay.
pub fn coerce_selection(odd_type: OddType, current: Option<&Line>) -> Option<Line> {
    let current = current?;
    if !odd_type.is_total() {
        return None;
    }
    if current.is_negative() {
        Some(current.abs())
    } else if current.is_zero() {
        Some(Line::new(dec!(0.25)))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
