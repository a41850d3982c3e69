//! Settlement of handicap, goal-total and draw bets against a final score.
//!
//! Every function here is pure: the same line, direction and snapshot
//! always produce the same result, with no hidden state.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use tracing::debug;

use crate::error::LineError;
use crate::line::Line;
use crate::types::{MatchScore, OddInfo, OddType, Period, Selection, Variety};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a bet from the backed side's perspective.
///
/// Serialized as the signed integer `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Loss,
    Push,
    Win,
}

impl Outcome {
    pub fn from_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Push,
            Ordering::Greater => Outcome::Win,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Outcome::Loss => -1,
            Outcome::Push => 0,
            Outcome::Win => 1,
        }
    }

    pub fn from_i8(v: i8) -> Option<Self> {
        match v {
            -1 => Some(Outcome::Loss),
            0 => Some(Outcome::Push),
            1 => Some(Outcome::Win),
            _ => None,
        }
    }
}

impl Neg for Outcome {
    type Output = Outcome;

    fn neg(self) -> Outcome {
        match self {
            Outcome::Loss => Outcome::Win,
            Outcome::Push => Outcome::Push,
            Outcome::Win => Outcome::Loss,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Loss => write!(f, "loss"),
            Outcome::Push => write!(f, "push"),
            Outcome::Win => write!(f, "win"),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = i8::deserialize(deserializer)?;
        Outcome::from_i8(v)
            .ok_or_else(|| de::Error::custom(format!("outcome must be -1, 0 or 1, got {v}")))
    }
}

/// A determined settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub result: Outcome,
    /// `"home:away"` for handicap and draw bets, the combined total for over/under.
    pub score: String,
    pub score1: u32,
    pub score2: u32,
}

// ---------------------------------------------------------------------------
// Line arithmetic
// ---------------------------------------------------------------------------

/// Settle `line` for the side scoring `score_for` against `score_against`.
///
/// Each sub-line contributes the sign of `score_for + sub - score_against`;
/// the sum is reduced back to a sign. For a quarter line that collapses
/// push+win to a win, push+loss to a loss, and win+loss to a push.
pub fn compute_line_result(line: &Line, score_for: u64, score_against: u64) -> Outcome {
    let net: i32 = line
        .sub_lines()
        .iter()
        .map(|sub| match sub.compare_scores(score_for, score_against) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        })
        .sum();
    Outcome::from_ordering(net.cmp(&0))
}

/// The opposite bet on the same market: `ah1`/`ah2` swap with the line
/// negated, `over`/`under` swap with the line kept, `draw` is unchanged.
pub fn reverse_direction(selection: Selection) -> Selection {
    let condition = if selection.odd_type.is_handicap() {
        -selection.condition
    } else {
        selection.condition
    };
    Selection::new(selection.odd_type.opposite(), condition)
}

impl Selection {
    pub fn reversed(&self) -> Selection {
        reverse_direction(*self)
    }
}

// ---------------------------------------------------------------------------
// Settler
// ---------------------------------------------------------------------------

/// Which snapshot fields must be recorded before a bet can settle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Full-match goal bets also wait for the full-match corner fields.
    #[default]
    Legacy,
    /// Only the score pair a bet is settled on has to be present.
    Strict,
}

/// Settles bets against match snapshots under a [`FieldPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Settler {
    policy: FieldPolicy,
}

impl Settler {
    pub fn new(policy: FieldPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FieldPolicy {
        self.policy
    }

    fn score_pair(&self, variety: Variety, period: Period, snapshot: &MatchScore) -> Option<(u32, u32)> {
        if self.policy == FieldPolicy::Legacy
            && variety == Variety::Goal
            && period == Period::RegularTime
            && (snapshot.corner1.is_none() || snapshot.corner2.is_none())
        {
            return None;
        }
        snapshot.pair(variety, period)
    }

    /// Settle one bet. `None` means undetermined: a required score field
    /// has not been recorded yet. `line` is ignored for `draw`.
    pub fn settle(
        &self,
        odd_type: OddType,
        variety: Variety,
        period: Period,
        line: &Line,
        snapshot: &MatchScore,
    ) -> Option<SettlementResult> {
        let Some((home, away)) = self.score_pair(variety, period, snapshot) else {
            debug!(%odd_type, %variety, %period, "Score fields missing, undetermined");
            return None;
        };

        let head_to_head = format!("{home}:{away}");
        let (home_score, away_score) = (u64::from(home), u64::from(away));
        let total = home_score + away_score;
        let (result, score) = match odd_type {
            OddType::Ah1 => (compute_line_result(line, home_score, away_score), head_to_head),
            OddType::Ah2 => (compute_line_result(line, away_score, home_score), head_to_head),
            OddType::Over => (compute_line_result(&-*line, total, 0), total.to_string()),
            OddType::Under => (-compute_line_result(&-*line, total, 0), total.to_string()),
            OddType::Draw => {
                let result = if home == away { Outcome::Win } else { Outcome::Loss };
                (result, head_to_head)
            }
        };

        debug!(%odd_type, %variety, %period, %line, %score, %result, "Bet settled");
        Some(SettlementResult {
            result,
            score,
            score1: home,
            score2: away,
        })
    }

    pub fn settle_info(&self, info: &OddInfo, snapshot: &MatchScore) -> Option<SettlementResult> {
        self.settle(info.odd_type, info.variety, info.period, &info.condition, snapshot)
    }

    /// Settle from wire strings.
    ///
    /// An unrecognised direction, variety or period is undetermined
    /// (`Ok(None)`); a malformed line is a caller error. The line of a
    /// `draw` bet is never parsed.
    pub fn settle_raw(
        &self,
        odd_type: &str,
        variety: &str,
        period: &str,
        condition: &str,
        snapshot: &MatchScore,
    ) -> Result<Option<SettlementResult>, LineError> {
        let (Ok(odd_type), Ok(variety), Ok(period)) = (
            odd_type.parse::<OddType>(),
            variety.parse::<Variety>(),
            period.parse::<Period>(),
        ) else {
            debug!(odd_type, variety, period, "Unrecognised bet fields, undetermined");
            return Ok(None);
        };

        let line = match odd_type {
            OddType::Draw => Line::ZERO,
            _ => condition.parse::<Line>()?,
        };
        Ok(self.settle(odd_type, variety, period, &line, snapshot))
    }
}

/// Settle one bet under the default [`FieldPolicy::Legacy`].
pub fn settle_odd(
    odd_type: OddType,
    variety: Variety,
    period: Period,
    line: &Line,
    snapshot: &MatchScore,
) -> Option<SettlementResult> {
    Settler::default().settle(odd_type, variety, period, line, snapshot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
