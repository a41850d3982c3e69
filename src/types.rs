//! Shared types for the settlement engine.
//!
//! Wire names follow the stored bet records (`ah1`, `regularTime`, ...),
//! so every enum here round-trips through serde and `FromStr` unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownValue;
use crate::line::Line;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Bet direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddType {
    /// Home side after the handicap.
    Ah1,
    /// Away side after the handicap.
    Ah2,
    Over,
    Under,
    Draw,
}

impl OddType {
    pub const ALL: &'static [OddType] = &[
        OddType::Ah1,
        OddType::Ah2,
        OddType::Over,
        OddType::Under,
        OddType::Draw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OddType::Ah1 => "ah1",
            OddType::Ah2 => "ah2",
            OddType::Over => "over",
            OddType::Under => "under",
            OddType::Draw => "draw",
        }
    }

    /// Display label used by the admin screens.
    pub fn label(&self) -> &'static str {
        match self {
            OddType::Ah1 => "主胜",
            OddType::Ah2 => "客胜",
            OddType::Over => "大球",
            OddType::Under => "小球",
            OddType::Draw => "平局",
        }
    }

    pub fn is_handicap(&self) -> bool {
        matches!(self, OddType::Ah1 | OddType::Ah2)
    }

    pub fn is_total(&self) -> bool {
        matches!(self, OddType::Over | OddType::Under)
    }

    /// The opposite side of the same market. `Draw` has none and maps to itself.
    pub fn opposite(&self) -> Self {
        match self {
            OddType::Ah1 => OddType::Ah2,
            OddType::Ah2 => OddType::Ah1,
            OddType::Over => OddType::Under,
            OddType::Under => OddType::Over,
            OddType::Draw => OddType::Draw,
        }
    }
}

impl fmt::Display for OddType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OddType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OddType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownValue::new("odd type", s))
    }
}

/// What is being counted: goals or corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variety {
    Goal,
    Corner,
}

impl Variety {
    pub const ALL: &'static [Variety] = &[Variety::Goal, Variety::Corner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variety::Goal => "goal",
            Variety::Corner => "corner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variety::Goal => "进球",
            Variety::Corner => "角球",
        }
    }
}

impl fmt::Display for Variety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variety {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variety::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownValue::new("variety", s))
    }
}

/// Which part of the match a bet covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Full match.
    #[serde(rename = "regularTime")]
    RegularTime,
    /// First half.
    #[serde(rename = "period1")]
    Period1,
}

impl Period {
    pub const ALL: &'static [Period] = &[Period::RegularTime, Period::Period1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::RegularTime => "regularTime",
            Period::Period1 => "period1",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::RegularTime => "全场",
            Period::Period1 => "半场",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownValue::new("period", s))
    }
}

// ---------------------------------------------------------------------------
// Match score snapshot
// ---------------------------------------------------------------------------

/// Recorded scores of a match. A field is `None` until it has been recorded;
/// absence is never the same as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchScore {
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub corner1: Option<u32>,
    pub corner2: Option<u32>,
    pub score1_period1: Option<u32>,
    pub score2_period1: Option<u32>,
    pub corner1_period1: Option<u32>,
    pub corner2_period1: Option<u32>,
}

impl MatchScore {
    /// Full-time goals only.
    pub fn goals(score1: u32, score2: u32) -> Self {
        Self {
            score1: Some(score1),
            score2: Some(score2),
            ..Self::default()
        }
    }

    /// `(home, away)` for the given variety and period, if both are recorded.
    pub fn pair(&self, variety: Variety, period: Period) -> Option<(u32, u32)> {
        let (home, away) = match (variety, period) {
            (Variety::Goal, Period::RegularTime) => (self.score1, self.score2),
            (Variety::Goal, Period::Period1) => (self.score1_period1, self.score2_period1),
            (Variety::Corner, Period::RegularTime) => (self.corner1, self.corner2),
            (Variety::Corner, Period::Period1) => (self.corner1_period1, self.corner2_period1),
        };
        Some((home?, away?))
    }
}

// ---------------------------------------------------------------------------
// Bets
// ---------------------------------------------------------------------------

/// A direction together with its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "type")]
    pub odd_type: OddType,
    pub condition: Line,
}

impl Selection {
    pub fn new(odd_type: OddType, condition: Line) -> Self {
        Self { odd_type, condition }
    }

    pub fn display_condition(&self) -> String {
        self.condition.display_for(self.odd_type)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.odd_type, self.display_condition())
    }
}

/// A stored bet: line, market and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddInfo {
    pub condition: Line,
    pub variety: Variety,
    pub period: Period,
    #[serde(rename = "type")]
    pub odd_type: OddType,
}

impl OddInfo {
    pub fn selection(&self) -> Selection {
        Selection::new(self.odd_type, self.condition)
    }
}

impl fmt::Display for OddInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.period.label(),
            self.variety.label(),
            self.odd_type.label(),
            self.condition.display_for(self.odd_type),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_type_wire_names() {
        for t in OddType::ALL {
            assert_eq!(t.as_str().parse::<OddType>().unwrap(), *t);
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        assert!("AH1".parse::<OddType>().is_err());
        assert!("handicap".parse::<OddType>().is_err());
    }

    #[test]
    fn test_period_wire_names() {
        assert_eq!("regularTime".parse::<Period>().unwrap(), Period::RegularTime);
        assert_eq!("period1".parse::<Period>().unwrap(), Period::Period1);
        let p: Period = serde_json::from_str("\"regularTime\"").unwrap();
        assert_eq!(p, Period::RegularTime);
        assert!("period2".parse::<Period>().is_err());
    }

    #[test]
    fn test_opposite() {
        assert_eq!(OddType::Ah1.opposite(), OddType::Ah2);
        assert_eq!(OddType::Under.opposite(), OddType::Over);
        assert_eq!(OddType::Draw.opposite(), OddType::Draw);
    }

    #[test]
    fn test_labels() {
        assert_eq!(OddType::Ah1.label(), "主胜");
        assert_eq!(Variety::Corner.label(), "角球");
        assert_eq!(Period::Period1.label(), "半场");
    }

    #[test]
    fn test_pair_requires_both_sides() {
        let mut s = MatchScore::goals(2, 1);
        assert_eq!(s.pair(Variety::Goal, Period::RegularTime), Some((2, 1)));
        assert_eq!(s.pair(Variety::Corner, Period::RegularTime), None);
        s.corner1_period1 = Some(3);
        assert_eq!(s.pair(Variety::Corner, Period::Period1), None);
        s.corner2_period1 = Some(0);
        assert_eq!(s.pair(Variety::Corner, Period::Period1), Some((3, 0)));
    }

    #[test]
    fn test_match_score_null_is_absent() {
        let s: MatchScore =
            serde_json::from_str(r#"{"score1": 0, "score2": null}"#).unwrap();
        assert_eq!(s.score1, Some(0));
        assert_eq!(s.score2, None);
        assert_eq!(s.corner1, None);
    }

    #[test]
    fn test_odd_info_from_json() {
        let info: OddInfo = serde_json::from_str(
            r#"{"condition": "-0.25", "variety": "goal", "period": "period1", "type": "ah1"}"#,
        )
        .unwrap();
        assert_eq!(info.odd_type, OddType::Ah1);
        assert_eq!(info.period, Period::Period1);
        assert_eq!(info.selection().display_condition(), "-0.25");
        assert_eq!(info.to_string(), "半场 进球 主胜 -0.25");
    }
}
