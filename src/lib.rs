//! HANDICAP: Asian-handicap and goal-line settlement engine
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod error;
pub mod line;
pub mod types;
pub mod settlement;
pub mod ladder;
pub mod batch;
pub mod config;
pub mod storage;

pub use error::{LadderError, LineError, UnknownValue};
pub use ladder::{coerce_selection, Ladder, LadderConfig, LineOption};
pub use line::{format_line, Line};
pub use settlement::{
    compute_line_result, reverse_direction, settle_odd, FieldPolicy, Outcome, SettlementResult,
    Settler,
};
pub use types::{MatchScore, OddInfo, OddType, Period, Selection, Variety};
