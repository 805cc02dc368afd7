//! Fixture sources, tried by the resolver in priority order.

pub mod generated;
pub mod manual;
pub mod squiggle;

use crate::model::fixture::SourceTag;
use crate::model::raw::RawRound;

pub use generated::GeneratedSource;
pub use manual::ManualSource;
pub use squiggle::SquiggleSource;

/// Why a source produced no round.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceFailure {
    /// The source simply has nothing for this key. Routine, not a fault.
    #[error("no entry for this season/round")]
    Absent,

    #[error("malformed source data: {reason}")]
    Malformed { reason: String },

    #[error("source unavailable: {reason}")]
    Unavailable { reason: String },
}

impl SourceFailure {
    pub fn malformed(reason: impl Into<String>) -> Self {
        SourceFailure::Malformed { reason: reason.into() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        SourceFailure::Unavailable { reason: reason.into() }
    }
}

/// A provider of raw fixtures for one season/round.
pub trait FixtureSource: Send + Sync {
    /// Tag recorded against rounds this source produces.
    fn tag(&self) -> SourceTag;

    fn fetch(&self, season: i32, round: u32) -> Result<RawRound, SourceFailure>;
}
