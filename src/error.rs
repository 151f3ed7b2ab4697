//! Error types for the exploration engine.
//!
//! Every failure is recoverable and propagates synchronously to the caller; the engine
//! never retries internally, and the recorder is never invoked before a decision has been
//! fully validated (no partial external effects).

use thiserror::Error;

/// Coarse failure taxonomy over [`ExploreError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A caller-supplied parameter is out of its documented domain.
    InvalidArgument,
    /// A policy produced an action ranking that is not a permutation of `1..=n`.
    InvalidActionSet,
    /// A probability distribution cannot support the requested operation.
    DegenerateDistribution,
}

/// Errors produced by explorers and distribution-safety utilities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExploreError {
    #[error("number of actions must be positive")]
    ZeroActions,

    #[error("action list has length {got}, expected {expected}")]
    ActionLengthMismatch { expected: u32, got: usize },

    #[error("epsilon {0} is outside [0, 1]")]
    EpsilonOutOfRange(f32),

    #[error("lambda {0} is not finite")]
    LambdaNotFinite(f32),

    #[error("scorer returned {got} scores, expected {expected}")]
    ScoreLengthMismatch { expected: u32, got: usize },

    #[error("sequence lengths differ: {expected} vs {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("bootstrap requires at least one bag")]
    NoBags,

    #[error("weight {weight} at index {index} is negative")]
    NegativeWeight { index: usize, weight: f32 },

    #[error("total weight is zero")]
    ZeroTotalWeight,

    #[error("top action index {top_action} is out of range for {n} actions")]
    TopActionOutOfRange { top_action: u32, n: usize },

    #[error("action {action} is outside [1, {n}]")]
    ActionOutOfRange { action: u32, n: u32 },

    #[error("action {0} appears more than once")]
    DuplicateAction(u32),

    #[error("weight at index {index} is exactly 1.0 with multiple candidates remaining")]
    UnitWeight { index: usize },

    #[error("minimum-probability floor is infeasible (touched mass {touched_mass})")]
    FloorInfeasible { touched_mass: f32 },
}

impl ExploreError {
    /// The taxonomy bucket this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroActions
            | Self::ActionLengthMismatch { .. }
            | Self::EpsilonOutOfRange(_)
            | Self::LambdaNotFinite(_)
            | Self::ScoreLengthMismatch { .. }
            | Self::LengthMismatch { .. }
            | Self::NoBags
            | Self::NegativeWeight { .. }
            | Self::ZeroTotalWeight
            | Self::TopActionOutOfRange { .. } => ErrorKind::InvalidArgument,
            Self::ActionOutOfRange { .. } | Self::DuplicateAction(_) => ErrorKind::InvalidActionSet,
            Self::UnitWeight { .. } | Self::FloorInfeasible { .. } => {
                ErrorKind::DegenerateDistribution
            }
        }
    }
}
