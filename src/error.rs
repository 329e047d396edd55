use crate::core::ids::ParticipantId;
use thiserror::Error;

/// Errors surfaced by the trade loop engine.
///
/// Each variant corresponds to one failure mode described in the
/// engine's error handling policy. Fatal variants should abort the
/// run; `CycleCapExceeded` is carried informationally and does not,
/// by itself, fail anything.
#[derive(Debug, Error)]
pub enum TradeLoopError {
    #[error("invalid participant {id}: {reason}")]
    InvalidParticipant { id: String, reason: String },

    #[error("duplicate participant id: {0}")]
    DuplicateParticipantId(ParticipantId),

    #[error("trade graph has {edges} edges, exceeding the configured ceiling of {limit}")]
    GraphExceedsBudget { edges: usize, limit: usize },

    #[error("cycle enumeration hit the cap of {cap} candidate cycles")]
    CycleCapExceeded { cap: usize },

    #[error("resolver invariant violated: {0}")]
    InconsistentState(String),

    #[error("run cancelled by caller")]
    CancellationRequested,
}

pub type Result<T> = std::result::Result<T, TradeLoopError>;
