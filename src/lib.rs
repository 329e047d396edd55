//! # trade-loop-engine
//!
//! Cycle matching and multi-period settlement engine for collectible
//! item trade loops.
//!
//! Given owners of uniquely-identified items declaring a floor value and a
//! cash top-up limit, this engine finds 2- and 3-party trade cycles where
//! every participant ends up strictly better off, simulates stochastic
//! acceptance and conflicting proposals, and rolls unmatched participants
//! into the next period.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: participant identity, status, counters
//! - **graph** — Constraint filtering and the directed trade graph
//! - **cycles** — Cycle representation and enumeration
//! - **resolution** — Stochastic acceptance and conflict resolution
//! - **period** — Multi-period driver and configuration
//! - **reporting** — Wide flat `.tab` export at the persistence boundary

pub mod core;
pub mod cycles;
pub mod error;
pub mod graph;
pub mod period;
pub mod reporting;
pub mod resolution;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::ids::{ItemId, ParticipantId};
    pub use crate::core::participant::{Participant, Status};
    pub use crate::cycles::Cycle;
    pub use crate::error::{Result, TradeLoopError};
    pub use crate::graph::trade_graph::TradeGraph;
    pub use crate::period::{run_simulation, RunConfig, RunOutput};
    pub use crate::resolution::AcceptanceThresholds;
}
