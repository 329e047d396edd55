//! Foundational types: participant identity, status, and counters.

pub mod ids;
pub mod participant;
