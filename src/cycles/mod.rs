//! Cycle representation and enumeration (C3).

pub mod cycle;
pub mod enumerator;

pub use cycle::Cycle;
pub use enumerator::{
    enumerate_cycles, shuffle_for_resolution, EnumerationConfig, EnumerationOutcome,
};
