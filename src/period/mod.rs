//! Multi-period driver and its configuration (C5, C6).

pub mod config;
pub mod driver;
pub mod generator;

pub use config::RunConfig;
pub use driver::{run_simulation, AggregateSummary, PeriodOutput, PeriodSummary, RunOutput};
pub use generator::{Catalog, DefaultGenerator, ParticipantGenerator, StaticCatalog};
