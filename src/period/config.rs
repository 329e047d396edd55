use crate::resolution::AcceptanceThresholds;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Run configuration (§6). Deserialized from JSON; any field absent from
/// the input falls back to its value in [`RunConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub initial_count: u32,
    pub growth_rate: f64,
    pub num_periods: u32,
    pub catalog_path: Option<String>,
    pub seed: u64,
    pub max_cycles_per_period: usize,
    pub acceptance_thresholds: AcceptanceThresholds,
    pub enumerate_both_3cycle_orientations: bool,
    pub run_root: String,
    pub max_edges_per_period: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_count: 15,
            growth_rate: 0.15,
            num_periods: 12,
            catalog_path: None,
            seed: default_seed(),
            max_cycles_per_period: 1000,
            acceptance_thresholds: AcceptanceThresholds::default(),
            enumerate_both_3cycle_orientations: false,
            run_root: "./runs/default".to_string(),
            max_edges_per_period: 2_000_000,
        }
    }
}

fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl RunConfig {
    /// Load from a JSON file, falling back to defaults for absent fields.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, std::io::Error> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Participants to admit at `period_index` (1-based), per §4.5 step 1.
    pub fn new_count_for_period(&self, period_index: u32) -> u32 {
        let factor = (1.0 + self.growth_rate).powi(period_index as i32 - 1);
        (self.initial_count as f64 * factor).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_spec() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.initial_count, 15);
        assert_eq!(cfg.num_periods, 12);
        assert!(!cfg.enumerate_both_3cycle_orientations);
    }

    #[test]
    fn test_growth_schedule_matches_zero_growth() {
        let mut cfg = RunConfig::default();
        cfg.growth_rate = 0.0;
        cfg.initial_count = 10;
        assert_eq!(cfg.new_count_for_period(1), 10);
        assert_eq!(cfg.new_count_for_period(5), 10);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let cfg: RunConfig = serde_json::from_str(r#"{"initial_count": 42}"#).unwrap();
        assert_eq!(cfg.initial_count, 42);
        assert_eq!(cfg.num_periods, 12);
    }
}
