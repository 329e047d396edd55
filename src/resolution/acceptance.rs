use serde::{Deserialize, Serialize};

/// Piecewise-linear acceptance model (§4.4): a base rate keyed on
/// `value_efficiency`, plus a fairness-keyed boost, clamped to [0, 1].
///
/// Bands are `(upper_bound_exclusive, value)` pairs in ascending order;
/// the final band applies to everything at or above the last bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptanceThresholds {
    base_bands: Vec<(f64, f64)>,
    base_default: f64,
    boost_bands: Vec<(f64, f64)>,
    boost_default: f64,
}

impl Default for AcceptanceThresholds {
    fn default() -> Self {
        Self {
            base_bands: vec![(0.80, 0.10), (0.8338, 0.50), (0.86, 0.65), (0.898, 0.75)],
            base_default: 0.85,
            boost_bands: vec![(0.7469, 0.00), (0.7888, 0.03), (0.8509, 0.08), (0.9, 0.12)],
            boost_default: 0.15,
        }
    }
}

impl AcceptanceThresholds {
    fn lookup(bands: &[(f64, f64)], default: f64, x: f64) -> f64 {
        for (upper, value) in bands {
            if x < *upper {
                return *value;
            }
        }
        default
    }

    /// `p_accept` for a cycle with the given `value_efficiency` and
    /// `fairness_score`, clamped to [0, 1].
    pub fn compute_p_accept(&self, value_efficiency: f64, fairness_score: f64) -> f64 {
        let base = Self::lookup(&self.base_bands, self.base_default, value_efficiency);
        let boost = Self::lookup(&self.boost_bands, self.boost_default, fairness_score);
        (base + boost).clamp(0.0, 1.0)
    }
}
