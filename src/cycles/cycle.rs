use crate::core::ids::ParticipantId;
use crate::core::participant::Participant;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_string().parse::<f64>().unwrap_or(0.0)
}

/// A closed rotation of items among 2 or 3 participants.
///
/// Modeled as a tagged variant with a fixed-size member array rather
/// than a `Vec` sized "up to 3", so the cycle length is structurally
/// part of the type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Cycle {
    Two {
        members: [ParticipantId; 2],
        cash_flows: [Decimal; 2],
        total_item_value: Decimal,
        total_cash_movement: Decimal,
        value_efficiency: f64,
        fairness_score: f64,
        canonical_id: String,
    },
    Three {
        members: [ParticipantId; 3],
        cash_flows: [Decimal; 3],
        total_item_value: Decimal,
        total_cash_movement: Decimal,
        value_efficiency: f64,
        fairness_score: f64,
        canonical_id: String,
    },
}

impl Cycle {
    /// Build a cycle from participants in hand-off order
    /// (`members[t]` hands its item to `members[(t+1) % k]`).
    pub fn from_members(members_in_order: &[&Participant]) -> Cycle {
        let k = members_in_order.len();
        debug_assert!(k == 2 || k == 3, "cycles are length 2 or 3 only");

        let values: Vec<Decimal> = members_in_order.iter().map(|p| p.item_value()).collect();
        let ids: Vec<ParticipantId> = members_in_order
            .iter()
            .map(|p| p.participant_id().clone())
            .collect();

        let cash_flows: Vec<Decimal> = (0..k)
            .map(|t| values[t] - values[(t + 1) % k])
            .collect();

        let total_item_value: Decimal = values.iter().copied().sum();
        let total_cash_movement: Decimal = cash_flows.iter().map(|c| c.abs()).sum();

        let value_efficiency = if total_item_value + total_cash_movement > Decimal::ZERO {
            decimal_to_f64(total_item_value) / decimal_to_f64(total_item_value + total_cash_movement)
        } else {
            0.0
        };

        let fairness_score = fairness(&values);
        let canonical_id = canonical_rotation(&ids).join(">");

        match k {
            2 => Cycle::Two {
                members: [ids[0].clone(), ids[1].clone()],
                cash_flows: [cash_flows[0], cash_flows[1]],
                total_item_value,
                total_cash_movement,
                value_efficiency,
                fairness_score,
                canonical_id,
            },
            3 => Cycle::Three {
                members: [ids[0].clone(), ids[1].clone(), ids[2].clone()],
                cash_flows: [cash_flows[0], cash_flows[1], cash_flows[2]],
                total_item_value,
                total_cash_movement,
                value_efficiency,
                fairness_score,
                canonical_id,
            },
            _ => unreachable!("cycles are length 2 or 3 only"),
        }
    }

    pub fn members(&self) -> &[ParticipantId] {
        match self {
            Cycle::Two { members, .. } => members,
            Cycle::Three { members, .. } => members,
        }
    }

    pub fn cash_flows(&self) -> &[Decimal] {
        match self {
            Cycle::Two { cash_flows, .. } => cash_flows,
            Cycle::Three { cash_flows, .. } => cash_flows,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Cycle::Two { .. } => 2,
            Cycle::Three { .. } => 3,
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn total_item_value(&self) -> Decimal {
        match self {
            Cycle::Two {
                total_item_value, ..
            }
            | Cycle::Three {
                total_item_value, ..
            } => *total_item_value,
        }
    }

    pub fn total_cash_movement(&self) -> Decimal {
        match self {
            Cycle::Two {
                total_cash_movement,
                ..
            }
            | Cycle::Three {
                total_cash_movement,
                ..
            } => *total_cash_movement,
        }
    }

    pub fn value_efficiency(&self) -> f64 {
        match self {
            Cycle::Two {
                value_efficiency, ..
            }
            | Cycle::Three {
                value_efficiency, ..
            } => *value_efficiency,
        }
    }

    pub fn fairness_score(&self) -> f64 {
        match self {
            Cycle::Two { fairness_score, .. } | Cycle::Three { fairness_score, .. } => {
                *fairness_score
            }
        }
    }

    pub fn canonical_id(&self) -> &str {
        match self {
            Cycle::Two { canonical_id, .. } | Cycle::Three { canonical_id, .. } => canonical_id,
        }
    }

    /// Sum of cash flows; must be zero (invariant 1, up to fixed-point rounding).
    pub fn cash_flow_sum(&self) -> Decimal {
        self.cash_flows().iter().copied().sum()
    }
}

/// `1 − σ/μ` of the cycle's item values, clamped to 0 when the mean is zero.
fn fairness(values: &[Decimal]) -> f64 {
    let n = values.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let floats: Vec<f64> = values.iter().copied().map(decimal_to_f64).collect();
    let mean: f64 = floats.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance: f64 = floats.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();
    (1.0 - stddev / mean).max(0.0)
}

/// Minimum rotation of `ids` by participant id, used to deduplicate
/// rotations of the same underlying cycle.
fn canonical_rotation(ids: &[ParticipantId]) -> Vec<String> {
    let n = ids.len();
    let strs: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    let mut best = strs.clone();
    for i in 1..n {
        let rotated: Vec<String> = strs[i..].iter().chain(strs[..i].iter()).cloned().collect();
        if rotated < best {
            best = rotated;
        }
    }
    best
}
