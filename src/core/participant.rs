use crate::core::ids::{ItemId, ParticipantId};
use crate::error::TradeLoopError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lifecycle state of a participant within the current run.
///
/// `Matched` is terminal: once set, a participant never reappears in
/// any subsequent cycle proposal. `Declined` is reset to `Active` at
/// the start of the next period (see the carry-over rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Matched,
    Declined,
}

impl Status {
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Status::Matched)
    }
}

/// Per-participant bookkeeping accumulated across cycle proposals.
///
/// Carried across periods for participants that are not matched, so a
/// participant's lifetime history survives carry-over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantCounters {
    /// Count of cycle proposals (executed or rejected) this participant appeared in.
    pub proposals_seen: u32,
    /// Distinct items this participant would have received across distinct proposals.
    #[serde(skip)]
    pub unique_end_states: HashSet<ItemId>,
    /// Whether this participant ultimately executed a trade.
    pub executed: bool,
    /// Identifier of the cycle that matched this participant, if any.
    pub trade_id: Option<u64>,
    pub cycle_id: Option<String>,
}

impl ParticipantCounters {
    pub fn unique_end_state_count(&self) -> usize {
        self.unique_end_states.len()
    }

    pub fn record_proposal(&mut self, would_receive: &ItemId) {
        self.proposals_seen += 1;
        self.unique_end_states.insert(would_receive.clone());
    }
}

/// A holder of exactly one tradable item, with declared floor and
/// top-up limits.
///
/// Created at admission and never mutated except for the one terminal
/// status transition described by [`Status`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    participant_id: ParticipantId,
    item_id: ItemId,
    item_value: Decimal,
    floor_value: Decimal,
    max_top_up: Decimal,
    admission_period: u32,
    status: Status,
    #[serde(flatten)]
    counters: ParticipantCounters,
}

impl Participant {
    pub fn new(
        participant_id: ParticipantId,
        item_id: ItemId,
        item_value: Decimal,
        floor_value: Decimal,
        max_top_up: Decimal,
        admission_period: u32,
    ) -> Self {
        Self {
            participant_id,
            item_id,
            item_value,
            floor_value,
            max_top_up,
            admission_period,
            status: Status::Active,
            counters: ParticipantCounters::default(),
        }
    }

    /// Validate the §3 invariants on field values.
    ///
    /// # Errors
    ///
    /// Returns [`TradeLoopError::InvalidParticipant`] if `item_value`
    /// or `floor_value` is not positive, or `max_top_up` is negative.
    pub fn validate(&self) -> Result<(), TradeLoopError> {
        if self.item_value <= Decimal::ZERO {
            return Err(TradeLoopError::InvalidParticipant {
                id: self.participant_id.to_string(),
                reason: format!("item_value must be positive, got {}", self.item_value),
            });
        }
        if self.floor_value <= Decimal::ZERO {
            return Err(TradeLoopError::InvalidParticipant {
                id: self.participant_id.to_string(),
                reason: format!("floor_value must be positive, got {}", self.floor_value),
            });
        }
        if self.max_top_up < Decimal::ZERO {
            return Err(TradeLoopError::InvalidParticipant {
                id: self.participant_id.to_string(),
                reason: format!("max_top_up must be non-negative, got {}", self.max_top_up),
            });
        }
        Ok(())
    }

    pub fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn item_value(&self) -> Decimal {
        self.item_value
    }

    pub fn floor_value(&self) -> Decimal {
        self.floor_value
    }

    pub fn max_top_up(&self) -> Decimal {
        self.max_top_up
    }

    pub fn admission_period(&self) -> u32 {
        self.admission_period
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn counters(&self) -> &ParticipantCounters {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut ParticipantCounters {
        &mut self.counters
    }

    /// Transition to `matched`. Terminal; never call on an already-matched participant.
    pub fn mark_matched(&mut self, trade_id: u64, cycle_id: impl Into<String>) {
        self.status = Status::Matched;
        self.counters.executed = true;
        self.counters.trade_id = Some(trade_id);
        self.counters.cycle_id = Some(cycle_id.into());
    }

    /// Transition to `declined`. Sticky for the remainder of the period's scan.
    pub fn mark_declined(&mut self) {
        self.status = Status::Declined;
    }

    /// Reset `declined` (and `active`) participants to `active` at a period boundary.
    pub fn reset_for_next_period(&mut self) {
        if !self.status.is_matched() {
            self.status = Status::Active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Participant {
        Participant::new(
            ParticipantId::new("U001_00001"),
            ItemId::new("W00001"),
            dec!(100),
            dec!(90),
            dec!(20),
            1,
        )
    }

    #[test]
    fn test_initial_status_is_active() {
        let p = sample();
        assert!(p.status().is_active());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_invalid_floor_rejected() {
        let p = Participant::new(
            ParticipantId::new("U001_00001"),
            ItemId::new("W00001"),
            dec!(100),
            dec!(0),
            dec!(20),
            1,
        );
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_negative_top_up_rejected() {
        let p = Participant::new(
            ParticipantId::new("U001_00001"),
            ItemId::new("W00001"),
            dec!(100),
            dec!(90),
            dec!(-1),
            1,
        );
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_mark_matched_is_terminal_and_sticky_across_reset() {
        let mut p = sample();
        p.mark_matched(1, "C0001");
        assert!(p.status().is_matched());
        p.reset_for_next_period();
        assert!(p.status().is_matched());
    }

    #[test]
    fn test_declined_resets_to_active() {
        let mut p = sample();
        p.mark_declined();
        assert_eq!(p.status(), Status::Declined);
        p.reset_for_next_period();
        assert!(p.status().is_active());
    }

    #[test]
    fn test_counters_track_distinct_end_states() {
        let mut p = sample();
        p.counters_mut().record_proposal(&ItemId::new("W00002"));
        p.counters_mut().record_proposal(&ItemId::new("W00002"));
        p.counters_mut().record_proposal(&ItemId::new("W00003"));
        assert_eq!(p.counters().proposals_seen, 3);
        assert_eq!(p.counters().unique_end_state_count(), 2);
    }
}
