use crate::core::ids::ParticipantId;
use crate::core::participant::{Participant, Status};
use crate::cycles::Cycle;
use crate::period::{AggregateSummary, PeriodSummary};
use crate::resolution::{ExecutedCycle, RejectedCycle};
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// One row of `participants.tab`.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantRow {
    pub participant_id: String,
    pub item_id: String,
    pub item_value: String,
    pub floor_value: String,
    pub max_top_up: String,
    pub admission_period: u32,
    pub status: String,
    pub proposals_seen: u32,
    pub unique_end_states: usize,
    pub executed: bool,
    pub trade_id: String,
    pub cycle_id: String,
}

impl From<&Participant> for ParticipantRow {
    fn from(p: &Participant) -> Self {
        Self {
            participant_id: p.participant_id().to_string(),
            item_id: p.item_id().to_string(),
            item_value: p.item_value().to_string(),
            floor_value: p.floor_value().to_string(),
            max_top_up: p.max_top_up().to_string(),
            admission_period: p.admission_period(),
            status: format!("{:?}", p.status()).to_lowercase(),
            proposals_seen: p.counters().proposals_seen,
            unique_end_states: p.counters().unique_end_state_count(),
            executed: p.counters().executed,
            trade_id: p
                .counters()
                .trade_id
                .map(|t| t.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            cycle_id: p.counters().cycle_id.clone().unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// One row of `executed_cycles.tab` / `rejected_cycles.tab` /
/// `all_candidate_cycles.tab`. The wide flat layout (`user_1, user_2,
/// user_3, received_watch_1, ...`) is preserved for backward
/// compatibility with downstream consumers; structured `Cycle`/
/// `Participant` values are converted here and only here.
#[derive(Debug, Clone, Serialize)]
pub struct CycleRow {
    pub loop_type: String,
    pub user_1: String,
    pub user_2: String,
    pub user_3: String,
    pub received_watch_1: String,
    pub received_watch_2: String,
    pub received_watch_3: String,
    pub cash_flow_1: String,
    pub cash_flow_2: String,
    pub cash_flow_3: String,
    pub total_item_value: String,
    pub total_cash_movement: String,
    pub value_efficiency: f64,
    pub fairness_score: f64,
    pub canonical_id: String,
    pub trade_id: String,
    pub period_executed: u32,
}

fn seat(values: &[String], i: usize) -> String {
    values.get(i).cloned().unwrap_or_default()
}

pub fn cycle_to_row(
    cycle: &Cycle,
    participants: &HashMap<ParticipantId, Participant>,
    trade_id: Option<u64>,
    period_executed: u32,
) -> CycleRow {
    let members = cycle.members();
    let k = members.len();
    let item_ids: Vec<String> = members
        .iter()
        .map(|id| {
            participants
                .get(id)
                .map(|p| p.item_id().to_string())
                .unwrap_or_default()
        })
        .collect();
    let users: Vec<String> = members.iter().map(|id| id.to_string()).collect();
    let received: Vec<String> = (0..k).map(|i| item_ids[(i + k - 1) % k].clone()).collect();
    let cash_flows: Vec<String> = cycle.cash_flows().iter().map(|c| c.to_string()).collect();

    CycleRow {
        loop_type: if k == 2 { "2-way".to_string() } else { "3-way".to_string() },
        user_1: seat(&users, 0),
        user_2: seat(&users, 1),
        user_3: seat(&users, 2),
        received_watch_1: seat(&received, 0),
        received_watch_2: seat(&received, 1),
        received_watch_3: seat(&received, 2),
        cash_flow_1: seat(&cash_flows, 0),
        cash_flow_2: seat(&cash_flows, 1),
        cash_flow_3: seat(&cash_flows, 2),
        total_item_value: cycle.total_item_value().to_string(),
        total_cash_movement: cycle.total_cash_movement().to_string(),
        value_efficiency: cycle.value_efficiency(),
        fairness_score: cycle.fairness_score(),
        canonical_id: cycle.canonical_id().to_string(),
        trade_id: trade_id.map(|t| t.to_string()).unwrap_or_else(|| "N/A".to_string()),
        period_executed,
    }
}

pub fn executed_rows(
    executed: &[ExecutedCycle],
    participants: &HashMap<ParticipantId, Participant>,
    period_executed: u32,
) -> Vec<CycleRow> {
    executed
        .iter()
        .map(|e| cycle_to_row(&e.cycle, participants, Some(e.trade_id), period_executed))
        .collect()
}

pub fn rejected_rows(
    rejected: &[RejectedCycle],
    participants: &HashMap<ParticipantId, Participant>,
    period_executed: u32,
) -> Vec<CycleRow> {
    rejected
        .iter()
        .map(|r| cycle_to_row(&r.cycle, participants, None, period_executed))
        .collect()
}

/// One row of `period_summary.tab`.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummaryRow {
    pub period: u32,
    pub start_active: usize,
    pub new_admitted: u32,
    pub total_pool: usize,
    pub executed_2: usize,
    pub executed_3: usize,
    pub total_executed: usize,
    pub participants_matched: usize,
    pub end_active: usize,
    pub downsampled: bool,
    pub cap_hit: bool,
}

impl From<&PeriodSummary> for PeriodSummaryRow {
    fn from(s: &PeriodSummary) -> Self {
        Self {
            period: s.period_index,
            start_active: s.start_active,
            new_admitted: s.new_admitted,
            total_pool: s.total_pool,
            executed_2: s.executed_2,
            executed_3: s.executed_3,
            total_executed: s.total_executed,
            participants_matched: s.participants_matched,
            end_active: s.end_active,
            downsampled: s.downsampled,
            cap_hit: s.cap_hit,
        }
    }
}

/// `aggregate_summary.tab`: one row, the whole run's totals.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateSummaryRow {
    pub total_participants_generated: u64,
    pub total_executed: usize,
    pub total_rejected: usize,
    pub total_2cycles: usize,
    pub total_3cycles: usize,
    pub total_cash_moved: String,
    pub total_item_value_moved: String,
    pub overall_match_rate: f64,
    pub final_active_count: usize,
}

impl From<&AggregateSummary> for AggregateSummaryRow {
    fn from(a: &AggregateSummary) -> Self {
        Self {
            total_participants_generated: a.total_participants_generated,
            total_executed: a.total_executed,
            total_rejected: a.total_rejected,
            total_2cycles: a.total_2cycles,
            total_3cycles: a.total_3cycles,
            total_cash_moved: a.total_cash_moved.to_string(),
            total_item_value_moved: a.total_item_value_moved.to_string(),
            overall_match_rate: a.overall_match_rate,
            final_active_count: a.final_active_count,
        }
    }
}

/// One row of `user_trade_log.tab`: a (participant, cycle-proposal) pair.
#[derive(Debug, Clone, Serialize)]
pub struct UserTradeLogRow {
    pub participant_id: String,
    pub period: u32,
    pub decision: String,
    pub cash_delta: String,
    pub item_held: String,
    pub item_would_receive: String,
    pub trade_id: String,
}

/// Flatten a period's executed and rejected cycles into one row per
/// (participant, proposal). Every member of an executed cycle accepted by
/// definition; for a rejected cycle a member's own decision is inferred from
/// its status at snapshot time — sticky-declined means it declined this
/// proposal, otherwise it accepted but the cycle failed on another seat.
pub fn user_trade_log_rows(
    executed: &[ExecutedCycle],
    rejected: &[RejectedCycle],
    participants: &HashMap<ParticipantId, Participant>,
    period: u32,
) -> Vec<UserTradeLogRow> {
    let mut rows = Vec::new();
    for exec in executed {
        push_proposal_rows(&mut rows, &exec.cycle, participants, period, Some(exec.trade_id), true);
    }
    for rej in rejected {
        push_proposal_rows(&mut rows, &rej.cycle, participants, period, None, false);
    }
    rows
}

fn push_proposal_rows(
    rows: &mut Vec<UserTradeLogRow>,
    cycle: &Cycle,
    participants: &HashMap<ParticipantId, Participant>,
    period: u32,
    trade_id: Option<u64>,
    all_accepted: bool,
) {
    let members = cycle.members();
    let k = members.len();
    let item_ids: Vec<String> = members
        .iter()
        .map(|id| {
            participants
                .get(id)
                .map(|p| p.item_id().to_string())
                .unwrap_or_default()
        })
        .collect();
    let cash_flows = cycle.cash_flows();

    for (i, id) in members.iter().enumerate() {
        let decision = if all_accepted {
            "accept".to_string()
        } else {
            match participants.get(id).map(|p| p.status()) {
                Some(Status::Declined) => "decline".to_string(),
                _ => "accept".to_string(),
            }
        };
        rows.push(UserTradeLogRow {
            participant_id: id.to_string(),
            period,
            decision,
            cash_delta: cash_flows[i].to_string(),
            item_held: item_ids[i].clone(),
            item_would_receive: item_ids[(i + k - 1) % k].clone(),
            trade_id: trade_id.map(|t| t.to_string()).unwrap_or_else(|| "N/A".to_string()),
        });
    }
}

fn tab_writer(path: impl AsRef<Path>) -> io::Result<csv::Writer<std::fs::File>> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
}

pub fn write_rows<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> io::Result<()> {
    let mut writer = tab_writer(path)?;
    for row in rows {
        writer.serialize(row).map_err(io::Error::from)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::ItemId;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn p(id: &str, item: &str, value: i64) -> Participant {
        Participant::new(
            ParticipantId::new(id),
            ItemId::new(item),
            rust_decimal::Decimal::from(value),
            dec!(1),
            dec!(1000),
            1,
        )
    }

    #[test]
    fn test_two_cycle_row_leaves_third_seat_blank() {
        let a = p("A", "X", 100);
        let b = p("B", "Y", 110);
        let cycle = Cycle::from_members(&[&a, &b]);
        let map: HashMap<ParticipantId, Participant> = [
            (a.participant_id().clone(), a),
            (b.participant_id().clone(), b),
        ]
        .into_iter()
        .collect();
        let row = cycle_to_row(&cycle, &map, Some(1), 1);
        assert_eq!(row.loop_type, "2-way");
        assert_eq!(row.user_3, "");
        assert_eq!(row.trade_id, "1");
    }

    #[test]
    fn test_rejected_row_has_na_trade_id() {
        let a = p("A", "X", 100);
        let b = p("B", "Y", 110);
        let cycle = Cycle::from_members(&[&a, &b]);
        let map: HashMap<ParticipantId, Participant> = [
            (a.participant_id().clone(), a),
            (b.participant_id().clone(), b),
        ]
        .into_iter()
        .collect();
        let row = cycle_to_row(&cycle, &map, None, 1);
        assert_eq!(row.trade_id, "N/A");
    }

    #[test]
    fn test_user_trade_log_marks_executed_members_as_accepted() {
        let a = p("A", "X", 100);
        let b = p("B", "Y", 110);
        let cycle = Cycle::from_members(&[&a, &b]);
        let map: HashMap<ParticipantId, Participant> = [
            (a.participant_id().clone(), a),
            (b.participant_id().clone(), b),
        ]
        .into_iter()
        .collect();
        let executed = vec![ExecutedCycle { cycle, trade_id: 7 }];
        let rows = user_trade_log_rows(&executed, &[], &map, 1);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.decision == "accept"));
        assert!(rows.iter().all(|r| r.trade_id == "7"));
    }

    #[test]
    fn test_write_rows_round_trips_as_tsv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("participants.tab");
        let a = p("A", "X", 100);
        let rows = vec![ParticipantRow::from(&a)];
        write_rows(&path, &rows).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("participant_id"));
        assert!(contents.contains('\t'));
    }
}
