use crate::core::ids::ParticipantId;
use crate::core::participant::Participant;
use crate::cycles::{enumerate_cycles, shuffle_for_resolution, Cycle, EnumerationConfig};
use crate::error::TradeLoopError;
use crate::graph::trade_graph::TradeGraph;
use crate::period::config::RunConfig;
use crate::period::generator::{Catalog, ParticipantGenerator};
use crate::resolution::{resolve, ExecutedCycle, RejectedCycle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Per-period bookkeeping (§4.5, "Persist per-period ... outputs" and
/// `period_summary.tab`'s columns).
#[derive(Debug, Clone)]
pub struct PeriodSummary {
    pub period_index: u32,
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

/// Everything one period produced.
#[derive(Debug, Clone)]
pub struct PeriodOutput {
    pub summary: PeriodSummary,
    pub executed: Vec<ExecutedCycle>,
    pub rejected: Vec<RejectedCycle>,
    pub participants_snapshot: Vec<Participant>,
}

/// Cross-period rollup (§4.6).
#[derive(Debug, Clone)]
pub struct AggregateSummary {
    pub total_participants_generated: u64,
    pub total_executed: usize,
    pub total_rejected: usize,
    pub total_2cycles: usize,
    pub total_3cycles: usize,
    pub total_cash_moved: Decimal,
    pub total_item_value_moved: Decimal,
    pub overall_match_rate: f64,
    pub final_active_count: usize,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub periods: Vec<PeriodOutput>,
    pub aggregate: AggregateSummary,
}

/// Run the full multi-period simulation described by `config` (§4.5).
///
/// `generator` admits new participants each period; `catalog` backs it.
/// A `DuplicateParticipantId` is treated as a per-period failure: the
/// period is skipped (carry-over state is left untouched) and the run
/// continues, per §7's policy for that error kind.
pub fn run_simulation(
    config: &RunConfig,
    generator: &dyn ParticipantGenerator,
    catalog: &dyn Catalog,
) -> Result<RunOutput, TradeLoopError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut trade_counter: u64 = 0;
    let mut carry_over: HashMap<ParticipantId, Participant> = HashMap::new();

    let mut periods = Vec::with_capacity(config.num_periods as usize);
    let mut total_participants_generated: u64 = 0;
    let mut total_2cycles = 0usize;
    let mut total_3cycles = 0usize;
    let mut total_cash_moved = Decimal::ZERO;
    let mut total_item_value_moved = Decimal::ZERO;
    let mut total_rejected = 0usize;
    let mut total_matched: u64 = 0;

    for period_index in 1..=config.num_periods {
        let start_active = carry_over.len();
        let new_count = config.new_count_for_period(period_index);
        let new_participants =
            generator.generate(new_count, period_index, catalog, &mut rng);
        total_participants_generated += new_participants.len() as u64;

        let mut active: Vec<Participant> = carry_over.values().cloned().collect();
        active.extend(new_participants);

        let mut duplicate = false;
        for p in &active {
            if active
                .iter()
                .filter(|q| q.participant_id() == p.participant_id())
                .count()
                > 1
            {
                duplicate = true;
                break;
            }
        }
        if duplicate {
            log::error!(
                "period {period_index}: duplicate participant id in active set, skipping period"
            );
            periods.push(PeriodOutput {
                summary: PeriodSummary {
                    period_index,
                    start_active,
                    new_admitted: new_count,
                    total_pool: active.len(),
                    executed_2: 0,
                    executed_3: 0,
                    total_executed: 0,
                    participants_matched: 0,
                    end_active: start_active,
                    downsampled: false,
                    cap_hit: false,
                },
                executed: Vec::new(),
                rejected: Vec::new(),
                participants_snapshot: Vec::new(),
            });
            continue;
        }

        let (active, graph, downsampled) =
            enforce_edge_budget(active, config.max_edges_per_period)?;
        let total_pool = active.len();

        let mut active_map: HashMap<ParticipantId, Participant> = active
            .into_iter()
            .map(|p| (p.participant_id().clone(), p))
            .collect();

        let enum_config = EnumerationConfig {
            max_cycles: config.max_cycles_per_period,
            enumerate_both_3cycle_orientations: config.enumerate_both_3cycle_orientations,
        };
        let outcome = enumerate_cycles(&graph, &active_map, &enum_config);
        if outcome.cap_hit {
            log::warn!(
                "period {period_index}: cycle enumeration capped at {}",
                config.max_cycles_per_period
            );
        }
        let mut candidate_cycles: Vec<Cycle> = outcome.cycles;
        shuffle_for_resolution(&mut candidate_cycles, &mut rng);

        let resolution = resolve(
            candidate_cycles,
            &mut active_map,
            &config.acceptance_thresholds,
            &mut trade_counter,
            &mut rng,
        )?;

        let executed_2 = resolution.executed.iter().filter(|e| e.cycle.len() == 2).count();
        let executed_3 = resolution.executed.iter().filter(|e| e.cycle.len() == 3).count();
        let participants_matched = executed_2 * 2 + executed_3 * 3;

        total_2cycles += executed_2;
        total_3cycles += executed_3;
        total_rejected += resolution.rejected.len();
        total_matched += participants_matched as u64;
        for exec in &resolution.executed {
            total_cash_moved += exec.cycle.total_cash_movement();
            total_item_value_moved += exec.cycle.total_item_value();
        }

        let participants_snapshot: Vec<Participant> = active_map.values().cloned().collect();
        for p in active_map.values_mut() {
            p.reset_for_next_period();
        }
        carry_over = active_map
            .into_iter()
            .filter(|(_, p)| !p.status().is_matched())
            .collect();

        periods.push(PeriodOutput {
            summary: PeriodSummary {
                period_index,
                start_active,
                new_admitted: new_count,
                total_pool,
                executed_2,
                executed_3,
                total_executed: executed_2 + executed_3,
                participants_matched,
                end_active: carry_over.len(),
                downsampled,
                cap_hit: outcome.cap_hit,
            },
            executed: resolution.executed,
            rejected: resolution.rejected,
            participants_snapshot,
        });

        log::info!(
            "period {period_index}: pool={total_pool} executed={} rejected={} end_active={}",
            executed_2 + executed_3,
            total_rejected,
            carry_over.len()
        );
    }

    let overall_match_rate = if total_participants_generated > 0 {
        total_matched as f64 / total_participants_generated as f64
    } else {
        0.0
    };

    let aggregate = AggregateSummary {
        total_participants_generated,
        total_executed: total_2cycles + total_3cycles,
        total_rejected,
        total_2cycles,
        total_3cycles,
        total_cash_moved,
        total_item_value_moved,
        overall_match_rate,
        final_active_count: carry_over.len(),
    };

    Ok(RunOutput { periods, aggregate })
}

/// Rebuild the graph, shrinking the oldest-admitted participants first
/// until the edge count is within `max_edges` (§7, `GraphExceedsBudget`
/// recovery policy).
fn enforce_edge_budget(
    mut active: Vec<Participant>,
    max_edges: usize,
) -> Result<(Vec<Participant>, TradeGraph, bool), TradeLoopError> {
    let original_len = active.len();
    active.sort_by_key(|p| p.admission_period());
    loop {
        let graph = TradeGraph::build(&active)?;
        if graph.edge_count() <= max_edges || active.len() <= 2 {
            return Ok((active, graph, active.len() != original_len));
        }
        let drop_n = (active.len() / 10).max(1);
        active.drain(0..drop_n);
    }
}
