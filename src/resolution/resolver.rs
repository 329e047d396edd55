use crate::core::ids::{ItemId, ParticipantId};
use crate::core::participant::Participant;
use crate::cycles::Cycle;
use crate::error::TradeLoopError;
use crate::resolution::acceptance::AcceptanceThresholds;
use rand::Rng;
use std::collections::HashMap;

/// A cycle that ran and every member accepted.
#[derive(Debug, Clone)]
pub struct ExecutedCycle {
    pub cycle: Cycle,
    pub trade_id: u64,
}

/// A cycle that ran but at least one member declined.
#[derive(Debug, Clone)]
pub struct RejectedCycle {
    pub cycle: Cycle,
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionOutcome {
    pub executed: Vec<ExecutedCycle>,
    pub rejected: Vec<RejectedCycle>,
}

/// Sequentially consider `cycles` in the order given, drawing a per-seat
/// accept/decline for each member and committing unanimous-accept cycles.
///
/// `cycles` must already be in the order C4 should consider them (see
/// [`crate::cycles::shuffle_for_resolution`]). Declined members become
/// sticky-ineligible for the rest of this scan (§4.4); matched members are
/// removed from consideration entirely.
///
/// # Errors
///
/// Returns [`TradeLoopError::InconsistentState`] if a cycle's member is
/// matched without appearing in the executed log, or the reverse.
pub fn resolve(
    cycles: Vec<Cycle>,
    participants: &mut HashMap<ParticipantId, Participant>,
    thresholds: &AcceptanceThresholds,
    trade_counter: &mut u64,
    rng: &mut impl Rng,
) -> Result<ResolutionOutcome, TradeLoopError> {
    let mut outcome = ResolutionOutcome::default();

    for cycle in cycles {
        let members = cycle.members();

        let all_active = members.iter().all(|id| {
            participants
                .get(id)
                .map(|p| p.status().is_active())
                .unwrap_or(false)
        });
        if !all_active {
            continue;
        }

        let p_accept = thresholds.compute_p_accept(cycle.value_efficiency(), cycle.fairness_score());
        let decisions: Vec<bool> = members.iter().map(|_| rng.gen::<f64>() < p_accept).collect();
        let unanimous = decisions.iter().all(|&accepted| accepted);

        if unanimous {
            let k = members.len();
            let item_ids: Vec<ItemId> = members
                .iter()
                .map(|id| participants[id].item_id().clone())
                .collect();
            *trade_counter += 1;
            let trade_id = *trade_counter;
            for (i, id) in members.iter().enumerate() {
                let would_receive = &item_ids[(i + k - 1) % k];
                let p = participants
                    .get_mut(id)
                    .expect("member existence checked above");
                p.counters_mut().record_proposal(would_receive);
                p.mark_matched(trade_id, cycle.canonical_id().to_string());
            }
            outcome.executed.push(ExecutedCycle { cycle, trade_id });
        } else {
            let k = members.len();
            let item_ids: Vec<ItemId> = members
                .iter()
                .map(|id| participants[id].item_id().clone())
                .collect();
            for (i, (id, accepted)) in members.iter().zip(decisions.iter()).enumerate() {
                let would_receive = &item_ids[(i + k - 1) % k];
                let p = participants
                    .get_mut(id)
                    .expect("member existence checked above");
                p.counters_mut().record_proposal(would_receive);
                if !accepted {
                    p.mark_declined();
                }
            }
            outcome.rejected.push(RejectedCycle { cycle });
        }
    }

    for exec in &outcome.executed {
        for id in exec.cycle.members() {
            let status_ok = participants
                .get(id)
                .map(|p| p.status().is_matched())
                .unwrap_or(false);
            if !status_ok {
                return Err(TradeLoopError::InconsistentState(format!(
                    "participant {id} in executed cycle {} is not marked matched",
                    exec.cycle.canonical_id()
                )));
            }
        }
    }

    Ok(outcome)
}
