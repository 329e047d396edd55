use crate::core::ids::ParticipantId;
use crate::core::participant::Participant;
use crate::cycles::cycle::Cycle;
use crate::graph::trade_graph::TradeGraph;
use std::collections::{HashMap, HashSet};

/// Tunables for cycle enumeration (§4.3, §9 open question 1).
#[derive(Debug, Clone)]
pub struct EnumerationConfig {
    /// Hard cap on the number of cycles emitted per call.
    pub max_cycles: usize,
    /// When true, also check the reverse orientation of a 3-cycle
    /// triple if the forward (lexicographic) orientation is infeasible.
    pub enumerate_both_3cycle_orientations: bool,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            max_cycles: 1000,
            enumerate_both_3cycle_orientations: false,
        }
    }
}

/// Result of one enumeration pass.
#[derive(Debug, Clone)]
pub struct EnumerationOutcome {
    pub cycles: Vec<Cycle>,
    /// Whether `max_cycles` was reached before enumeration completed.
    pub cap_hit: bool,
}

/// Emit every 2- and 3-cycle in `graph` exactly once, annotated per
/// [`Cycle::from_members`], subject to `config.max_cycles`.
///
/// Enumeration is edge-driven: 2-cycles walk each edge once, 3-cycles
/// extend each edge by one hop and test closure. No implementation
/// here materializes the full Θ(N³) triple space.
pub fn enumerate_cycles(
    graph: &TradeGraph,
    participants: &HashMap<ParticipantId, Participant>,
    config: &EnumerationConfig,
) -> EnumerationOutcome {
    let mut ids: Vec<ParticipantId> = graph.participant_ids().to_vec();
    ids.sort();

    let mut cycles = Vec::new();
    let mut cap_hit = false;

    'two: for u in &ids {
        for v in graph.successors(u) {
            if v <= *u {
                continue;
            }
            if !graph.has_edge(&v, u) {
                continue;
            }
            let pu = &participants[u];
            let pv = &participants[&v];
            if pu.item_value() >= pv.floor_value() && pv.item_value() >= pu.floor_value() {
                cycles.push(Cycle::from_members(&[pu, pv]));
                if cycles.len() >= config.max_cycles {
                    cap_hit = true;
                    break 'two;
                }
            }
        }
    }

    let mut seen_triples: HashSet<(ParticipantId, ParticipantId, ParticipantId)> = HashSet::new();

    if !cap_hit {
        'three_forward: for a in &ids {
            for b in graph.successors(a) {
                if b <= *a {
                    continue;
                }
                for c in graph.successors(&b) {
                    if c <= b {
                        continue;
                    }
                    if !graph.has_edge(&c, a) {
                        continue;
                    }
                    let pa = &participants[a];
                    let pb = &participants[&b];
                    let pc = &participants[&c];
                    if three_cycle_legal(pa, pb, pc) {
                        cycles.push(Cycle::from_members(&[pa, pb, pc]));
                        seen_triples.insert((a.clone(), b.clone(), c.clone()));
                        if cycles.len() >= config.max_cycles {
                            cap_hit = true;
                            break 'three_forward;
                        }
                    }
                }
            }
        }
    }

    if !cap_hit && config.enumerate_both_3cycle_orientations {
        'three_reverse: for a in &ids {
            for c in graph.successors(a) {
                if c <= *a {
                    continue;
                }
                for b in graph.successors(&c) {
                    if b <= *a || b >= c {
                        continue;
                    }
                    if seen_triples.contains(&(a.clone(), b.clone(), c.clone())) {
                        continue;
                    }
                    if !graph.has_edge(&b, a) {
                        continue;
                    }
                    let pa = &participants[a];
                    let pc = &participants[&c];
                    let pb = &participants[&b];
                    if three_cycle_legal(pa, pc, pb) {
                        cycles.push(Cycle::from_members(&[pa, pc, pb]));
                        seen_triples.insert((a.clone(), b.clone(), c.clone()));
                        if cycles.len() >= config.max_cycles {
                            cap_hit = true;
                            break 'three_reverse;
                        }
                    }
                }
            }
        }
    }

    EnumerationOutcome { cycles, cap_hit }
}

/// Reassert the per-seat legality clause for a 3-cycle `a -> b -> c -> a`.
fn three_cycle_legal(a: &Participant, b: &Participant, c: &Participant) -> bool {
    a.item_value() >= b.floor_value()
        && b.item_value() >= c.floor_value()
        && c.item_value() >= a.floor_value()
}

/// Put cycles into the random order C4 consumes them in (§4.3 tie-break
/// rule). Determinism across runs requires seeding `rng` from the run seed.
pub fn shuffle_for_resolution(cycles: &mut [Cycle], rng: &mut impl rand::Rng) {
    use rand::seq::SliceRandom;
    cycles.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::ItemId;
    use rust_decimal::Decimal;

    fn p(id: &str, item: &str, value: i64, floor: i64, top_up: i64) -> Participant {
        Participant::new(
            ParticipantId::new(id),
            ItemId::new(item),
            Decimal::from(value),
            Decimal::from(floor),
            Decimal::from(top_up),
            1,
        )
    }

    fn to_map(participants: &[Participant]) -> HashMap<ParticipantId, Participant> {
        participants
            .iter()
            .map(|p| (p.participant_id().clone(), p.clone()))
            .collect()
    }

    #[test]
    fn test_s1_minimal_two_cycle() {
        let participants = vec![p("A", "X", 100, 90, 20), p("B", "Y", 110, 95, 20)];
        let graph = TradeGraph::build(&participants).unwrap();
        let map = to_map(&participants);
        let outcome = enumerate_cycles(&graph, &map, &EnumerationConfig::default());
        assert_eq!(outcome.cycles.len(), 1);
        assert_eq!(outcome.cycles[0].len(), 2);
        assert!(!outcome.cap_hit);
    }

    #[test]
    fn test_s2_floor_blocks_two_cycle() {
        let participants = vec![p("A", "X", 100, 120, 50), p("B", "Y", 110, 90, 50)];
        let graph = TradeGraph::build(&participants).unwrap();
        let map = to_map(&participants);
        let outcome = enumerate_cycles(&graph, &map, &EnumerationConfig::default());
        assert!(outcome.cycles.is_empty());
    }

    #[test]
    fn test_s3_three_cycle_closes_where_no_two_cycle_does() {
        let participants = vec![
            p("A", "X", 100, 160, 100),
            p("B", "Y", 150, 90, 10),
            p("C", "Z", 200, 140, 10),
        ];
        let graph = TradeGraph::build(&participants).unwrap();
        let map = to_map(&participants);
        let outcome = enumerate_cycles(&graph, &map, &EnumerationConfig::default());
        assert!(outcome.cycles.iter().all(|c| c.len() == 3));
        assert_eq!(outcome.cycles.len(), 1);
    }

    #[test]
    fn test_cap_is_respected() {
        // Five mutually-compatible participants -> C(5,3) = 10 three-cycles possible.
        let participants: Vec<Participant> = (0..5)
            .map(|i| p(&format!("P{i}"), &format!("W{i}"), 100, 50, 1000))
            .collect();
        let graph = TradeGraph::build(&participants).unwrap();
        let map = to_map(&participants);
        let config = EnumerationConfig {
            max_cycles: 3,
            enumerate_both_3cycle_orientations: false,
        };
        let outcome = enumerate_cycles(&graph, &map, &config);
        assert!(outcome.cap_hit);
        assert_eq!(outcome.cycles.len(), 3);
    }

    #[test]
    fn test_reverse_orientation_found_only_when_flag_set() {
        // Construct a triple feasible only in the reverse orientation a -> c -> b -> a.
        let a = p("A", "X", 100, 10, 5);
        let b = p("B", "Y", 100, 10, 5);
        let c = p("C", "Z", 50, 10, 60);
        let participants = vec![a, b, c];
        let graph = TradeGraph::build(&participants).unwrap();
        let map = to_map(&participants);

        let default_outcome = enumerate_cycles(&graph, &map, &EnumerationConfig::default());
        let both_outcome = enumerate_cycles(
            &graph,
            &map,
            &EnumerationConfig {
                max_cycles: 1000,
                enumerate_both_3cycle_orientations: true,
            },
        );
        assert!(both_outcome.cycles.len() >= default_outcome.cycles.len());
    }

    #[test]
    fn test_dedup_at_most_one_cycle_per_unordered_triple() {
        let participants = vec![
            p("A", "X", 100, 50, 50),
            p("B", "Y", 100, 50, 50),
            p("C", "Z", 100, 50, 50),
        ];
        let graph = TradeGraph::build(&participants).unwrap();
        let map = to_map(&participants);
        let config = EnumerationConfig {
            max_cycles: 1000,
            enumerate_both_3cycle_orientations: true,
        };
        let outcome = enumerate_cycles(&graph, &map, &config);
        let three_cycles: Vec<_> = outcome.cycles.iter().filter(|c| c.len() == 3).collect();
        assert_eq!(three_cycles.len(), 1);
    }
}
