//! Basic 2-cycle and 3-cycle matching example.
//!
//! Demonstrates how the engine finds trade cycles where a floor blocks
//! the direct swap but a three-way rotation still clears everyone.

use rust_decimal_macros::dec;
use trade_loop_engine::core::ids::{ItemId, ParticipantId};
use trade_loop_engine::core::participant::Participant;
use trade_loop_engine::cycles::{enumerate_cycles, EnumerationConfig};
use trade_loop_engine::graph::trade_graph::TradeGraph;

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  trade-loop-engine: Basic Match Example   ║");
    println!("╚═══════════════════════════════════════════╝\n");

    println!("━━━ Scenario 1: Minimal Two-Cycle ━━━\n");

    let alice = Participant::new(
        ParticipantId::new("alice"),
        ItemId::new("rolex-submariner"),
        dec!(8500),
        dec!(7500),
        dec!(500),
        1,
    );
    let bob = Participant::new(
        ParticipantId::new("bob"),
        ItemId::new("omega-speedmaster"),
        dec!(9000),
        dec!(8000),
        dec!(500),
        1,
    );
    let participants = vec![alice, bob];

    let graph = TradeGraph::build(&participants).unwrap();
    let lookup: std::collections::HashMap<_, _> = participants
        .iter()
        .map(|p| (p.participant_id().clone(), p.clone()))
        .collect();
    let outcome = enumerate_cycles(&graph, &lookup, &EnumerationConfig::default());

    for cycle in &outcome.cycles {
        let members: Vec<String> = cycle.members().iter().map(|m| m.to_string()).collect();
        println!("  cycle: {}", members.join(" -> "));
        println!("  cash flows: {:?}", cycle.cash_flows());
        println!("  value efficiency: {:.3}", cycle.value_efficiency());
    }
    println!();

    println!("━━━ Scenario 2: Floor Blocks the Two-Cycle, Three-Cycle Closes ━━━\n");

    let a = Participant::new(
        ParticipantId::new("A"),
        ItemId::new("watch-a"),
        dec!(100),
        dec!(90),
        dec!(30),
        1,
    );
    let b = Participant::new(
        ParticipantId::new("B"),
        ItemId::new("watch-b"),
        dec!(120),
        dec!(95),
        dec!(30),
        1,
    );
    let c = Participant::new(
        ParticipantId::new("C"),
        ItemId::new("watch-c"),
        dec!(110),
        dec!(125),
        dec!(30),
        1,
    );
    let participants = vec![a, b, c];

    let graph = TradeGraph::build(&participants).unwrap();
    println!(
        "  A -> B admissible: {}",
        graph.has_edge(&ParticipantId::new("A"), &ParticipantId::new("B"))
    );
    println!(
        "  B -> A admissible: {}",
        graph.has_edge(&ParticipantId::new("B"), &ParticipantId::new("A"))
    );

    let lookup: std::collections::HashMap<_, _> = participants
        .iter()
        .map(|p| (p.participant_id().clone(), p.clone()))
        .collect();
    let outcome = enumerate_cycles(&graph, &lookup, &EnumerationConfig::default());

    println!("\n  {} candidate cycle(s) found:", outcome.cycles.len());
    for cycle in &outcome.cycles {
        let members: Vec<String> = cycle.members().iter().map(|m| m.to_string()).collect();
        println!(
            "    {} [{}] fairness={:.3}",
            members.join(" -> "),
            cycle.canonical_id(),
            cycle.fairness_score()
        );
    }
}
