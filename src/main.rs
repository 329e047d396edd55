//! trade-loop-engine CLI
//!
//! Run the multi-period trade cycle matching engine from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Run a full multi-period simulation
//! trade-loop-engine run --config config.json
//!
//! # Enumerate candidate cycles for one period without resolving them
//! trade-loop-engine cycles --input participants.json
//!
//! # Generate a synthetic participant table for testing
//! trade-loop-engine generate --count 50 --output participants.json
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::process;
use trade_loop_engine::core::participant::Participant;
use trade_loop_engine::cycles::{enumerate_cycles, EnumerationConfig};
use trade_loop_engine::graph::trade_graph::TradeGraph;
use trade_loop_engine::period::{
    run_simulation, DefaultGenerator, ParticipantGenerator, RunConfig, StaticCatalog,
};
use trade_loop_engine::reporting::{
    executed_rows, rejected_rows, user_trade_log_rows, write_rows, AggregateSummaryRow,
    ParticipantRow, PeriodSummaryRow,
};

fn print_usage() {
    eprintln!(
        r#"trade-loop-engine — cycle matching and multi-period settlement engine

USAGE:
    trade-loop-engine <COMMAND> [OPTIONS]

COMMANDS:
    run         Run the full multi-period simulation
    cycles      Enumerate candidate cycles for one period's participants
    generate    Generate a synthetic participant table (for testing)
    help        Show this message

OPTIONS (run):
    --config <FILE>     Path to JSON run configuration (default: built-in defaults)

OPTIONS (cycles):
    --input <FILE>      Path to a JSON participant array

OPTIONS (generate):
    --count <N>         Number of participants to generate (default: 15)
    --output <FILE>     Write to file instead of stdout
    --seed <N>          RNG seed (default: time-derived)

EXAMPLES:
    trade-loop-engine run --config config.json
    trade-loop-engine cycles --input participants.json
    trade-loop-engine generate --count 50 --output participants.json"#
    );
}

fn load_participants(path: &str) -> Vec<Participant> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected a JSON array of participant records.");
        process::exit(1);
    })
}

fn cmd_run(args: &[String]) {
    let mut config_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => RunConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => RunConfig::default(),
    };

    let catalog: StaticCatalog = match &config.catalog_path {
        Some(path) => StaticCatalog::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading catalog '{}': {}", path, e);
            process::exit(1);
        }),
        None => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            StaticCatalog::synthetic(100, (500.0, 25000.0), &mut rng)
        }
    };

    let output = run_simulation(&config, &DefaultGenerator, &catalog).unwrap_or_else(|e| {
        eprintln!("Run failed: {}", e);
        process::exit(1);
    });

    fs::create_dir_all(&config.run_root).unwrap_or_else(|e| {
        eprintln!("Error creating run_root '{}': {}", config.run_root, e);
        process::exit(1);
    });

    let mut period_rows = Vec::new();
    for period in &output.periods {
        let period_dir = Path::new(&config.run_root).join(format!("period_{}", period.summary.period_index));
        fs::create_dir_all(&period_dir).ok();

        let participants: std::collections::HashMap<_, _> = period
            .participants_snapshot
            .iter()
            .map(|p| (p.participant_id().clone(), p.clone()))
            .collect();

        let participant_rows: Vec<ParticipantRow> =
            period.participants_snapshot.iter().map(ParticipantRow::from).collect();
        write_rows(period_dir.join("participants.tab"), &participant_rows).ok();

        let executed = executed_rows(&period.executed, &participants, period.summary.period_index);
        write_rows(period_dir.join("executed_cycles.tab"), &executed).ok();

        let rejected = rejected_rows(&period.rejected, &participants, period.summary.period_index);
        write_rows(period_dir.join("rejected_cycles.tab"), &rejected).ok();

        let mut all_candidates = executed.clone();
        all_candidates.extend(rejected);
        write_rows(period_dir.join("all_candidate_cycles.tab"), &all_candidates).ok();

        let trade_log = user_trade_log_rows(
            &period.executed,
            &period.rejected,
            &participants,
            period.summary.period_index,
        );
        write_rows(period_dir.join("user_trade_log.tab"), &trade_log).ok();

        period_rows.push(PeriodSummaryRow::from(&period.summary));

        println!(
            "period {}: pool={} executed={} rejected={} end_active={}{}",
            period.summary.period_index,
            period.summary.total_pool,
            period.summary.total_executed,
            period.rejected.len(),
            period.summary.end_active,
            if period.summary.cap_hit { " [cycle cap hit]" } else { "" }
        );
    }

    write_rows(
        Path::new(&config.run_root).join("period_summary.tab"),
        &period_rows,
    )
    .ok();
    write_rows(
        Path::new(&config.run_root).join("aggregate_summary.tab"),
        &[AggregateSummaryRow::from(&output.aggregate)],
    )
    .ok();

    println!("\n=== Aggregate ===");
    println!(
        "generated={} executed={} rejected={} 2-way={} 3-way={} match_rate={:.3} final_active={}",
        output.aggregate.total_participants_generated,
        output.aggregate.total_executed,
        output.aggregate.total_rejected,
        output.aggregate.total_2cycles,
        output.aggregate.total_3cycles,
        output.aggregate.overall_match_rate,
        output.aggregate.final_active_count
    );
}

fn cmd_cycles(args: &[String]) {
    let mut input_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let participants = load_participants(&path);
    let graph = TradeGraph::build(&participants).unwrap_or_else(|e| {
        eprintln!("Error building trade graph: {}", e);
        process::exit(1);
    });

    let lookup: std::collections::HashMap<_, _> = participants
        .iter()
        .map(|p| (p.participant_id().clone(), p.clone()))
        .collect();
    let outcome = enumerate_cycles(&graph, &lookup, &EnumerationConfig::default());

    println!(
        "{} nodes, {} edges, {} candidate cycles{}",
        graph.node_count(),
        graph.edge_count(),
        outcome.cycles.len(),
        if outcome.cap_hit { " (cap hit)" } else { "" }
    );
    for cycle in &outcome.cycles {
        let members: Vec<String> = cycle.members().iter().map(|m| m.to_string()).collect();
        println!(
            "  {} [{}] value_efficiency={:.3} fairness={:.3}",
            members.join(" -> "),
            cycle.canonical_id(),
            cycle.value_efficiency(),
            cycle.fairness_score()
        );
    }
}

fn cmd_generate(args: &[String]) {
    let mut count = 15u32;
    let mut output_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                i += 1;
                count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--count requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(RunConfig::default().seed),
    };
    let catalog = StaticCatalog::synthetic(100, (500.0, 25000.0), &mut rng);
    let participants = DefaultGenerator.generate(count, 1, &catalog, &mut rng);

    let json = serde_json::to_string_pretty(&participants).unwrap();
    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} participants -> {}", participants.len(), path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "run" => cmd_run(rest),
        "cycles" => cmd_cycles(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
