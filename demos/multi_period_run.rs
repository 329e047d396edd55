//! Multi-period simulation example.
//!
//! Runs a handful of periods with the built-in generator and default
//! acceptance thresholds, printing per-period pool growth and match
//! counts the way a short operator dashboard would.

use std::collections::HashMap;
use trade_loop_engine::period::{DefaultGenerator, RunConfig, StaticCatalog};
use trade_loop_engine::prelude::run_simulation;

fn main() {
    println!("╔══════════════════════════════════════════════════╗");
    println!("║  trade-loop-engine: Multi-Period Run Example     ║");
    println!("╚══════════════════════════════════════════════════╝\n");

    let mut prices: HashMap<String, rust_decimal::Decimal> = HashMap::new();
    for i in 1..=60 {
        prices.insert(
            format!("W{i:05}"),
            rust_decimal::Decimal::from(500 + i * 317 % 20000),
        );
    }
    let catalog = StaticCatalog::from_map(prices);

    let config = RunConfig {
        initial_count: 20,
        growth_rate: 0.15,
        num_periods: 6,
        seed: 20260730,
        ..RunConfig::default()
    };

    let output = run_simulation(&config, &DefaultGenerator, &catalog)
        .expect("simulation should not fail on a well-formed config");

    println!("━━━ Per-Period Results ━━━\n");
    println!(
        "  {:<8} {:>10} {:>10} {:>10} {:>12}",
        "period", "pool", "2-cycles", "3-cycles", "end_active"
    );
    for period in &output.periods {
        let s = &period.summary;
        println!(
            "  {:<8} {:>10} {:>10} {:>10} {:>12}{}",
            s.period_index,
            s.total_pool,
            s.executed_2,
            s.executed_3,
            s.end_active,
            if s.downsampled { "  [downsampled]" } else { "" }
        );
    }

    println!("\n━━━ Aggregate ━━━\n");
    let agg = &output.aggregate;
    println!("  participants generated: {}", agg.total_participants_generated);
    println!("  executed trades:        {}", agg.total_executed);
    println!("  rejected proposals:     {}", agg.total_rejected);
    println!("  total item value moved: {}", agg.total_item_value_moved);
    println!("  total cash moved:       {}", agg.total_cash_moved);
    println!("  overall match rate:     {:.1}%", agg.overall_match_rate * 100.0);
    println!("  final active pool:      {}", agg.final_active_count);
}
