//! liquidation-engine CLI
//!
//! Drive the liquidation and auction pipeline from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Process risk breaches from a JSON file into auctions
//! liquidation-engine process --input breaches.json
//!
//! # Output as JSON
//! liquidation-engine process --input breaches.json --format json
//!
//! # Run a random end-to-end scenario
//! liquidation-engine simulate --events 20 --bidders 8 --seed 42
//! ```

use liquidation_engine::core::config::LiquidationConfig;
use liquidation_engine::core::event::LiquidationEvent;
use liquidation_engine::core::id::{PositionId, UserId};
use liquidation_engine::core::trigger::TriggerKind;
use liquidation_engine::engine::liquidation::LiquidationEngine;
use liquidation_engine::engine::providers::{ConstantRiskMetrics, FlatPremiumInsurance};
use liquidation_engine::simulation::scenario::{run_scenario, ScenarioConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use std::process;
use std::sync::Arc;

fn print_usage() {
    eprintln!(
        r#"liquidation-engine — collateral liquidation and auction clearing

USAGE:
    liquidation-engine <COMMAND> [OPTIONS]

COMMANDS:
    process     Process risk breaches from a JSON file into auctions
    simulate    Run a random end-to-end liquidation scenario
    help        Show this message

OPTIONS (process):
    --input <FILE>      Path to JSON breaches file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (simulate):
    --events <N>        Number of risk breaches (default: 10)
    --bidders <N>       Bidder pool size per auction (default: 5)
    --seed <N>          RNG seed for a reproducible run
    --format <FORMAT>   Output format: text (default) or json

EXAMPLES:
    liquidation-engine process --input breaches.json
    liquidation-engine process --input breaches.json --format json
    liquidation-engine simulate --events 20 --bidders 8 --seed 42"#
    );
}

/// JSON schema for input breaches.
#[derive(serde::Deserialize)]
struct BreachInput {
    position_id: String,
    user_id: String,
    trigger_kind: String,
    trigger_value: String,
    threshold: String,
    position_value: String,
    debt_amount: String,
    collateral_value: String,
}

#[derive(serde::Deserialize)]
struct BreachesFile {
    breaches: Vec<BreachInput>,
}

/// JSON output schema for created auctions.
#[derive(serde::Serialize)]
struct AuctionOutput {
    auction_id: String,
    event_id: String,
    user_id: String,
    liquidation_fee: String,
    starting_price: String,
    minimum_price: String,
    reserve_price: String,
    start_time: String,
    end_time: String,
}

fn default_engine() -> LiquidationEngine {
    let config = LiquidationConfig::new(
        chrono::Duration::minutes(15),
        dec!(0.05),
        chrono::Duration::hours(1),
        chrono::Duration::hours(24),
        dec!(100),
        chrono::Duration::minutes(5),
    )
    .expect("default configuration is valid");

    LiquidationEngine::new(
        Arc::new(ConstantRiskMetrics::new(dec!(0.3))),
        Arc::new(FlatPremiumInsurance::new(dec!(0.02))),
        config,
    )
}

fn parse_amount(field: &str, raw: &str) -> Decimal {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid {field} '{raw}': {e}");
        process::exit(1);
    })
}

fn load_breaches(path: &str) -> Vec<LiquidationEvent> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: BreachesFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "breaches": [
    {{
      "position_id": "pos-1", "user_id": "user-1",
      "trigger_kind": "health-factor",
      "trigger_value": "0.95", "threshold": "1.0",
      "position_value": "10000", "debt_amount": "8000",
      "collateral_value": "12000"
    }}
  ]
}}"#
        );
        process::exit(1);
    });

    file.breaches
        .into_iter()
        .map(|b| {
            let kind: TriggerKind = b.trigger_kind.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                process::exit(1);
            });
            LiquidationEvent::new(
                PositionId::new(&b.position_id),
                UserId::new(&b.user_id),
                kind,
                parse_amount("trigger_value", &b.trigger_value),
                parse_amount("threshold", &b.threshold),
                parse_amount("position_value", &b.position_value),
                parse_amount("debt_amount", &b.debt_amount),
                parse_amount("collateral_value", &b.collateral_value),
            )
            .unwrap_or_else(|e| {
                eprintln!("Invalid breach: {e}");
                process::exit(1);
            })
        })
        .collect()
}

fn cmd_process(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
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
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
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

    let engine = default_engine();
    let mut outputs = Vec::new();

    for breach in load_breaches(&path) {
        let user = breach.user_id().clone();
        let event_id = engine.add_event(breach);
        match engine.process_liquidation_event(event_id) {
            Ok(auction_id) => {
                let event = engine.get_event(event_id).expect("event just stored");
                let auction = engine.get_auction(auction_id).expect("auction just stored");
                outputs.push(AuctionOutput {
                    auction_id: auction_id.to_string(),
                    event_id: event_id.to_string(),
                    user_id: user.to_string(),
                    liquidation_fee: event.liquidation_fee().to_string(),
                    starting_price: auction.starting_price().to_string(),
                    minimum_price: auction.minimum_price().to_string(),
                    reserve_price: auction.reserve_price().to_string(),
                    start_time: auction.start_time().to_rfc3339(),
                    end_time: auction.end_time().to_rfc3339(),
                });
            }
            Err(e) => {
                eprintln!("Event {event_id} failed: {e}");
            }
        }
    }

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&outputs).expect("output serializes")
        );
    } else {
        for out in &outputs {
            println!(
                "auction {} (event {}): fee {}, start {}, floor {}, reserve {}, closes {}",
                out.auction_id,
                out.event_id,
                out.liquidation_fee,
                out.starting_price,
                out.minimum_price,
                out.reserve_price,
                out.end_time
            );
        }
        println!("\n{}", engine.statistics());
    }
}

fn cmd_simulate(args: &[String]) {
    let mut config = ScenarioConfig::default();
    let mut seed: Option<u64> = None;
    let mut format = "text".to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--events" => {
                i += 1;
                config.event_count = parse_numeric_arg(args.get(i), "--events");
            }
            "--bidders" => {
                i += 1;
                config.bidder_count = parse_numeric_arg(args.get(i), "--bidders");
            }
            "--seed" => {
                i += 1;
                seed = Some(parse_numeric_arg::<u64>(args.get(i), "--seed"));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let engine = default_engine();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    if let Err(e) = run_scenario(&engine, &config, &mut rng) {
        eprintln!("Scenario failed: {e}");
        process::exit(1);
    }

    let stats = engine.statistics();
    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).expect("statistics serialize")
        );
    } else {
        println!("{stats}");
    }
}

fn parse_numeric_arg<T: std::str::FromStr>(arg: Option<&String>, flag: &str) -> T {
    arg.and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("{flag} requires a number");
        process::exit(1);
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "process" => cmd_process(&args[2..]),
        "simulate" => cmd_simulate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}
