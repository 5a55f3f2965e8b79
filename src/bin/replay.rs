// Standalone replay tool for analyzing cheese-race debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate             Run validation mode with expected actions
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Strategy.toml (default: Strategy.toml)

use std::env;
use std::process;

use cheese_race_bot::config::Config;
use cheese_race_bot::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Cheese Race Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:A,...>    Validate expected actions (format: turn:action,...)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Strategy.toml (default: Strategy.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all turns");
    eprintln!("  replay cheese_race_debug.jsonl --all");
    eprintln!();
    eprintln!("  # Replay specific turns");
    eprintln!("  replay cheese_race_debug.jsonl --turns 5,10,15");
    eprintln!();
    eprintln!("  # Validate expected actions, several acceptable ones separated by '|'");
    eprintln!("  replay cheese_race_debug.jsonl --validate 5:up,10:right|down");
}

fn parse_turns(s: &str) -> Result<Vec<u64>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u64>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_actions(s: &str) -> Result<Vec<(u64, Vec<String>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 || parts[1].trim().is_empty() {
                return Err(format!("Invalid format '{}'. Expected 'turn:action'", pair));
            }

            let turn = parts[0]
                .parse::<u64>()
                .map_err(|e| format!("Invalid turn number '{}': {}", parts[0], e))?;

            // Support multiple acceptable actions separated by '|'
            let actions = parts[1].split('|').map(|a| a.trim().to_string()).collect();

            Ok((turn, actions))
        })
        .collect()
}

fn option_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires an argument", flag);
            process::exit(1);
        }
    }
}

enum Mode {
    All,
    Turns(String),
    Validate(String),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let log_file = &args[1];
    let mut config_path = "Strategy.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--turns" => {
                mode = Some(Mode::Turns(option_value(&args, i, "--turns")));
                i += 1;
            }
            "--validate" => {
                mode = Some(Mode::Validate(option_value(&args, i, "--validate")));
                i += 1;
            }
            "--config" => {
                config_path = option_value(&args, i, "--config");
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mode = match mode {
        Some(mode) => mode,
        None => {
            eprintln!("Error: Must specify --all, --turns, or --validate");
            print_usage();
            process::exit(1);
        }
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = match ReplayEngine::new(config, verbose) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} turns...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Turns(turn_arg) => {
            let turns = match parse_turns(&turn_arg) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Error parsing turns: {}", e);
                    process::exit(1);
                }
            };

            println!("Replaying {} specific turn(s)...\n", turns.len());
            match engine.replay_turns(&entries, &turns) {
                Ok(results) => {
                    engine.print_report(&results);
                }
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Validate(validate_arg) => {
            let expected_actions = match parse_expected_actions(&validate_arg) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Error parsing expected actions: {}", e);
                    process::exit(1);
                }
            };

            println!("Validating {} expected action(s)...\n", expected_actions.len());
            match engine.validate_expected_actions(&entries, &expected_actions) {
                Ok(()) => {
                    println!("✓ All expected actions validated successfully!");
                }
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
