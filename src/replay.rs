// Replay module for analyzing logged turns and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the configured policy on historical requests
// 3. Compare logged vs replayed actions
// 4. Generate detailed analysis reports

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::policy::PolicyAdapter;
use crate::types::TurnRequest;

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: u64,
    pub chosen_action: String,
    pub request: TurnRequest,
    pub timestamp: String,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u64,
    pub original_action: String,
    pub replayed_action: String,
    pub matches: bool,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    policy: PolicyAdapter,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine running the configured main policy
    pub fn new(config: Config, verbose: bool) -> Result<Self, String> {
        let policy = PolicyAdapter::by_name(&config.strategy.policy).map_err(|e| e.to_string())?;
        Ok(ReplayEngine { policy, verbose })
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Runs the policy on one request, returning the action and elapsed time
    pub fn replay_turn(&self, request: &TurnRequest) -> Result<(String, u128), String> {
        let start_time = Instant::now();
        let action = self.policy.turn(request).map_err(|e| e.to_string())?;
        Ok((action, start_time.elapsed().as_millis()))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let (replayed_action, computation_time) = self.replay_turn(&entry.request)?;
        let matches = replayed_action == entry.chosen_action;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (time: {}ms)",
                    entry.turn, replayed_action, computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} (time: {}ms)",
                    entry.turn, entry.chosen_action, replayed_action, computation_time
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_action: entry.chosen_action.clone(),
            replayed_action,
            matches,
            computation_time_ms: computation_time,
        })
    }

    /// Replays all entries in parallel; results keep log order
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[u64],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Policy:         {}", self.policy.policy_name());
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            let max_time = results
                .iter()
                .map(|r| r.computation_time_ms)
                .max()
                .unwrap_or(0);

            println!("Average Computation Time:   {:.1}ms", avg_time);
            println!("Slowest Turn:               {}ms\n", max_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (time: {}ms)",
                    result.turn,
                    result.original_action,
                    result.replayed_action,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected actions were logged
    pub fn validate_expected_actions(
        &self,
        entries: &[LogEntry],
        expected_actions: &[(u64, Vec<String>)], // (turn, acceptable_actions)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_actions {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_action) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn, acceptable, entry.chosen_action
                ));
            }
        }

        Ok(())
    }
}
