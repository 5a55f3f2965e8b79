// Configuration module for reading Strategy.toml
// This module provides OOP-style configuration management for the agent server

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub strategy: StrategyConfig,
    pub debug: DebugConfig,
    pub info: InfoConfig,
}

/// Timing and response budget constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
    pub polling_interval_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Which policies answer turns
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Policy used for every turn
    pub policy: String,
    /// Policy used when the main one runs past the time budget
    pub fallback_policy: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

/// Metadata reported on GET /
#[derive(Debug, Deserialize, Clone)]
pub struct InfoConfig {
    pub author: String,
    pub version: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Strategy.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Strategy.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Strategy.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Strategy.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 1000,
                network_overhead_ms: 100,
                polling_interval_ms: 5,
            },
            strategy: StrategyConfig {
                policy: "game_theory".to_string(),
                fallback_policy: "nearest_cheese".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "cheese_race_debug.jsonl".to_string(),
            },
            info: InfoConfig {
                author: "cheese-race".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Strategy.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
