// Agent lifecycle for the game host
//
// The host calls start once, then turn every turn, then end. Turn answers must
// arrive within a time budget. The search runs on the blocking pool with the
// turn's deadline and the async side polls for its result. When the budget runs
// out the fallback policy answers, and the search stops at its next branch.

use log::{error, info, warn};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::StrategyError;
use crate::policy::PolicyAdapter;
use crate::types::TurnRequest;

/// Result slot shared between the polling handler and the search worker
#[derive(Debug, Default)]
struct SharedSearchState {
    outcome: Mutex<Option<Result<String, StrategyError>>>,
    search_complete: AtomicBool,
}

impl SharedSearchState {
    fn new() -> Self {
        Self::default()
    }

    fn finish(&self, outcome: Result<String, StrategyError>) {
        *self.outcome.lock() = Some(outcome);
        self.search_complete.store(true, Ordering::Release);
    }

    fn take(&self) -> Option<Result<String, StrategyError>> {
        if self.search_complete.load(Ordering::Acquire) {
            self.outcome.lock().take()
        } else {
            None
        }
    }
}

/// Counts a search as running until the worker drops it
struct ActiveSearch(Arc<AtomicUsize>);

impl ActiveSearch {
    fn start(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        ActiveSearch(counter.clone())
    }
}

impl Drop for ActiveSearch {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Cheese-race agent with OOP-style API
/// Takes static configuration and exposes methods corresponding to host calls
pub struct Bot {
    config: Config,
    policy: Arc<PolicyAdapter>,
    fallback: PolicyAdapter,
    logger: DebugLogger,
    turn: AtomicU64,
    active_searches: Arc<AtomicUsize>,
}

impl Bot {
    /// Creates a new Bot instance
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `logger` - Turn logger, possibly disabled
    ///
    /// # Returns
    /// * `Err` if the configured policy names are unknown
    pub fn new(config: Config, logger: DebugLogger) -> Result<Self, StrategyError> {
        let policy = Arc::new(PolicyAdapter::by_name(&config.strategy.policy)?);
        let fallback = PolicyAdapter::by_name(&config.strategy.fallback_policy)?;

        Ok(Bot {
            config,
            policy,
            fallback,
            logger,
            turn: AtomicU64::new(0),
            active_searches: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Builds the bot from `config`, or from the hardcoded defaults when
    /// `config` names an unknown policy
    pub fn new_or_default(config: Config, logger: DebugLogger) -> Result<Self, StrategyError> {
        match Bot::new(config, logger.clone()) {
            Ok(bot) => Ok(bot),
            Err(e) => {
                error!("Invalid strategy configuration ({}), using hardcoded defaults", e);
                Bot::new(Config::default_hardcoded(), logger)
            }
        }
    }

    /// Searches whose worker has not returned yet
    pub fn active_searches(&self) -> usize {
        self.active_searches.load(Ordering::Acquire)
    }

    /// Returns agent metadata
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": self.config.info.author,
            "version": self.config.info.version,
            "policy": self.policy.policy_name(),
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, request: &TurnRequest) {
        self.turn.store(0, Ordering::Release);
        info!(
            "GAME START as {} on a {}x{} maze",
            request.name.as_deref().unwrap_or("?"),
            request.maze_width.unwrap_or(0),
            request.maze_height.unwrap_or(0)
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, request: &TurnRequest) {
        info!(
            "GAME OVER after {} turn(s), scores: {:?}",
            self.turn.load(Ordering::Acquire),
            request.player_scores
        );
    }

    fn fall_back(
        &self,
        turn: u64,
        request: &TurnRequest,
        effective_budget: u64,
    ) -> Result<String, StrategyError> {
        warn!(
            "Turn {}: {} exceeded {}ms budget, answering with {}",
            turn,
            self.policy.policy_name(),
            effective_budget,
            self.fallback.policy_name()
        );
        self.fallback.turn(request)
    }

    /// Computes the action for this turn within the configured time budget
    /// Corresponds to POST /turn endpoint
    ///
    /// 1. Spawns the main policy on the blocking thread pool with the turn deadline
    /// 2. Polls for its result until the effective budget runs out
    /// 3. Falls back to the fallback policy when no result arrived in time
    pub async fn get_move(&self, request: &TurnRequest) -> Result<String, StrategyError> {
        let start_time = Instant::now();
        let turn = self.turn.fetch_add(1, Ordering::AcqRel);
        let effective_budget = self.config.timing.effective_budget_ms();
        let deadline = start_time + Duration::from_millis(effective_budget);

        info!(
            "Turn {}: Computing action with {}",
            turn,
            self.policy.policy_name()
        );

        let shared = Arc::new(SharedSearchState::new());
        let shared_clone = shared.clone();
        let policy = self.policy.clone();
        let ctx = request.clone();
        let active = ActiveSearch::start(&self.active_searches);

        let handle = tokio::task::spawn_blocking(move || {
            let outcome = policy.turn_within(&ctx, deadline);
            // released before publishing so the next turn never sees this search as running
            drop(active);
            shared_clone.finish(outcome);
        });

        let polling_interval = Duration::from_millis(self.config.timing.polling_interval_ms.max(1));

        let outcome = loop {
            let published = match shared.take() {
                Some(outcome) => Some(outcome),
                // the worker may have published between the two checks
                None if handle.is_finished() => {
                    Some(shared.take().unwrap_or(Err(StrategyError::SearchAborted)))
                }
                None => None,
            };

            match published {
                Some(Err(StrategyError::DeadlineExceeded { .. })) => {
                    break self.fall_back(turn, request, effective_budget);
                }
                Some(outcome) => break outcome,
                None => {}
            }

            let elapsed = start_time.elapsed().as_millis() as u64;
            if elapsed >= effective_budget {
                break self.fall_back(turn, request, effective_budget);
            }

            tokio::time::sleep(polling_interval).await;
        };

        match &outcome {
            Ok(action) => {
                info!(
                    "Turn {}: Chose {} (time: {}ms)",
                    turn,
                    action,
                    start_time.elapsed().as_millis()
                );
                self.logger.log_turn(turn, request.clone(), action);
            }
            Err(e) => error!("Turn {}: failed: {}", turn, e),
        }

        outcome
    }
}
