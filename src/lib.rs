// Library exports for the cheese-race agent
// This allows the server, the replay tool and the tests to share the planning core

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod greedy;
pub mod policy;
pub mod position;
pub mod replay;
pub mod scoring;
pub mod search;
pub mod simulation;
pub mod state;
pub mod turn;
pub mod types;
