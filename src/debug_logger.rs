// JSONL turn log written off the request path
//
// One line per answered turn: the turn number, the label sent back and the
// snapshot it answered, stamped with an RFC 3339 time. The line format is
// `replay::LogEntry`, so the replay tool reads back exactly what is written.

use log::{error, info};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::replay::LogEntry;
use crate::types::TurnRequest;

/// Handle to the turn log. Clones share one file; a disabled logger drops every turn.
#[derive(Clone)]
pub struct DebugLogger {
    sink: Option<Arc<Mutex<File>>>,
}

impl DebugLogger {
    /// Opens `log_file_path` for a fresh game log when `enabled`
    ///
    /// An existing file is truncated. If the file cannot be created the error
    /// is logged and the returned logger is disabled.
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let opened = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await;

        match opened {
            Ok(file) => {
                info!("Writing turn log to {}", log_file_path);
                DebugLogger {
                    sink: Some(Arc::new(Mutex::new(file))),
                }
            }
            Err(e) => {
                error!("Cannot create turn log '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        DebugLogger { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Queues one turn line on a tokio task and returns immediately
    ///
    /// Lines from concurrent turns never interleave, but may land out of turn order.
    pub fn log_turn(&self, turn: u64, request: TurnRequest, chosen_action: &str) {
        let Some(sink) = self.sink.clone() else {
            return;
        };

        let entry = LogEntry {
            turn,
            chosen_action: chosen_action.to_string(),
            request,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        tokio::spawn(async move {
            write_entry(&sink, &entry).await;
        });
    }
}

async fn write_entry(sink: &Mutex<File>, entry: &LogEntry) {
    let mut line = match serde_json::to_string(entry) {
        Ok(json) => json,
        Err(e) => {
            error!("Cannot encode turn {} for the turn log: {}", entry.turn, e);
            return;
        }
    };
    line.push('\n');

    let mut file = sink.lock().await;
    if let Err(e) = file.write_all(line.as_bytes()).await {
        error!("Cannot write turn {} to the turn log: {}", entry.turn, e);
    } else if let Err(e) = file.flush().await {
        error!("Cannot flush the turn log: {}", e);
    }
}
