//! File-backed probe sequence counter
//!
//! Persists the last allocated sequence number so probes stay unique across
//! runs. A reused number could bind a fresh record to a stale ticket, so the
//! state file is the durability boundary: a number is only handed out after
//! the incremented state has reached disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ticketprobe_core::SequenceProvider;
use ticketprobe_domain::{Result, TicketProbeError};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CounterState {
    last_sequence: u64,
}

/// Monotonic sequence numbers backed by a small JSON state file.
pub struct FileSequenceProvider {
    path: PathBuf,
    // Serializes the read-increment-write cycle within this process.
    lock: Mutex<()>,
}

impl FileSequenceProvider {
    /// Use (or create on first allocation) the state file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    fn read_state(path: &Path) -> Result<CounterState> {
        if !path.exists() {
            return Ok(CounterState::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TicketProbeError::Internal(format!(
                "failed to read sequence state {}: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            TicketProbeError::Internal(format!(
                "corrupt sequence state {}: {e}",
                path.display()
            ))
        })
    }

    fn write_state(path: &Path, state: &CounterState) -> Result<()> {
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| TicketProbeError::Internal(format!("failed to encode sequence state: {e}")))?;

        // Write-temp-then-rename so a crash never leaves a half-written
        // state file behind.
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, raw).map_err(|e| {
            TicketProbeError::Internal(format!(
                "failed to write sequence state {}: {e}",
                tmp.display()
            ))
        })?;
        std::fs::rename(&tmp, path).map_err(|e| {
            TicketProbeError::Internal(format!(
                "failed to replace sequence state {}: {e}",
                path.display()
            ))
        })
    }
}

#[async_trait]
impl SequenceProvider for FileSequenceProvider {
    async fn next_sequence(&self) -> Result<u64> {
        let _guard = self.lock.lock().await;

        let mut state = Self::read_state(&self.path)?;
        state.last_sequence += 1;
        Self::write_state(&self.path, &state)?;

        debug!(sequence = state.last_sequence, "allocated probe sequence number");
        Ok(state.last_sequence)
    }
}
