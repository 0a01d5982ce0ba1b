//! Bet history persistence.
//!
//! Accepted picks are appended to a flat JSON file through the
//! `HistoryStore` trait, so nothing else in the crate depends on the
//! storage format. The store assigns the timestamp and entry id.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::ValueBet;

/// Number of most-recent entries a history query returns.
const QUERY_LIMIT: usize = 50;

/// One persisted pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    /// When the pick was saved (assigned by the store, not the engine).
    pub saved_at: DateTime<Utc>,
    pub bet: ValueBet,
}

/// Append/query interface over durable bet history.
pub trait HistoryStore: Send + Sync {
    /// Append a batch of picks, all stamped with `saved_at`.
    fn append(&self, bets: &[ValueBet], saved_at: DateTime<Utc>) -> Result<()>;

    /// Entries saved on or after `from`, oldest first, capped at the most
    /// recent [`QUERY_LIMIT`].
    fn entries_since(&self, from: NaiveDate) -> Result<Vec<HistoryEntry>>;
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Whole-file JSON history. Reads the full file, appends, writes it back —
/// fine for a single-user dashboard saving a handful of picks at a time.
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing file reads as an empty history (fresh start), not an error.
    fn read_all(&self) -> Result<Vec<HistoryEntry>> {
        if !Path::new(&self.path).exists() {
            debug!(path = %self.path.display(), "No history file yet");
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history from {}", self.path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse history from {}", self.path.display()))
    }

    fn write_all(&self, entries: &[HistoryEntry]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialise bet history")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history to {}", self.path.display()))
    }
}

impl HistoryStore for JsonFileHistory {
    fn append(&self, bets: &[ValueBet], saved_at: DateTime<Utc>) -> Result<()> {
        if bets.is_empty() {
            return Ok(());
        }
        let mut entries = self.read_all()?;
        entries.extend(bets.iter().map(|bet| HistoryEntry {
            id: Uuid::new_v4(),
            saved_at,
            bet: bet.clone(),
        }));
        self.write_all(&entries)?;
        info!(
            path = %self.path.display(),
            saved = bets.len(),
            total = entries.len(),
            "Bets saved to history"
        );
        Ok(())
    }

    fn entries_since(&self, from: NaiveDate) -> Result<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| e.saved_at.date_naive() >= from)
            .collect();
        entries.sort_by_key(|e| e.saved_at);
        if entries.len() > QUERY_LIMIT {
            entries.drain(..entries.len() - QUERY_LIMIT);
        }
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
