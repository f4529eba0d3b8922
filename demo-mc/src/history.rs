//! Per-session history of generated tracks
//!
//! The store keeps every record in generation order; only the front end
//! decides how many to show. Records are never mutated or deleted
//! individually; the whole store goes away with its session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// One successfully generated and persisted track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub file_path: PathBuf,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl TrackRecord {
    pub fn new(file_path: PathBuf, prompt: String, created_at: DateTime<Utc>) -> Self {
        Self {
            file_path,
            prompt,
            created_at,
        }
    }

    /// File name component, used as the download name
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<TrackRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the end
    pub fn append(&mut self, record: TrackRecord) {
        self.records.push(record);
    }

    /// Up to the last `n` records, most recent first
    pub fn recent(&self, n: usize) -> Vec<&TrackRecord> {
        self.records.iter().rev().take(n).collect()
    }

    /// Record by insertion index (0 = first generated)
    pub fn get(&self, index: usize) -> Option<&TrackRecord> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&TrackRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
