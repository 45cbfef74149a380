//! Host-owned result store.
//!
//! Holds the latest result per request id and an archive keyed by
//! (subject, timestamp). The classifier never touches this; hosts pass it
//! around explicitly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::result::ClassificationResult;
use crate::CodebookError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub subject: String,
    pub archived_at: DateTime<Utc>,
    pub result: ClassificationResult,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResultStore {
    #[serde(skip)]
    latest: HashMap<String, ClassificationResult>,
    #[serde(default)]
    archive: Vec<ArchiveEntry>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, CodebookError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CodebookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Record a result, replacing any earlier one for the same request.
    pub fn record(&mut self, request_id: &str, result: ClassificationResult) {
        self.latest.insert(request_id.to_string(), result);
    }

    pub fn latest(&self, request_id: &str) -> Option<&ClassificationResult> {
        self.latest.get(request_id)
    }

    /// Copy the latest result for `request_id` into the archive under `subject`.
    ///
    /// An entry with the same (subject, timestamp) key is replaced.
    pub fn archive(
        &mut self,
        request_id: &str,
        subject: &str,
        at: DateTime<Utc>,
    ) -> Result<&ArchiveEntry, CodebookError> {
        let result = self
            .latest
            .get(request_id)
            .cloned()
            .ok_or_else(|| CodebookError::NoResult(request_id.to_string()))?;

        self.archive
            .retain(|e| !(e.subject == subject && e.archived_at == at));
        self.archive.push(ArchiveEntry {
            subject: subject.to_string(),
            archived_at: at,
            result,
        });
        info!(subject, archived = self.archive.len(), "archived result");
        Ok(&self.archive[self.archive.len() - 1])
    }

    pub fn get(&self, subject: &str, at: DateTime<Utc>) -> Option<&ArchiveEntry> {
        self.archive
            .iter()
            .find(|e| e.subject == subject && e.archived_at == at)
    }

    /// Archived entries, oldest first.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.archive
    }

    pub fn entries_for<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a ArchiveEntry> {
        self.archive.iter().filter(move |e| e.subject == subject)
    }
}
