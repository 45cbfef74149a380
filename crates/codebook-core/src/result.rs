//! Classification requests and normalized results.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::codebook::{Codebook, ERROR_KEY, EvidenceMode, GroupKind};
use crate::evidence::Evidence;
use crate::CodebookError;

/// Everything needed to build one instruction for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub subject_text: String,
    pub predetermined: Vec<String>,
    pub emergent: Vec<String>,
    /// Caller-supplied; duplicates and casing are kept as given.
    pub custom: Vec<String>,
    pub evidence_mode: EvidenceMode,
}

impl ClassificationRequest {
    pub fn new(codebook: &Codebook, subject_text: &str, custom: &[String]) -> Self {
        Self {
            subject_text: subject_text.to_string(),
            predetermined: codebook.predetermined.clone(),
            emergent: codebook.emergent.clone(),
            custom: custom.to_vec(),
            evidence_mode: codebook.evidence_mode,
        }
    }

    pub fn group(&self, kind: GroupKind) -> &[String] {
        match kind {
            GroupKind::Predetermined => &self.predetermined,
            GroupKind::Emergent => &self.emergent,
            GroupKind::Custom => &self.custom,
        }
    }

    /// Groups that appear in the instruction and the expected reply.
    /// `Custom` is included only when custom categories were supplied.
    pub fn active_groups(&self) -> impl Iterator<Item = GroupKind> + '_ {
        GroupKind::ALL
            .into_iter()
            .filter(|kind| *kind != GroupKind::Custom || !self.custom.is_empty())
    }
}

/// Ordered mapping from category name to evidence.
///
/// Goes through a `serde_json::Map` on the wire; `preserve_order` keeps the
/// category order intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct CodeMap {
    entries: Vec<(String, Evidence)>,
}

impl CodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, evidence: Evidence) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = evidence,
            None => self.entries.push((name, evidence)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Evidence> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Evidence)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalize one reply group onto the configured categories.
    ///
    /// Reply keys are matched trimmed and case-insensitively; the first match
    /// wins. Configured categories without a match get the sentinel, and
    /// keys that match nothing are dropped.
    pub fn normalize(reply: &Map<String, Value>, categories: &[String]) -> Self {
        let mut out = Self::new();
        for name in categories {
            if out.contains_key(name) {
                continue;
            }
            let evidence = reply
                .iter()
                .find(|(k, _)| same_category(k, name))
                .map(|(_, v)| Evidence::from_value(v))
                .unwrap_or_default();
            out.insert(name.clone(), evidence);
        }
        for key in reply.keys() {
            if !categories.iter().any(|name| same_category(key, name)) {
                debug!(key = %key, "dropping unrequested category from reply");
            }
        }
        out
    }
}

fn same_category(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl From<Map<String, Value>> for CodeMap {
    fn from(map: Map<String, Value>) -> Self {
        let mut out = Self::new();
        for (name, value) in &map {
            out.insert(name.clone(), Evidence::from_value(value));
        }
        out
    }
}

impl From<CodeMap> for Map<String, Value> {
    fn from(codes: CodeMap) -> Self {
        codes
            .entries
            .into_iter()
            .map(|(name, evidence)| (name, Value::from(evidence.items().to_vec())))
            .collect()
    }
}

/// Normalized result of one classification round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "predetermined_codes", default)]
    pub predetermined: CodeMap,
    #[serde(rename = "emergent_codes", default)]
    pub emergent: CodeMap,
    #[serde(rename = "custom_codes", default)]
    pub custom: CodeMap,
}

impl ClassificationResult {
    /// The degraded result: a single `error` entry in both fixed groups.
    pub fn failure(reason: impl fmt::Display) -> Self {
        let message = format!("Analysis failed: {reason}");
        let mut predetermined = CodeMap::new();
        predetermined.insert(ERROR_KEY, Evidence::from_items([message.clone()]));
        let mut emergent = CodeMap::new();
        emergent.insert(ERROR_KEY, Evidence::from_items([message]));
        Self {
            predetermined,
            emergent,
            custom: CodeMap::new(),
        }
    }

    /// Parse and normalize a reply body for the given request.
    pub fn from_reply(reply: &str, request: &ClassificationRequest) -> Result<Self, CodebookError> {
        let value: Value = serde_json::from_str(reply)?;
        let Value::Object(root) = value else {
            return Err(CodebookError::NotAnObject);
        };

        let empty = Map::new();
        let group = |kind: GroupKind| match root.get(kind.key()) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        };

        let predetermined = CodeMap::normalize(
            group(GroupKind::Predetermined).unwrap_or(&empty),
            &request.predetermined,
        );
        let emergent = CodeMap::normalize(
            group(GroupKind::Emergent).unwrap_or(&empty),
            &request.emergent,
        );
        // An omitted custom group stays empty rather than being filled.
        let custom = match group(GroupKind::Custom) {
            Some(map) if !request.custom.is_empty() => CodeMap::normalize(map, &request.custom),
            _ => CodeMap::new(),
        };

        Ok(Self {
            predetermined,
            emergent,
            custom,
        })
    }

    pub fn group(&self, kind: GroupKind) -> &CodeMap {
        match kind {
            GroupKind::Predetermined => &self.predetermined,
            GroupKind::Emergent => &self.emergent,
            GroupKind::Custom => &self.custom,
        }
    }

    /// The failure description, if this is a degraded result.
    pub fn error_message(&self) -> Option<String> {
        self.predetermined
            .get(ERROR_KEY)
            .or_else(|| self.emergent.get(ERROR_KEY))
            .filter(|ev| !ev.is_empty())
            .map(|ev| ev.items().join("\n"))
    }

    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }

    /// Category names per group, in order. Equal shapes mean equal key sets.
    pub fn shape(&self) -> Vec<(GroupKind, Vec<String>)> {
        GroupKind::ALL
            .into_iter()
            .map(|kind| (kind, self.group(kind).keys().map(str::to_string).collect()))
            .collect()
    }
}
