//! Category groups used to code survey responses.
//!
//! A [`Codebook`] holds the two fixed groups (predetermined and emergent).
//! Custom categories are supplied per request and never stored here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::CodebookError;

/// Categories defined in advance by the study design.
pub const PREDETERMINED_CODES: &[&str] = &[
    "Academic Language Support",
    "Grammar Support",
    "Content Knowledge Support",
    "Collaboration with Teachers",
    "Student Engagement",
    "Assessment of Language Proficiency",
];

/// Themes expected to arise inductively from the text.
pub const EMERGENT_CODES: &[&str] = &[
    "Perceptions of Language Acquisition",
    "Perceived Challenges",
    "Innovative Practices",
    "Perceptions of Error",
];

/// Key reserved for the synthetic failure entry.
pub const ERROR_KEY: &str = "error";

/// What the service is asked to return for each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceMode {
    /// Short explanations of the relevant content.
    #[default]
    Explanation,
    /// Literal quotes copied from the subject text.
    Quotes,
}

impl EvidenceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explanation => "explanation",
            Self::Quotes => "quotes",
        }
    }
}

/// The three category groups of a classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Predetermined,
    Emergent,
    Custom,
}

impl GroupKind {
    pub const ALL: [GroupKind; 3] = [Self::Predetermined, Self::Emergent, Self::Custom];

    /// Top-level key in the reply JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Predetermined => "predetermined_codes",
            Self::Emergent => "emergent_codes",
            Self::Custom => "custom_codes",
        }
    }

    /// Human-readable heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Predetermined => "Predetermined Codes",
            Self::Emergent => "Emergent Codes",
            Self::Custom => "Custom Codes",
        }
    }
}

/// The fixed category groups plus the evidence mode used when prompting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codebook {
    pub predetermined: Vec<String>,
    pub emergent: Vec<String>,
    #[serde(default)]
    pub evidence_mode: EvidenceMode,
}

impl Default for Codebook {
    fn default() -> Self {
        Self {
            predetermined: PREDETERMINED_CODES.iter().map(|s| s.to_string()).collect(),
            emergent: EMERGENT_CODES.iter().map(|s| s.to_string()).collect(),
            evidence_mode: EvidenceMode::default(),
        }
    }
}

impl Codebook {
    /// Parse a codebook from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, CodebookError> {
        let codebook: Self = serde_json::from_str(json)?;
        codebook.validate()?;
        Ok(codebook)
    }

    pub fn with_evidence_mode(mut self, mode: EvidenceMode) -> Self {
        self.evidence_mode = mode;
        self
    }

    /// Both fixed groups must be non-empty, free of duplicates (case-insensitive)
    /// and must not use the reserved `error` key.
    pub fn validate(&self) -> Result<(), CodebookError> {
        validate_group(GroupKind::Predetermined, &self.predetermined)?;
        validate_group(GroupKind::Emergent, &self.emergent)?;
        Ok(())
    }

    /// Ordered categories for one fixed group. `Custom` has none here.
    pub fn group(&self, kind: GroupKind) -> &[String] {
        match kind {
            GroupKind::Predetermined => &self.predetermined,
            GroupKind::Emergent => &self.emergent,
            GroupKind::Custom => &[],
        }
    }
}

fn validate_group(kind: GroupKind, categories: &[String]) -> Result<(), CodebookError> {
    if categories.is_empty() {
        return Err(CodebookError::EmptyGroup(kind.key()));
    }
    let mut seen = HashSet::new();
    for name in categories {
        let folded = name.trim().to_lowercase();
        if folded == ERROR_KEY {
            return Err(CodebookError::ReservedCategory(name.clone()));
        }
        if !seen.insert(folded) {
            return Err(CodebookError::DuplicateCategory {
                group: kind.key(),
                name: name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_codebook_has_six_and_four() {
        let cb = Codebook::default();
        assert_eq!(cb.predetermined.len(), 6);
        assert_eq!(cb.emergent.len(), 4);
        assert_eq!(cb.evidence_mode, EvidenceMode::Explanation);
        assert!(cb.validate().is_ok());
    }

    #[test]
    fn from_json_defaults_evidence_mode() {
        let cb = Codebook::from_json(
            r#"{"predetermined": ["Pacing"], "emergent": ["Tone"]}"#,
        )
        .unwrap();
        assert_eq!(cb.predetermined, vec!["Pacing"]);
        assert_eq!(cb.evidence_mode, EvidenceMode::Explanation);
    }

    #[test]
    fn from_json_reads_quotes_mode() {
        let cb = Codebook::from_json(
            r#"{"predetermined": ["A"], "emergent": ["B"], "evidence_mode": "quotes"}"#,
        )
        .unwrap();
        assert_eq!(cb.evidence_mode, EvidenceMode::Quotes);
    }

    #[test]
    fn rejects_empty_group() {
        let err = Codebook::from_json(r#"{"predetermined": [], "emergent": ["B"]}"#).unwrap_err();
        assert!(matches!(err, CodebookError::EmptyGroup("predetermined_codes")));
    }

    #[test]
    fn rejects_case_insensitive_duplicates() {
        let err = Codebook::from_json(
            r#"{"predetermined": ["Grammar", "grammar "], "emergent": ["B"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodebookError::DuplicateCategory { .. }));
    }

    #[test]
    fn rejects_reserved_error_key() {
        let err =
            Codebook::from_json(r#"{"predetermined": ["A"], "emergent": ["Error"]}"#).unwrap_err();
        assert!(matches!(err, CodebookError::ReservedCategory(_)));
    }

    #[test]
    fn custom_group_is_never_stored() {
        assert!(Codebook::default().group(GroupKind::Custom).is_empty());
    }
}
