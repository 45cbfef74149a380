//! Subject text and codebook resolution from command-line input.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use codebook_core::subject::{DEFAULT_ROLE, cohort_subject_text};
use codebook_core::{Codebook, EvidenceMode, StudentResponse, SurveyAnswer};

/// Subject id for a whole-cohort classification.
pub const COHORT_ID: &str = "All Students";

/// Where the subject text comes from. With none of `--text`, `--file`,
/// `--student` or `--cohort`, the text is read from stdin.
#[derive(Args, Debug, Default)]
pub struct SubjectArgs {
    /// Response text to classify.
    #[arg(long, conflicts_with_all = ["file", "student", "cohort"])]
    pub text: Option<String>,

    /// Read the response text from a file.
    #[arg(long, conflicts_with_all = ["student", "cohort"])]
    pub file: Option<PathBuf>,

    /// JSON array of `{"student", "answers"}` records, classified together
    /// as one subject.
    #[arg(long, conflicts_with = "student")]
    pub cohort: Option<PathBuf>,

    /// Respondent name; builds the text from `--answer` pairs.
    #[arg(long)]
    pub student: Option<String>,

    /// `"<question>=<answer>"`, repeatable.
    #[arg(long = "answer", requires = "student")]
    pub answers: Vec<String>,

    /// Role shown after the respondent name.
    #[arg(long, default_value = DEFAULT_ROLE)]
    pub role: String,

    /// Identifier used for display and archiving.
    #[arg(long)]
    pub subject_id: Option<String>,

    /// Extra category to code for, repeatable.
    #[arg(long = "custom")]
    pub custom: Vec<String>,
}

impl SubjectArgs {
    /// Resolve to `(subject_id, subject_text)`.
    pub fn resolve(&self) -> anyhow::Result<(String, String)> {
        let text = if let Some(text) = &self.text {
            text.clone()
        } else if let Some(path) = &self.file {
            std::fs::read_to_string(path)
                .with_context(|| format!("reading subject text {}", path.display()))?
        } else if let Some(student) = &self.student {
            let answers = self
                .answers
                .iter()
                .map(|pair| {
                    SurveyAnswer::parse(pair)
                        .with_context(|| format!("expected \"<question>=<answer>\", got {pair:?}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            if answers.is_empty() {
                bail!("--student needs at least one --answer");
            }
            StudentResponse {
                student: student.clone(),
                answers,
            }
            .subject_text(&self.role)
        } else if let Some(path) = &self.cohort {
            cohort_subject_text(&read_cohort(path)?)
        } else {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading subject text from stdin")?;
            buf
        };

        let id = self
            .subject_id
            .clone()
            .or_else(|| self.student.clone())
            .or_else(|| self.cohort.as_ref().map(|_| COHORT_ID.to_string()))
            .unwrap_or_else(|| "response".to_string());
        Ok((id, text))
    }
}

fn read_cohort(path: &Path) -> anyhow::Result<Vec<StudentResponse>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading cohort {}", path.display()))?;
    let responses: Vec<StudentResponse> = serde_json::from_str(&json)
        .with_context(|| format!("parsing cohort {}", path.display()))?;
    if responses.is_empty() {
        bail!("cohort {} has no responses", path.display());
    }
    Ok(responses)
}

#[derive(Args, Debug, Default)]
pub struct CodebookArgs {
    /// JSON codebook replacing the built-in category groups.
    #[arg(long)]
    pub codebook: Option<PathBuf>,

    /// Ask for literal quotes instead of explanations.
    #[arg(long)]
    pub quotes: bool,
}

impl CodebookArgs {
    pub fn load(&self) -> anyhow::Result<Codebook> {
        let codebook = match &self.codebook {
            Some(path) => read_codebook(path)?,
            None => Codebook::default(),
        };
        Ok(if self.quotes {
            codebook.with_evidence_mode(EvidenceMode::Quotes)
        } else {
            codebook
        })
    }
}

fn read_codebook(path: &Path) -> anyhow::Result<Codebook> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading codebook {}", path.display()))?;
    Codebook::from_json(&json).with_context(|| format!("invalid codebook {}", path.display()))
}
