//! Response classifier.
//!
//! Renders the codebook instruction for a subject text, sends it to the chat
//! service once, and normalizes the JSON reply. Every failure is absorbed
//! into [`ClassificationResult::failure`], so callers always get a result
//! with the same top-level shape.

use codebook_core::prompt::{SYSTEM_PROMPT, render_instruction};
use codebook_core::{ClassificationRequest, ClassificationResult, Codebook, CodebookError};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm::{ChatBackend, ChatMessage, ChatRequest, LlmError, ResponseFormat};

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Sampling temperature for every classification request.
pub const TEMPERATURE: f32 = 0.7;

#[derive(Error, Debug)]
enum ClassifyError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Reply(#[from] CodebookError),
}

/// Holds only static configuration; `classify` is safe to call concurrently.
pub struct Classifier<B> {
    backend: B,
    codebook: Codebook,
    model: String,
}

impl<B: ChatBackend> Classifier<B> {
    pub fn new(backend: B, codebook: Codebook) -> Self {
        Self {
            backend,
            codebook,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, subject_text: &str, custom: &[String]) -> ClassificationRequest {
        ClassificationRequest::new(&self.codebook, subject_text, custom)
    }

    /// The chat request sent for a classification request.
    pub fn chat_request(&self, request: &ClassificationRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(render_instruction(request)),
            ],
            response_format: Some(ResponseFormat::json_object()),
            temperature: TEMPERATURE,
        }
    }

    /// Classify `subject_text` against the codebook plus `custom_categories`.
    ///
    /// Makes exactly one call to the backend. Never fails: on any error the
    /// result carries an `error` entry in both fixed groups and no custom codes.
    pub async fn classify(
        &self,
        subject_text: &str,
        custom_categories: &[String],
    ) -> ClassificationResult {
        let request = self.build_request(subject_text, custom_categories);
        info!(
            model = %self.model,
            evidence_mode = request.evidence_mode.as_str(),
            custom = request.custom.len(),
            chars = request.subject_text.len(),
            "classifying response"
        );

        match self.try_classify(&request).await {
            Ok(result) => {
                info!(
                    predetermined = result.predetermined.len(),
                    emergent = result.emergent.len(),
                    custom = result.custom.len(),
                    "classification complete"
                );
                result
            }
            Err(e) => {
                warn!(error = %e, "classification failed");
                ClassificationResult::failure(e)
            }
        }
    }

    async fn try_classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifyError> {
        let reply = self.backend.complete(&self.chat_request(request)).await?;
        Ok(ClassificationResult::from_reply(&reply, request)?)
    }
}
