use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodebookError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("category group '{0}' is empty")]
    EmptyGroup(&'static str),

    #[error("duplicate category '{name}' in {group}")]
    DuplicateCategory { group: &'static str, name: String },

    #[error("'{0}' is a reserved category name")]
    ReservedCategory(String),

    #[error("no result recorded for request '{0}'")]
    NoResult(String),
}
