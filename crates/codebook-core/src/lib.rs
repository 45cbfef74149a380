pub mod codebook;
mod error;
pub mod evidence;
pub mod history;
pub mod prompt;
pub mod result;
pub mod subject;

pub use codebook::{Codebook, EvidenceMode, GroupKind};
pub use error::CodebookError;
pub use evidence::Evidence;
pub use history::{ArchiveEntry, ResultStore};
pub use result::{ClassificationRequest, ClassificationResult, CodeMap};
pub use subject::{StudentResponse, SurveyAnswer};
