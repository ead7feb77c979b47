mod document;
mod error;
mod extract;
mod prompts;

pub use document::{AnalysisDocument, Flag};
pub use error::AnalysisError;
pub use extract::extract_fragment;
pub use prompts::AnalysisPrompts;
