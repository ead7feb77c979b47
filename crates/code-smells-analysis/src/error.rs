use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No output fragment found in model response")]
    NoFragment,

    #[error("Malformed analysis document: {0}")]
    Malformed(roxmltree::Error),

    #[error("Missing required element: {0}")]
    MissingElement(&'static str),
}
