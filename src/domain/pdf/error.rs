#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The document could not be parsed; shown to the user as-is
    #[error("Error extracting text from PDF: {0}")]
    Parse(String),
    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),
    /// The blocking task was cancelled before it finished
    #[error("extraction task failed: {0}")]
    Task(String),
}

impl ExtractionError {
    /// Parse failures are expected outcomes of bad uploads; everything else is a fault
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ExtractionError::Parse(_))
    }
}
