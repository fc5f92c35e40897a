use super::error::ExtractionError;
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};

const UPLOAD_PREFIX: &str = "upload-";

/// Extracts plain text from uploaded PDFs.
///
/// Uploads are staged in a uniquely named temporary file inside `work_dir`
/// which is removed before `extract` returns, whatever the outcome.
pub struct PdfTextExtractor {
    work_dir: PathBuf,
}

impl PdfTextExtractor {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Text of every page in document order, one line break between pages,
    /// trimmed. A page without text contributes an empty string.
    pub async fn extract(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
        let work_dir = self.work_dir.clone();
        let pdf_bytes = pdf_bytes.to_vec();

        let text = tokio::task::spawn_blocking(move || extract_via_temp_file(&work_dir, &pdf_bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;

        tracing::info!(text_length = text.len(), "PDF text extracted");
        Ok(text)
    }
}

fn extract_via_temp_file(work_dir: &Path, pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut temp_file = tempfile::Builder::new()
        .prefix(UPLOAD_PREFIX)
        .suffix(".pdf")
        .tempfile_in(work_dir)?;
    temp_file.write_all(pdf_bytes)?;
    temp_file.flush()?;

    let temp_path = temp_file.path().to_path_buf();
    tracing::debug!(path = %temp_path.display(), size = pdf_bytes.len(), "Staged uploaded PDF");

    // lopdf panics on some malformed font dictionaries
    let result = std::panic::catch_unwind(|| read_pages(&temp_path)).unwrap_or_else(|panic| {
        let message = panic_message(panic.as_ref());
        tracing::error!(error = %message, "PDF parser panicked");
        Err(ExtractionError::Parse(message))
    });

    if let Err(e) = temp_file.close() {
        tracing::warn!(
            path = %temp_path.display(),
            error = %e,
            "Failed to remove temporary PDF file"
        );
    }

    result
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "malformed document".to_string()
    }
}

fn read_pages(path: &Path) -> Result<String, ExtractionError> {
    let document = Document::load(path).map_err(|e| {
        tracing::error!(error = %e, "PDF could not be parsed");
        ExtractionError::Parse(e.to_string())
    })?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| {
                tracing::error!(page = *page_number, error = %e, "PDF page text extraction failed");
                ExtractionError::Parse(e.to_string())
            })?;
        pages.push(page_text);
    }

    tracing::debug!(page_count = pages.len(), "PDF pages read");
    Ok(pages.join("\n").trim().to_string())
}
