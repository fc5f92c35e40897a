pub mod error;
pub mod service;

pub use error::ExtractionError;
pub use service::PdfTextExtractor;
