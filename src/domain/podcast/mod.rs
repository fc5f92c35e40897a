pub mod dto;
pub mod model;
pub mod service;

pub use dto::ConversionResponse;
pub use model::{ConversionRequest, ConversionResult};
pub use service::{ConversionService, ConversionServiceApi, AUDIO_FAILED_NOTICE, MISSING_PDF_MESSAGE};
