pub mod artifact;
pub mod error;
pub mod language;
pub mod service;

pub use artifact::{AudioArtifact, AudioFormat};
pub use error::SynthesisError;
pub use language::Language;
pub use service::{SpeechBackend, SpeechSynthesizer, SpeechSynthesizerApi};
