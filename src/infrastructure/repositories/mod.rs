pub mod espeak_tts_repository;
pub mod google_tts_repository;
pub mod tts_repository;

pub use espeak_tts_repository::EspeakTtsRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use tts_repository::TtsRepository;
