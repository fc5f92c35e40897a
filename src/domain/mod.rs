pub mod pdf;
pub mod podcast;
pub mod script;
pub mod tts;
