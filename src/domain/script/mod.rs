pub mod model;
pub mod service;

pub use model::{PodcastLength, ScriptParameters, Tone, DEFAULT_TOPIC};
pub use service::{compose_script, MAIN_CONTENT_LIMIT};
