/// Why a single speech backend failed to produce an artifact
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("networked TTS error: {0}")]
    Provider(String),
    #[error("offline TTS engine error: {0}")]
    Engine(String),
    #[error("backend produced no audio")]
    EmptyOutput,
    #[error("audio file error: {0}")]
    Io(#[from] std::io::Error),
}
