use std::path::{Path, PathBuf};

/// Container format of a synthesized audio file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            _ => None,
        }
    }
}

/// Handle to a synthesized audio file in the work directory.
///
/// The file outlives the conversion that produced it; whoever receives the
/// artifact is responsible for deleting it once the audio has been consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    path: PathBuf,
    format: AudioFormat,
}

impl AudioArtifact {
    pub fn new(path: PathBuf, format: AudioFormat) -> Self {
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}
