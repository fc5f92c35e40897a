use crate::domain::tts::{AudioArtifact, AudioFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const ARTIFACT_PREFIX: &str = "podcast-";

static ARTIFACT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^podcast-[A-Za-z0-9]+\.(mp3|wav)$").expect("artifact name pattern is valid")
});

/// Audio artifacts living in the work directory.
///
/// Files are created with unique names. `take` hands the bytes out once and
/// deletes the file; artifacts nobody downloaded are swept by `purge` at
/// startup.
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reserve an empty artifact file for a backend that writes the audio itself
    pub fn reserve(&self, format: AudioFormat) -> std::io::Result<AudioArtifact> {
        let (_file, artifact) = self.create(format)?;
        Ok(artifact)
    }

    /// Store audio bytes received from a backend as a new artifact
    pub async fn write(&self, format: AudioFormat, audio: &[u8]) -> std::io::Result<AudioArtifact> {
        let (file, artifact) = self.create(format)?;

        let mut file = tokio::fs::File::from_std(file);
        let written = async {
            file.write_all(audio).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            self.discard(&artifact).await;
            return Err(e);
        }

        tracing::debug!(
            path = %artifact.path().display(),
            audio_size_bytes = audio.len(),
            "Audio artifact written"
        );
        Ok(artifact)
    }

    /// Read an artifact by file name and delete it.
    ///
    /// Returns `None` for names that were not issued by this store or files
    /// that no longer exist.
    pub async fn take(&self, file_name: &str) -> std::io::Result<Option<(AudioFormat, Vec<u8>)>> {
        let Some(artifact) = self.lookup(file_name) else {
            tracing::warn!(file_name, "Rejected audio artifact name");
            return Ok(None);
        };

        let audio = match tokio::fs::read(artifact.path()).await {
            Ok(audio) => audio,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        self.discard(&artifact).await;
        Ok(Some((artifact.format(), audio)))
    }

    /// Delete an artifact; failures are only logged
    pub async fn discard(&self, artifact: &AudioArtifact) {
        if let Err(e) = tokio::fs::remove_file(artifact.path()).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(
                    path = %artifact.path().display(),
                    error = %e,
                    "Failed to remove audio artifact"
                );
            }
        }
    }

    /// Remove artifacts left over from a previous run. Other files in the
    /// directory are kept. Returns how many artifacts were removed.
    pub async fn purge(&self) -> std::io::Result<usize> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(artifact) = file_name.to_str().and_then(|name| self.lookup(name)) else {
                continue;
            };
            self.discard(&artifact).await;
            removed += 1;
        }

        if removed > 0 {
            tracing::info!(removed, "Removed stale audio artifacts");
        }
        Ok(removed)
    }

    fn create(&self, format: AudioFormat) -> std::io::Result<(std::fs::File, AudioArtifact)> {
        let suffix = format!(".{}", format.extension());
        let temp_file = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(&suffix)
            .tempfile_in(&self.dir)?;
        let (file, path) = temp_file.keep().map_err(|e| e.error)?;

        Ok((file, AudioArtifact::new(path, format)))
    }

    fn lookup(&self, file_name: &str) -> Option<AudioArtifact> {
        if !ARTIFACT_NAME.is_match(file_name) {
            return None;
        }
        let extension = Path::new(file_name).extension()?.to_str()?;
        let format = AudioFormat::from_extension(extension)?;

        Some(AudioArtifact::new(self.dir.join(file_name), format))
    }
}
