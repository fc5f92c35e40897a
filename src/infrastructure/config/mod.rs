use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    /// Holds staged uploads and generated audio
    pub work_dir: PathBuf,
    // Speech backends
    pub networked_tts_url: String,
    pub offline_tts_program: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "7860".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").unwrap_or_default().as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").unwrap_or_default().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            work_dir: env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("lumecast")),
            networked_tts_url: env::var("NETWORKED_TTS_URL")
                .unwrap_or_else(|_| "https://translate.google.com".to_string()),
            offline_tts_program: env::var("OFFLINE_TTS_PROGRAM")
                .unwrap_or_else(|_| "espeak-ng".to_string()),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (20 * 1024 * 1024).to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
