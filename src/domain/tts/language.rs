use serde::{Deserialize, Serialize};

/// Languages offered by the podcast form, keyed by their display label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Chinese,
    Japanese,
    Korean,
    Hindi,
    Portuguese,
    Russian,
    Italian,
    Turkish,
    Polish,
}

impl Language {
    pub const ALL: [Language; 13] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Japanese,
        Language::Korean,
        Language::Hindi,
        Language::Portuguese,
        Language::Russian,
        Language::Italian,
        Language::Turkish,
        Language::Polish,
    ];

    /// Language code sent to the networked TTS service
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Hindi => "hi",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Italian => "it",
            Language::Turkish => "tr",
            Language::Polish => "pl",
        }
    }

    /// Label shown in the form and echoed in the script
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Hindi => "Hindi",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Italian => "Italian",
            Language::Turkish => "Turkish",
            Language::Polish => "Polish",
        }
    }

    /// Exact lookup by display label
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.display_name() == name)
    }

    /// Resolve a display label for synthesis.
    /// Unknown labels synthesize as English.
    pub fn resolve(name: &str) -> Self {
        Self::from_display_name(name).unwrap_or_else(|| {
            tracing::debug!(language = name, "Unknown language label, synthesizing as English");
            Language::English
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
