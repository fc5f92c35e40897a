use std::str::FromStr;

/// Topic used when the listener did not ask for one
pub const DEFAULT_TOPIC: &str = "General content overview";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Fun,
    Formal,
}

impl Tone {
    pub fn display_name(&self) -> &'static str {
        match self {
            Tone::Fun => "Fun",
            Tone::Formal => "Formal",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fun" => Ok(Tone::Fun),
            "formal" => Ok(Tone::Formal),
            _ => Err(format!("Unknown tone: {}", s)),
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PodcastLength {
    Short,
    #[default]
    Medium,
}

impl PodcastLength {
    pub fn display_name(&self) -> &'static str {
        match self {
            PodcastLength::Short => "Short (1-2 min)",
            PodcastLength::Medium => "Medium (3-5 min)",
        }
    }
}

/// Accepts the form labels ("Short (1-2 min)") as well as bare names ("short")
impl FromStr for PodcastLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized == "short" || normalized == PodcastLength::Short.display_name().to_lowercase() {
            Ok(PodcastLength::Short)
        } else if normalized == "medium"
            || normalized == PodcastLength::Medium.display_name().to_lowercase()
        {
            Ok(PodcastLength::Medium)
        } else {
            Err(format!("Unknown length: {}", s))
        }
    }
}

impl std::fmt::Display for PodcastLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Presentation parameters for a script.
///
/// Built once per conversion and never mutated. The language is kept as the
/// raw display label so the script echoes exactly what was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptParameters {
    topic: String,
    tone: Tone,
    length: PodcastLength,
    language: String,
}

impl ScriptParameters {
    pub fn new(
        topic: Option<&str>,
        tone: Tone,
        length: PodcastLength,
        language: impl Into<String>,
    ) -> Self {
        let topic = topic
            .filter(|topic| !topic.trim().is_empty())
            .unwrap_or(DEFAULT_TOPIC)
            .to_string();

        Self {
            topic,
            tone,
            length,
            language: language.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn length(&self) -> PodcastLength {
        self.length
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}
