use super::model::ScriptParameters;
use std::fmt::Write;

/// Characters of extracted text quoted in the main content section
pub const MAIN_CONTENT_LIMIT: usize = 500;

const INTRODUCTION: &str =
    "Welcome to today's podcast! We'll be discussing content from your uploaded document.";
const OUTRO: &str = "Thank you for listening! This podcast was generated from your PDF content.";

/// Fill the podcast template with the document text.
///
/// Deterministic for identical inputs. Formatting failures come back as an
/// error string instead of a script so callers always get text to show.
pub fn compose_script(text: &str, params: &ScriptParameters) -> String {
    match render(text, params) {
        Ok(script) => script.trim().to_string(),
        Err(e) => {
            tracing::error!(error = %e, "Script generation failed");
            format!("Error generating script: {}", e)
        }
    }
}

fn render(text: &str, params: &ScriptParameters) -> Result<String, std::fmt::Error> {
    let tone = params.tone().display_name();
    let length = params.length().display_name();
    let mut script = String::new();

    writeln!(script, "# Podcast Script")?;
    writeln!(script)?;
    writeln!(script, "**Topic:** Focusing on: {}", params.topic())?;
    writeln!(script, "**Tone:** {}", tone)?;
    writeln!(script, "**Length:** {}", length)?;
    writeln!(script, "**Language:** {}", params.language())?;
    writeln!(script)?;
    writeln!(script, "## Introduction")?;
    writeln!(script, "{}", INTRODUCTION)?;
    writeln!(script)?;
    writeln!(script, "## Main Content")?;
    writeln!(script, "{}", excerpt(text))?;
    writeln!(script)?;
    writeln!(script, "## Summary")?;
    writeln!(
        script,
        "This podcast covered the key points from your document. The content has been adapted to a {} tone and formatted for {} listening.",
        tone.to_lowercase(),
        length.to_lowercase()
    )?;
    writeln!(script)?;
    writeln!(script, "## Outro")?;
    writeln!(script, "{}", OUTRO)?;

    Ok(script)
}

/// First MAIN_CONTENT_LIMIT characters, with "..." when anything was cut
fn excerpt(text: &str) -> String {
    match text.char_indices().nth(MAIN_CONTENT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
