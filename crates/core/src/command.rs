// Restream command template substitution

use crate::select::SelectionResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Video,
    Audio,
    Target,
    Media,
}

impl Placeholder {
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Video,
        Placeholder::Audio,
        Placeholder::Target,
        Placeholder::Media,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Video => "$video",
            Placeholder::Audio => "$audio",
            Placeholder::Target => "$target",
            Placeholder::Media => "$media",
        }
    }
}

/// Ordered argument tokens, first token is the program to run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(Vec<String>);

impl CommandTemplate {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any token contains the placeholder
    pub fn references(&self, placeholder: Placeholder) -> bool {
        self.0.iter().any(|t| t.contains(placeholder.token()))
    }

    /// Default restream template: copy the selected tracks into an FLV ingest
    pub fn default_restream() -> Self {
        Self::new([
            "ffmpeg", "-re", "-i", "$media", "-map", "$video", "-map", "$audio", "-c", "copy",
            "-f", "flv", "$target",
        ])
    }
}

/// Substitute the selection and URLs into a copy of the template
///
/// Every occurrence of each placeholder is replaced inside every token:
/// - `$video` / `$audio` become `0:<index>` (program 0 stream specifier)
/// - `$target` becomes `ingest_base` followed directly by `stream_key`
/// - `$media` becomes `media_url`
pub fn build_command(
    template: &CommandTemplate,
    result: &SelectionResult,
    media_url: &str,
    ingest_base: &str,
    stream_key: &str,
) -> Vec<String> {
    let video = format!("0:{}", result.video_index());
    let audio = format!("0:{}", result.audio_index());
    let target = format!("{}{}", ingest_base, stream_key);

    template
        .tokens()
        .iter()
        .map(|token| {
            token
                .replace(Placeholder::Video.token(), &video)
                .replace(Placeholder::Audio.token(), &audio)
                .replace(Placeholder::Target.token(), &target)
                .replace(Placeholder::Media.token(), media_url)
        })
        .collect()
}

/// Join a built command into one line a POSIX shell reads back as the same argv
///
/// Tokens made only of safe characters are left bare, everything else is
/// single-quoted with embedded quotes written as `'\''`.
pub fn render_command(argv: &[String]) -> String {
    argv.iter()
        .map(|token| {
            let safe = !token.is_empty()
                && token.chars().all(|c| {
                    c.is_ascii_alphanumeric()
                        || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '+' | '@' | '%')
                });
            if safe {
                token.clone()
            } else {
                format!("'{}'", token.replace('\'', r"'\''"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
