use crate::language::{LanguageCode, DEFAULT_PREFERRED_LANGUAGE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
    Other,
}

/// One probed elementary stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub index: usize,
    pub media_type: MediaType,
    /// Horizontal resolution, 0 for non-video streams
    pub width: u32,
    /// Normalized language, `None` when missing or unparseable
    pub language: Option<LanguageCode>,
}

impl StreamDescriptor {
    pub fn video(index: usize, width: u32) -> Self {
        Self {
            index,
            media_type: MediaType::Video,
            width,
            language: None,
        }
    }

    /// Audio stream with a raw language tag, normalized on construction
    pub fn audio(index: usize, language: Option<&str>) -> Self {
        Self {
            index,
            media_type: MediaType::Audio,
            width: 0,
            language: language.and_then(LanguageCode::parse),
        }
    }

    pub fn other(index: usize) -> Self {
        Self {
            index,
            media_type: MediaType::Other,
            width: 0,
            language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub preferred_language: LanguageCode,
    pub fallback_language: LanguageCode,
    pub force_first_audio_without_language: bool,
}

impl SelectionPolicy {
    pub fn new(preferred_language: LanguageCode, force_first_audio_without_language: bool) -> Self {
        Self {
            preferred_language,
            fallback_language: LanguageCode::backup(),
            force_first_audio_without_language,
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        let preferred = LanguageCode::parse(DEFAULT_PREFERRED_LANGUAGE)
            .unwrap_or_else(LanguageCode::backup);
        Self::new(preferred, false)
    }
}

/// Why an audio stream was chosen, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AudioTier {
    /// Language equals the preferred language
    Preferred,
    /// First audio stream without a language while forcing is enabled
    ForcedUntagged,
    /// First audio stream in the backup language
    Backup,
    /// Last audio stream seen, any language
    LastResort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioPick {
    pub index: usize,
    pub tier: AudioTier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionResult {
    pub video: Option<usize>,
    pub audio: Option<AudioPick>,
}

impl SelectionResult {
    /// Video stream index, 0 when nothing was selected
    pub fn video_index(&self) -> usize {
        self.video.unwrap_or(0)
    }

    /// Audio stream index, 0 when nothing was selected
    pub fn audio_index(&self) -> usize {
        self.audio.map(|pick| pick.index).unwrap_or(0)
    }
}

/// Pick the widest video stream and the best audio stream in a single pass
///
/// Video: the first video stream is kept unless a later one is strictly wider.
///
/// Audio, strongest rule first:
/// 1. first stream in the preferred language, selected immediately
/// 2. with forcing enabled, first stream without a language, selected immediately
/// 3. first stream in the backup language
/// 4. last audio stream seen
///
/// Once rule 1 or 2 fires no further audio streams are looked at.
pub fn select_streams(streams: &[StreamDescriptor], policy: &SelectionPolicy) -> SelectionResult {
    let mut best_video: Option<&StreamDescriptor> = None;
    let mut primary: Option<AudioPick> = None;
    let mut backup: Option<usize> = None;
    let mut last_resort: Option<usize> = None;

    for stream in streams {
        match stream.media_type {
            MediaType::Video => {
                if best_video.map_or(true, |best| best.width < stream.width) {
                    best_video = Some(stream);
                }
            }
            MediaType::Audio if primary.is_none() => {
                match &stream.language {
                    None if policy.force_first_audio_without_language => {
                        primary = Some(AudioPick {
                            index: stream.index,
                            tier: AudioTier::ForcedUntagged,
                        });
                    }
                    Some(lang) if *lang == policy.preferred_language => {
                        primary = Some(AudioPick {
                            index: stream.index,
                            tier: AudioTier::Preferred,
                        });
                    }
                    Some(lang) if *lang == policy.fallback_language && backup.is_none() => {
                        backup = Some(stream.index);
                    }
                    _ => {}
                }
                last_resort = Some(stream.index);
            }
            MediaType::Audio | MediaType::Other => {}
        }
    }

    let audio = primary
        .or_else(|| {
            backup.map(|index| AudioPick {
                index,
                tier: AudioTier::Backup,
            })
        })
        .or_else(|| {
            last_resort.map(|index| AudioPick {
                index,
                tier: AudioTier::LastResort,
            })
        });

    SelectionResult {
        video: best_video.map(|stream| stream.index),
        audio,
    }
}
