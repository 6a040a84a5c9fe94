use proptest::prelude::*;
use streambest_core::language::LanguageCode;
use streambest_core::select::{
    select_streams, AudioTier, MediaType, SelectionPolicy, StreamDescriptor,
};

fn language_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop::sample::select(vec![
        Some("en"),
        Some("eng"),
        Some("fr"),
        Some("fre"),
        Some("de"),
        Some("jpn"),
        Some("und"),
        Some("???"),
        None,
    ])
}

fn stream_kind_strategy() -> impl Strategy<Value = (u8, u32, Option<&'static str>)> {
    (0u8..3, prop::sample::select(vec![0u32, 640, 1280, 1920, 3840]), language_strategy())
}

/// Streams with unique, non-contiguous indices in arbitrary type order
fn streams_strategy() -> impl Strategy<Value = Vec<StreamDescriptor>> {
    (prop::collection::vec(stream_kind_strategy(), 0..12), 0usize..4).prop_map(|(kinds, offset)| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, (kind, width, language))| {
                let index = offset + i * 3;
                match kind {
                    0 => StreamDescriptor::video(index, width),
                    1 => StreamDescriptor::audio(index, language),
                    _ => StreamDescriptor::other(index),
                }
            })
            .collect()
    })
}

fn policy_strategy() -> impl Strategy<Value = SelectionPolicy> {
    (prop::sample::select(vec!["eng", "fr", "de", "jpn", "spa"]), any::<bool>()).prop_map(
        |(preferred, force)| {
            SelectionPolicy::new(LanguageCode::parse(preferred).unwrap(), force)
        },
    )
}

fn is_audio(stream: &&StreamDescriptor) -> bool {
    stream.media_type == MediaType::Audio
}

/// **Property 1: No video stream means no video selection**
/// *For any* stream list without video streams, no video is selected and the
/// numeric view of the result is 0.
#[test]
fn property_no_video_selects_nothing() {
    proptest!(ProptestConfig::with_cases(200), |(
        streams in streams_strategy(),
        policy in policy_strategy(),
    )| {
        let streams: Vec<_> = streams
            .into_iter()
            .filter(|s| s.media_type != MediaType::Video)
            .collect();

        let result = select_streams(&streams, &policy);

        prop_assert_eq!(result.video, None);
        prop_assert_eq!(result.video_index(), 0);
    });
}

/// **Property 2: Widest video stream wins, earliest on ties**
/// *For any* stream list with video streams, the selected stream is at least
/// as wide as every other video stream and no earlier video stream is as wide.
#[test]
fn property_widest_video_earliest_tie() {
    proptest!(ProptestConfig::with_cases(300), |(
        streams in streams_strategy(),
        width in 0u32..5000,
        policy in policy_strategy(),
    )| {
        let mut streams = streams;
        streams.push(StreamDescriptor::video(1000, width));

        let result = select_streams(&streams, &policy);
        let selected = result.video.expect("a video stream exists");
        let position = streams
            .iter()
            .position(|s| s.index == selected)
            .expect("selected index comes from the input");
        let chosen = &streams[position];

        prop_assert_eq!(chosen.media_type, MediaType::Video);
        for (i, other) in streams.iter().enumerate() {
            if other.media_type != MediaType::Video {
                continue;
            }
            prop_assert!(chosen.width >= other.width);
            if i < position {
                prop_assert!(other.width < chosen.width, "earlier stream {} ties", other.index);
            }
        }
    });
}

/// **Property 3: Audio tiers**
/// *For any* stream list and policy, the audio selection equals the first
/// primary match (preferred language, or untagged when forcing), else the first
/// backup-language stream, else the last audio stream.
#[test]
fn property_audio_tier_resolution() {
    proptest!(ProptestConfig::with_cases(500), |(
        streams in streams_strategy(),
        policy in policy_strategy(),
    )| {
        let result = select_streams(&streams, &policy);

        let preferred = streams.iter().filter(is_audio).find(|s| match &s.language {
            Some(lang) => *lang == policy.preferred_language,
            None => policy.force_first_audio_without_language,
        });
        let backup = streams
            .iter()
            .filter(is_audio)
            .find(|s| s.language.as_ref() == Some(&policy.fallback_language));
        let last = streams.iter().filter(is_audio).last();

        let expected = preferred.or(backup).or(last).map(|s| s.index);
        prop_assert_eq!(result.audio.map(|pick| pick.index), expected);

        if let Some(pick) = result.audio {
            let expected_tier = if let Some(primary) = preferred {
                if primary.language.is_some() { AudioTier::Preferred } else { AudioTier::ForcedUntagged }
            } else if backup.is_some() {
                AudioTier::Backup
            } else {
                AudioTier::LastResort
            };
            prop_assert_eq!(pick.tier, expected_tier);
        } else {
            prop_assert_eq!(result.audio_index(), 0);
            prop_assert!(last.is_none());
        }
    });
}

/// **Property 4: Selection is deterministic**
/// *For any* input, selecting twice gives the same result.
#[test]
fn property_selection_deterministic() {
    proptest!(ProptestConfig::with_cases(100), |(
        streams in streams_strategy(),
        policy in policy_strategy(),
    )| {
        prop_assert_eq!(select_streams(&streams, &policy), select_streams(&streams, &policy));
    });
}
