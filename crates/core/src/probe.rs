use crate::language::LanguageCode;
use crate::select::{MediaType, StreamDescriptor};
use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::process::Command;

// Internal FFprobe JSON structures
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    streams: Option<Vec<FfprobeStream>>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: usize,
    codec_type: Option<String>,
    width: Option<u32>,
    disposition: Option<FfprobeDisposition>,
    tags: Option<FfprobeTags>,
}

#[derive(Debug, Deserialize)]
struct FfprobeDisposition {
    attached_pic: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

/// Execute ffprobe on a media URL and return its streams in probe order
pub async fn probe_source(url: &str) -> Result<Vec<StreamDescriptor>> {
    tracing::info!("Getting stream metadata for {}", url);

    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("quiet")
        .arg("-print_format")
        .arg("json")
        .arg("-show_format")
        .arg("-show_streams")
        .arg(url)
        .output()
        .await
        .context("Failed to execute ffprobe")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("ffprobe failed ({}): {}", output.status, stderr);
    }

    let stdout = String::from_utf8(output.stdout).context("ffprobe output is not valid UTF-8")?;

    parse_probe_output(&stdout)
}

/// Parse ffprobe JSON into stream descriptors
///
/// Cover art is reported by ffprobe as a video stream with the
/// `attached_pic` disposition; it is classified as `Other`.
pub fn parse_probe_output(json: &str) -> Result<Vec<StreamDescriptor>> {
    let output: FfprobeOutput =
        serde_json::from_str(json).context("Failed to parse ffprobe JSON output")?;

    let streams = output
        .streams
        .unwrap_or_default()
        .into_iter()
        .map(|stream| {
            let attached_pic = stream
                .disposition
                .and_then(|d| d.attached_pic)
                .map(|v| v == 1)
                .unwrap_or(false);

            let media_type = match stream.codec_type.as_deref() {
                Some("video") if !attached_pic => MediaType::Video,
                Some("audio") => MediaType::Audio,
                _ => MediaType::Other,
            };

            let width = match media_type {
                MediaType::Video => stream.width.unwrap_or(0),
                _ => 0,
            };

            let language = stream
                .tags
                .and_then(|t| t.language)
                .and_then(|l| LanguageCode::parse(&l));

            StreamDescriptor {
                index: stream.index,
                media_type,
                width,
                language,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!("ffprobe reported {} streams", streams.len());

    Ok(streams)
}
