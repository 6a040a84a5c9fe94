use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::process::Command;

/// Run `ffprobe -version` and return its (major, minor, patch) version
pub fn check_ffprobe_version() -> Result<(u32, u32, u32)> {
    let output = Command::new("ffprobe")
        .arg("-version")
        .output()
        .context("Failed to execute ffprobe -version. Is ffprobe installed and in PATH?")?;

    if !output.status.success() {
        return Err(anyhow!("ffprobe -version command failed"));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_tool_version("ffprobe", &stdout)
}

/// Parse a version from output like "ffprobe version 6.1.1" or "ffprobe version n7.0"
///
/// A missing patch component reads as 0.
pub fn parse_tool_version(tool: &str, output: &str) -> Result<(u32, u32, u32)> {
    let pattern = format!(r"{} version[^\d]*(\d+)\.(\d+)(?:\.(\d+))?", regex::escape(tool));
    let re = Regex::new(&pattern).context("Failed to build version regex")?;

    let caps = re
        .captures(output)
        .ok_or_else(|| anyhow!("Failed to parse {} version from output: {}", tool, output))?;

    let major: u32 = caps[1].parse().context("Failed to parse major version")?;
    let minor: u32 = caps[2].parse().context("Failed to parse minor version")?;
    let patch: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().context("Failed to parse patch version")?,
        None => 0,
    };

    Ok((major, minor, patch))
}
