use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const VIDEO_EXTENSIONS: [&str; 32] = [
    ".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v", ".mpg", ".mpeg", ".ts",
    ".mts", ".m2ts", ".hevc", ".h264", ".264", ".265", ".rmvb", ".rm", ".3gp", ".f4v", ".m2v",
    ".mp2", ".mpe", ".mpv", ".ogv", ".qt", ".vob", ".crm", ".mxf", ".nev", ".r3d",
];

const RAW_EXTENSIONS: [&str; 3] = [".crm", ".nev", ".r3d"];

/// ProRes RAW HQ and ProRes RAW
const RAW_CODEC_TAGS: [&str; 2] = ["aprh", "aprn"];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// File extensions recognized during discovery and RAW detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Extensions scanned for, with leading dot
    pub video: Vec<String>,
    /// Extensions that are always RAW footage
    pub raw: Vec<String>,
    /// Container that may carry ProRes RAW
    pub raw_container: String,
    /// Codec tags identifying RAW inside `raw_container`
    pub raw_codec_tags: Vec<String>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            video: owned(&VIDEO_EXTENSIONS),
            raw: owned(&RAW_EXTENSIONS),
            raw_container: ".mov".to_string(),
            raw_codec_tags: owned(&RAW_CODEC_TAGS),
        }
    }
}

/// External tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Explicit ffprobe binary, otherwise resolved next to the executable or on PATH
    pub ffprobe: Option<PathBuf>,
    /// Explicit exiftool binary
    pub exiftool: Option<PathBuf>,
    /// Timeout for every tool invocation
    pub timeout_secs: u64,
    /// Number of files probed concurrently
    pub jobs: usize,
    /// Whether to query ISO tags with exiftool
    pub read_iso: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe: None,
            exiftool: None,
            timeout_secs: 30,
            jobs: 1,
            read_iso: true,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File name of the HTML report, written into the scanned directory
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_name: "视频报告.html".to_string(),
        }
    }
}
