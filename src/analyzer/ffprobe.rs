use crate::analyzer::exiftool;
use crate::analyzer::metadata::{
    FrameRate, ProbedFile, RawStreamMetadata, SideDataEntry, file_extension,
};
use crate::error::AppError;
use crate::utils::run_tool;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const STREAM_ENTRIES: &str = "stream=width,height,r_frame_rate,color_transfer,color_primaries,color_space,pix_fmt,codec_name,codec_tag_string";

const SIDE_DATA_ENTRIES: &str = "stream_side_data=side_data_type,dv_version_major,dv_version_minor,dv_profile,dv_level,rpu_present_flag,el_present_flag,bl_present_flag,dv_bl_signal_compatibility_id,dv_md_compression";

/// Runs the external probes for one file at a time
#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    ffprobe: PathBuf,
    /// `None` disables ISO lookups
    exiftool: Option<PathBuf>,
    timeout: Duration,
}

impl MetadataFetcher {
    pub fn new(ffprobe: PathBuf, exiftool: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffprobe,
            exiftool,
            timeout,
        }
    }

    /// Probe a file: stream info, side data and ISO tags.
    ///
    /// Only a failing stream query is an error. Side data and tag failures
    /// degrade to "no Dolby Vision" and "no ISO".
    pub fn probe(&self, path: &Path) -> Result<ProbedFile, AppError> {
        let Some(mut stream) = self.query_stream(path)? else {
            return Ok(ProbedFile {
                path: path.to_path_buf(),
                stream: None,
                iso: None,
            });
        };

        stream.side_data = match self.query_side_data(path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read side data for {}: {}", path.display(), e);
                Vec::new()
            }
        };

        let iso = self.exiftool.as_deref().and_then(|exiftool| {
            exiftool::read_iso(exiftool, path, self.timeout)
                .map_err(|e| warn!("Failed to read ISO for {}: {}", path.display(), e))
                .ok()
                .flatten()
        });

        Ok(ProbedFile {
            path: path.to_path_buf(),
            stream: Some(stream),
            iso,
        })
    }

    /// First video stream, `None` when the file has none
    fn query_stream(&self, path: &Path) -> Result<Option<RawStreamMetadata>, AppError> {
        let output = self.run_ffprobe(path, STREAM_ENTRIES)?;
        parse_stream_output(&output, path).map_err(|e| AppError::ProbeFailed {
            path: path.to_path_buf(),
            reason: format!("Failed to parse ffprobe output: {}", e),
        })
    }

    fn query_side_data(&self, path: &Path) -> Result<Vec<SideDataEntry>, AppError> {
        let output = self.run_ffprobe(path, SIDE_DATA_ENTRIES)?;
        parse_side_data_output(&output).map_err(AppError::from)
    }

    fn run_ffprobe(&self, path: &Path, entries: &str) -> Result<String, AppError> {
        let input = path.to_string_lossy();
        let args = [
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            entries,
            "-of",
            "json",
            input.as_ref(),
        ];
        debug!("ffprobe {}", args.join(" "));

        run_tool(&self.ffprobe, &args, self.timeout).map_err(|e| AppError::ProbeFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Parse the stream query output
pub fn parse_stream_output(
    output: &str,
    path: &Path,
) -> Result<Option<RawStreamMetadata>, serde_json::Error> {
    let data: FfprobeOutput<VideoStream> = serde_json::from_str(output)?;
    let Some(stream) = data.streams.into_iter().next() else {
        return Ok(None);
    };

    Ok(Some(RawStreamMetadata {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        frame_rate: stream.r_frame_rate.as_deref().and_then(FrameRate::parse),
        color_transfer: non_empty(stream.color_transfer),
        color_primaries: non_empty(stream.color_primaries),
        color_space: non_empty(stream.color_space),
        pixel_format: non_empty(stream.pix_fmt),
        codec_name: non_empty(stream.codec_name),
        codec_tag: non_empty(stream.codec_tag_string),
        file_extension: file_extension(path),
        side_data: Vec::new(),
    }))
}

/// Parse the side data query output
pub fn parse_side_data_output(output: &str) -> Result<Vec<SideDataEntry>, serde_json::Error> {
    let data: FfprobeOutput<SideDataStream> = serde_json::from_str(output)?;
    let entries = data
        .streams
        .into_iter()
        .next()
        .map(|s| s.side_data_list)
        .unwrap_or_default()
        .into_iter()
        .map(|raw| SideDataEntry {
            side_data_type: raw.side_data_type.unwrap_or_default(),
            dv_version_major: raw.dv_version_major.unwrap_or(0),
            dv_profile: raw.dv_profile.unwrap_or(0),
            rpu_present_flag: raw.rpu_present_flag.unwrap_or(0),
        })
        .collect();
    Ok(entries)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// JSON deserialization structures

#[derive(Debug, Deserialize)]
struct FfprobeOutput<S> {
    #[serde(default = "Vec::new")]
    streams: Vec<S>,
}

#[derive(Debug, Deserialize)]
struct VideoStream {
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    color_transfer: Option<String>,
    color_primaries: Option<String>,
    color_space: Option<String>,
    pix_fmt: Option<String>,
    codec_name: Option<String>,
    codec_tag_string: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SideDataStream {
    #[serde(default)]
    side_data_list: Vec<RawSideData>,
}

#[derive(Debug, Deserialize)]
struct RawSideData {
    side_data_type: Option<String>,
    dv_version_major: Option<i64>,
    dv_profile: Option<i64>,
    rpu_present_flag: Option<i64>,
}
