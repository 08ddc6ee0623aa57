use crate::analyzer::color;
use crate::analyzer::metadata::{FrameRate, ProbedFile, RawStreamMetadata};
use crate::analyzer::verdict::{
    ColorCategory, FileVerdict, FrameRateBucket, ResolutionBucket, Severity,
};
use crate::config::ExtensionConfig;
use crate::error::AppError;
use std::path::Path;

const RAW_LABEL: &str = "RAW视频";
const DOLBY_VISION_LABEL: &str = "杜比视界";
const DOLBY_VISION_NOTE: &str = "杜比视界需要提前调色再导入";

/// ISO above which non-RAW footage gets a noise reduction hint
const ISO_LIMIT: i64 = 4000;
/// ISO above which RAW footage gets a noise reduction hint
const RAW_ISO_LIMIT: i64 = 800;

/// Frame rate classification: bucket, display text and status text
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRateVerdict {
    pub bucket: FrameRateBucket,
    pub display: String,
    pub status: String,
}

impl FrameRateVerdict {
    pub fn classify(frame_rate: Option<FrameRate>) -> Self {
        let fps = frame_rate.map(|r| r.fps()).unwrap_or(0.0);

        let (bucket, display, status) = if fps == 0.0 {
            (FrameRateBucket::Unknown, "未知".to_string(), "未知".to_string())
        } else if fps < 28.0 {
            (
                FrameRateBucket::Low,
                format!("{:.1} fps", fps),
                "低帧率".to_string(),
            )
        } else if (55.0..=65.0).contains(&fps) {
            (
                FrameRateBucket::High,
                "60 fps".to_string(),
                "高帧率 ✓".to_string(),
            )
        } else if (29.0..=31.0).contains(&fps) || (29.9..=30.1).contains(&fps) {
            (
                FrameRateBucket::Normal,
                "30 fps".to_string(),
                "标准帧率".to_string(),
            )
        } else {
            let display = format!("{:.1} fps", fps);
            (FrameRateBucket::Other, display.clone(), display)
        };

        Self {
            bucket,
            display,
            status,
        }
    }
}

/// Decides RAW footage from extension and codec signalling
#[derive(Debug, Clone)]
pub struct RawDetector {
    raw_extensions: Vec<String>,
    raw_container: String,
    raw_codec_tags: Vec<String>,
}

impl RawDetector {
    pub fn new(extensions: &ExtensionConfig) -> Self {
        Self {
            raw_extensions: extensions.raw.iter().map(|e| e.to_lowercase()).collect(),
            raw_container: extensions.raw_container.to_lowercase(),
            raw_codec_tags: extensions
                .raw_codec_tags
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    pub fn is_raw(&self, meta: &RawStreamMetadata) -> bool {
        if self.raw_extensions.contains(&meta.file_extension) {
            return true;
        }
        if meta.file_extension != self.raw_container {
            return false;
        }

        let codec_name = meta.codec_name.as_deref().unwrap_or("").to_lowercase();
        let codec_tag = meta.codec_tag.as_deref().unwrap_or("").to_lowercase();
        (codec_name.contains("prores") && codec_name.contains("raw"))
            || self.raw_codec_tags.contains(&codec_tag)
    }
}

/// Advisory note for a file
pub fn advisory_note(iso: Option<&str>, is_raw: bool, is_dolby_vision: bool) -> Option<String> {
    if is_dolby_vision {
        return Some(DOLBY_VISION_NOTE.to_string());
    }

    let iso = iso?;
    match iso.trim().parse::<i64>() {
        Ok(value) => {
            let limit = if is_raw { RAW_ISO_LIMIT } else { ISO_LIMIT };
            (value > limit).then(|| format!("ISO为{}，考虑提前降噪", value))
        }
        Err(_) => Some(iso.to_string()),
    }
}

/// Turns probed metadata into a [`FileVerdict`]
#[derive(Debug, Clone)]
pub struct Classifier {
    raw: RawDetector,
}

impl Classifier {
    pub fn new(extensions: &ExtensionConfig) -> Self {
        Self {
            raw: RawDetector::new(extensions),
        }
    }

    /// Classify a probed file. Fails only when there is no stream metadata.
    pub fn classify(&self, probed: &ProbedFile) -> Result<FileVerdict, AppError> {
        let stream = probed
            .stream
            .as_ref()
            .ok_or_else(|| AppError::NoStreamMetadata(probed.path.clone()))?;
        Ok(self.classify_stream(&probed.path, stream, probed.iso.as_deref()))
    }

    /// Classify stream metadata of the file at `path`
    pub fn classify_stream(
        &self,
        path: &Path,
        meta: &RawStreamMetadata,
        iso: Option<&str>,
    ) -> FileVerdict {
        let resolution_bucket = ResolutionBucket::from_dimensions(meta.width, meta.height);
        let frame_rate = FrameRateVerdict::classify(meta.frame_rate);

        let cascade = color::evaluate(meta);
        let mut color_category = cascade.category;
        let mut color_display = cascade.display_text();
        let mut color_severity = cascade.severity;

        let is_raw = self.raw.is_raw(meta);
        if is_raw {
            color_display = RAW_LABEL.to_string();
            color_category = ColorCategory::Raw;
        }

        let is_dolby_vision = meta.side_data.iter().any(|e| e.signals_dolby_vision());
        if is_dolby_vision {
            color_display = format!("{} {}", DOLBY_VISION_LABEL, color_display);
        }

        if cascade.hdr {
            color_severity = Severity::Blue;
        }

        let note = advisory_note(iso, is_raw, is_dolby_vision);

        FileVerdict {
            directory: path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            full_path: path.display().to_string(),

            resolution: meta.resolution_string(),
            resolution_bucket,
            resolution_status: resolution_bucket.status_label(),
            resolution_severity: resolution_bucket.severity(),

            frame_rate_severity: frame_rate.bucket.severity(),
            frame_rate_bucket: frame_rate.bucket,
            frame_rate_display: frame_rate.display,
            frame_rate_status: frame_rate.status,

            color_category,
            color_display,
            color_info: cascade.info_text(),
            color_severity,

            is_raw,
            is_dolby_vision,
            iso: iso.map(str::to_string),
            note,
        }
    }
}
