use std::path::{Path, PathBuf};

/// Frame rate as reported by ffprobe (`r_frame_rate`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate {
    pub num: f64,
    pub den: f64,
}

impl FrameRate {
    /// Parse `"num/den"` or a bare number. Returns `None` when either part
    /// does not parse.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text.split_once('/') {
            Some((num, den)) => Some(Self {
                num: num.trim().parse().ok()?,
                den: den.trim().parse().ok()?,
            }),
            None => Some(Self {
                num: text.parse().ok()?,
                den: 1.0,
            }),
        }
    }

    /// Frames per second, 0 when the denominator is zero
    pub fn fps(&self) -> f64 {
        if self.den == 0.0 {
            0.0
        } else {
            self.num / self.den
        }
    }
}

/// One `side_data_list` entry of the first video stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideDataEntry {
    pub side_data_type: String,
    pub dv_version_major: i64,
    pub dv_profile: i64,
    pub rpu_present_flag: i64,
}

impl SideDataEntry {
    /// Whether this entry signals Dolby Vision
    pub fn signals_dolby_vision(&self) -> bool {
        self.side_data_type.contains("DOVI")
            || self.side_data_type.contains("Dolby")
            || self.dv_version_major > 0
            || self.dv_profile > 0
            || self.rpu_present_flag == 1
    }
}

/// Stream metadata of one file's first video stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStreamMetadata {
    pub width: u32,
    pub height: u32,
    pub frame_rate: Option<FrameRate>,
    pub color_transfer: Option<String>,
    pub color_primaries: Option<String>,
    pub color_space: Option<String>,
    pub pixel_format: Option<String>,
    pub codec_name: Option<String>,
    pub codec_tag: Option<String>,
    /// Lower-cased, with leading dot; empty when the file has none
    pub file_extension: String,
    pub side_data: Vec<SideDataEntry>,
}

impl RawStreamMetadata {
    /// Resolution string
    pub fn resolution_string(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Lower-cased extension with its leading dot, or an empty string
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Everything the fetcher learned about one file
#[derive(Debug, Clone)]
pub struct ProbedFile {
    pub path: PathBuf,
    /// `None` when ffprobe ran but reported no video stream
    pub stream: Option<RawStreamMetadata>,
    pub iso: Option<String>,
}
