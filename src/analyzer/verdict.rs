use serde::Serialize;

/// Severity color shown next to a status in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Red,
    Yellow,
    Green,
    Blue,
    White,
    Gray,
}

impl Severity {
    /// CSS class used by the report template
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Red => "red",
            Severity::Yellow => "yellow",
            Severity::Green => "green",
            Severity::Blue => "blue",
            Severity::White => "white",
            Severity::Gray => "gray",
        }
    }
}

/// Resolution bucket after portrait normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionBucket {
    /// Below 1920x1080
    Low,
    /// 1080p up to (not including) 4K UHD
    Good,
    /// 3840x2160 and above
    Excellent,
}

impl ResolutionBucket {
    /// Classify a resolution. Portrait and landscape are treated alike.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        let effective_width = width.max(height);
        let effective_height = width.min(height);

        if effective_width < 1920 || effective_height < 1080 {
            ResolutionBucket::Low
        } else if effective_width >= 3840 && effective_height >= 2160 {
            ResolutionBucket::Excellent
        } else {
            ResolutionBucket::Good
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            ResolutionBucket::Low => "低画质(<1080p)",
            ResolutionBucket::Good => "1080p",
            ResolutionBucket::Excellent => "4K ✓",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ResolutionBucket::Low => Severity::Red,
            ResolutionBucket::Good => Severity::Yellow,
            ResolutionBucket::Excellent => Severity::Green,
        }
    }
}

/// Frame rate bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameRateBucket {
    Unknown,
    Low,
    Normal,
    High,
    Other,
}

impl FrameRateBucket {
    pub fn severity(&self) -> Severity {
        match self {
            FrameRateBucket::Unknown => Severity::Gray,
            FrameRateBucket::Low => Severity::Red,
            FrameRateBucket::Normal => Severity::Yellow,
            FrameRateBucket::High => Severity::Green,
            FrameRateBucket::Other => Severity::White,
        }
    }
}

/// Per-file color / dynamic range category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorCategory {
    Sdr,
    Hdr,
    WideGamut,
    HighBitDepth,
    Advanced,
    Other,
    Raw,
}

impl ColorCategory {
    /// Coarse three-way axis used for corpus statistics
    pub fn coarse(&self) -> CoarseColor {
        match self {
            ColorCategory::Sdr => CoarseColor::Sdr,
            ColorCategory::Hdr => CoarseColor::Hdr,
            _ => CoarseColor::OtherColorSpace,
        }
    }
}

/// HDR / other / SDR partition used only by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoarseColor {
    Hdr,
    OtherColorSpace,
    Sdr,
}

/// Classification of one video file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileVerdict {
    pub directory: String,
    pub file_name: String,
    pub full_path: String,

    pub resolution: String,
    pub resolution_bucket: ResolutionBucket,
    pub resolution_status: &'static str,
    pub resolution_severity: Severity,

    pub frame_rate_bucket: FrameRateBucket,
    pub frame_rate_display: String,
    pub frame_rate_status: String,
    pub frame_rate_severity: Severity,

    pub color_category: ColorCategory,
    pub color_display: String,
    pub color_info: String,
    pub color_severity: Severity,

    pub is_raw: bool,
    pub is_dolby_vision: bool,
    pub iso: Option<String>,
    pub note: Option<String>,
}

impl FileVerdict {
    /// Row class for the report: red wins, then yellow, then green, and a
    /// blue (HDR) color column overrides all of them.
    pub fn row_class(&self) -> &'static str {
        if self.color_severity == Severity::Blue {
            return "blue";
        }
        let res = self.resolution_severity;
        let fps = self.frame_rate_severity;
        if res == Severity::Red || fps == Severity::Red || self.color_severity == Severity::Red {
            "red"
        } else if res == Severity::Yellow || fps == Severity::Yellow {
            "yellow"
        } else if res == Severity::Green || fps == Severity::Green {
            "green"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_thresholds() {
        assert_eq!(ResolutionBucket::from_dimensions(0, 0), ResolutionBucket::Low);
        assert_eq!(ResolutionBucket::from_dimensions(1280, 720), ResolutionBucket::Low);
        assert_eq!(ResolutionBucket::from_dimensions(1920, 1079), ResolutionBucket::Low);
        assert_eq!(ResolutionBucket::from_dimensions(1920, 1080), ResolutionBucket::Good);
        assert_eq!(ResolutionBucket::from_dimensions(2560, 1440), ResolutionBucket::Good);
        assert_eq!(ResolutionBucket::from_dimensions(3840, 2159), ResolutionBucket::Good);
        assert_eq!(
            ResolutionBucket::from_dimensions(3840, 2160),
            ResolutionBucket::Excellent
        );
        assert_eq!(
            ResolutionBucket::from_dimensions(4096, 2160),
            ResolutionBucket::Excellent
        );
    }

    #[test]
    fn resolution_is_orientation_independent() {
        let sizes = [0, 720, 1079, 1080, 1920, 2160, 2400, 3840, 4096, 7680];
        for &w in &sizes {
            for &h in &sizes {
                assert_eq!(
                    ResolutionBucket::from_dimensions(w, h),
                    ResolutionBucket::from_dimensions(h, w),
                    "{}x{}",
                    w,
                    h
                );
            }
        }
    }

    #[test]
    fn coarse_axis_groups_everything_but_sdr_and_hdr() {
        assert_eq!(ColorCategory::Sdr.coarse(), CoarseColor::Sdr);
        assert_eq!(ColorCategory::Hdr.coarse(), CoarseColor::Hdr);
        for category in [
            ColorCategory::WideGamut,
            ColorCategory::HighBitDepth,
            ColorCategory::Advanced,
            ColorCategory::Other,
            ColorCategory::Raw,
        ] {
            assert_eq!(category.coarse(), CoarseColor::OtherColorSpace);
        }
    }
}
