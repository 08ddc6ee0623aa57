//! Color / dynamic range cascade.
//!
//! Each step looks at one metadata field and may append descriptive
//! fragments and move the category. Later steps override the category but
//! every fragment appended along the way stays in the final text.

use crate::analyzer::metadata::RawStreamMetadata;
use crate::analyzer::verdict::{ColorCategory, Severity};

/// State threaded through the cascade
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAccumulator {
    pub category: ColorCategory,
    pub severity: Severity,
    /// Set by the transfer step only
    pub hdr: bool,
    pub info: Vec<String>,
    pub display: Vec<String>,
}

impl Default for ColorAccumulator {
    fn default() -> Self {
        Self {
            category: ColorCategory::Sdr,
            severity: Severity::White,
            hdr: false,
            info: Vec::new(),
            display: Vec::new(),
        }
    }
}

impl ColorAccumulator {
    fn push(&mut self, info: impl Into<String>, display: impl Into<String>) {
        self.info.push(info.into());
        self.display.push(display.into());
    }

    fn mark(&mut self, category: ColorCategory) {
        self.category = category;
        self.severity = if category == ColorCategory::Hdr {
            Severity::Blue
        } else {
            Severity::Red
        };
    }

    fn mark_hdr(&mut self, info: &str, display: &str) {
        self.push(info, display);
        self.hdr = true;
        self.mark(ColorCategory::Hdr);
    }

    /// Joined technical description
    pub fn info_text(&self) -> String {
        self.info.join(", ")
    }

    /// Joined display label, `SDR` when nothing was flagged for display
    pub fn display_text(&self) -> String {
        if self.display.is_empty() {
            "SDR".to_string()
        } else {
            self.display.join(", ")
        }
    }
}

pub type ColorStep = fn(&RawStreamMetadata, ColorAccumulator) -> ColorAccumulator;

/// Steps in evaluation order
pub const COLOR_STEPS: [ColorStep; 5] = [
    apply_transfer,
    apply_primaries,
    apply_color_space,
    apply_pixel_format,
    apply_default,
];

/// Run the whole cascade from a fresh accumulator
pub fn evaluate(meta: &RawStreamMetadata) -> ColorAccumulator {
    COLOR_STEPS
        .iter()
        .fold(ColorAccumulator::default(), |acc, step| step(meta, acc))
}

/// Transfer characteristics decide HDR
pub fn apply_transfer(meta: &RawStreamMetadata, mut acc: ColorAccumulator) -> ColorAccumulator {
    let Some(transfer) = meta.color_transfer.as_deref() else {
        return acc;
    };

    match transfer {
        "smpte2084" => acc.mark_hdr("PQ (SMPTE 2084)", "HDR10"),
        "arib-std-b67" => acc.mark_hdr("HLG (ARIB STD-B67)", "HDR HLG"),
        "bt2020-10" => acc.mark_hdr("BT.2020-10bit", "HDR10"),
        "bt2020" => {
            acc.push("BT.2020", "宽色域");
            acc.mark(ColorCategory::WideGamut);
        }
        "bt709" => {
            acc.info.push("Rec.709".to_string());
            acc.category = ColorCategory::Sdr;
        }
        "smpte170m" => {
            acc.info.push("BT.601".to_string());
            acc.category = ColorCategory::Sdr;
        }
        "gamma22" | "gamma28" => {
            acc.info.push(format!("Gamma {}", &transfer[5..]));
            acc.category = ColorCategory::Sdr;
        }
        other => {
            acc.push(other, "非SDR");
            acc.mark(ColorCategory::Other);
        }
    }
    acc
}

/// Color primaries (gamut), skipped for HDR
pub fn apply_primaries(meta: &RawStreamMetadata, mut acc: ColorAccumulator) -> ColorAccumulator {
    let Some(primaries) = meta.color_primaries.as_deref() else {
        return acc;
    };
    if acc.hdr {
        return acc;
    }

    let still_sdr = acc.category == ColorCategory::Sdr;
    match primaries {
        "bt2020" if still_sdr => {
            acc.push("BT.2020色域", "宽色域");
            acc.mark(ColorCategory::WideGamut);
        }
        "p3" => {
            acc.push("DCI-P3色域", "广色域");
            acc.mark(ColorCategory::WideGamut);
        }
        "bt709" | "smpte170m" => {}
        other if still_sdr => {
            acc.push(format!("{}色域", other), "非标准色域");
            acc.mark(ColorCategory::Other);
        }
        _ => {}
    }
    acc
}

/// Matrix coefficients, display text only
pub fn apply_color_space(meta: &RawStreamMetadata, mut acc: ColorAccumulator) -> ColorAccumulator {
    let Some(space) = meta.color_space.as_deref() else {
        return acc;
    };

    match space {
        "bt2020nc" => acc.push("BT.2020非恒定亮度", "BT.2020 NC"),
        "bt2020c" => acc.push("BT.2020恒定亮度", "BT.2020 CL"),
        "bt709" => acc.push("BT.709色彩空间", "Rec.709"),
        other => acc.push(format!("{}色彩空间", other), other),
    }
    acc
}

/// Pixel format, only consulted while the file still looks like plain SDR
pub fn apply_pixel_format(meta: &RawStreamMetadata, mut acc: ColorAccumulator) -> ColorAccumulator {
    let Some(pix_fmt) = meta.pixel_format.as_deref() else {
        return acc;
    };
    if acc.hdr || acc.category != ColorCategory::Sdr {
        return acc;
    }

    if pix_fmt.contains("p10") || pix_fmt.contains("p12") {
        acc.push(format!("10/12-bit色深: {}", pix_fmt), "高色深");
        acc.mark(ColorCategory::HighBitDepth);
    } else if pix_fmt.contains("yuva") {
        acc.push(format!("带Alpha通道: {}", pix_fmt), "带透明通道");
        acc.mark(ColorCategory::Advanced);
    } else if pix_fmt.contains("yuv444") {
        acc.push(format!("4:4:4色度抽样: {}", pix_fmt), "4:4:4格式");
        acc.mark(ColorCategory::Advanced);
    } else if pix_fmt.contains("rgb") || pix_fmt.contains("bgr") {
        acc.push(format!("RGB格式: {}", pix_fmt), "RGB格式");
        acc.mark(ColorCategory::Advanced);
    } else {
        acc.push(format!("像素格式: {}", pix_fmt), pix_fmt);
    }
    acc
}

/// Plain SDR when nothing else was recorded
pub fn apply_default(_meta: &RawStreamMetadata, mut acc: ColorAccumulator) -> ColorAccumulator {
    if acc.info.is_empty() {
        acc.push("SDR", "SDR");
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> RawStreamMetadata {
        RawStreamMetadata::default()
    }

    #[test]
    fn empty_metadata_is_plain_sdr() {
        let acc = evaluate(&meta());
        assert_eq!(acc.category, ColorCategory::Sdr);
        assert_eq!(acc.severity, Severity::White);
        assert_eq!(acc.info_text(), "SDR");
        assert_eq!(acc.display_text(), "SDR");
    }

    #[test]
    fn pq_transfer_is_hdr10() {
        let m = RawStreamMetadata {
            color_transfer: Some("smpte2084".to_string()),
            color_primaries: Some("bt2020".to_string()),
            color_space: Some("bt2020nc".to_string()),
            pixel_format: Some("yuv420p10le".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.category, ColorCategory::Hdr);
        assert!(acc.hdr);
        assert_eq!(acc.severity, Severity::Blue);
        // primaries and pixel format are skipped for HDR, color space is not
        assert_eq!(acc.display_text(), "HDR10, BT.2020 NC");
        assert_eq!(acc.info_text(), "PQ (SMPTE 2084), BT.2020非恒定亮度");
    }

    #[test]
    fn hlg_transfer() {
        let m = RawStreamMetadata {
            color_transfer: Some("arib-std-b67".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.category, ColorCategory::Hdr);
        assert_eq!(acc.display_text(), "HDR HLG");
    }

    #[test]
    fn bt709_everything_stays_sdr() {
        let m = RawStreamMetadata {
            color_transfer: Some("bt709".to_string()),
            color_primaries: Some("bt709".to_string()),
            color_space: Some("bt709".to_string()),
            pixel_format: Some("yuv420p".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.category, ColorCategory::Sdr);
        assert_eq!(acc.severity, Severity::White);
        assert_eq!(acc.info_text(), "Rec.709, BT.709色彩空间, 像素格式: yuv420p");
        assert_eq!(acc.display_text(), "Rec.709, yuv420p");
    }

    #[test]
    fn sdr_transfer_only_falls_back_to_sdr_display() {
        let m = RawStreamMetadata {
            color_transfer: Some("gamma28".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.info_text(), "Gamma 28");
        assert_eq!(acc.display_text(), "SDR");
    }

    #[test]
    fn unknown_transfer_is_other() {
        let m = RawStreamMetadata {
            color_transfer: Some("log100".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.category, ColorCategory::Other);
        assert_eq!(acc.severity, Severity::Red);
        assert_eq!(acc.display_text(), "非SDR");
    }

    #[test]
    fn p3_primaries_override_earlier_category() {
        let m = RawStreamMetadata {
            color_transfer: Some("log100".to_string()),
            color_primaries: Some("p3".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        // last matching rule wins, both fragments remain
        assert_eq!(acc.category, ColorCategory::WideGamut);
        assert_eq!(acc.display_text(), "非SDR, 广色域");
    }

    #[test]
    fn bt2020_primaries_only_when_still_sdr() {
        let sdr = RawStreamMetadata {
            color_primaries: Some("bt2020".to_string()),
            ..meta()
        };
        assert_eq!(evaluate(&sdr).category, ColorCategory::WideGamut);
        assert_eq!(evaluate(&sdr).display_text(), "宽色域");

        let already_other = RawStreamMetadata {
            color_transfer: Some("linear".to_string()),
            color_primaries: Some("bt2020".to_string()),
            ..meta()
        };
        let acc = evaluate(&already_other);
        assert_eq!(acc.category, ColorCategory::Other);
        assert_eq!(acc.display_text(), "非SDR");
    }

    #[test]
    fn nonstandard_primaries() {
        let m = RawStreamMetadata {
            color_primaries: Some("film".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.category, ColorCategory::Other);
        assert_eq!(acc.info_text(), "film色域");
        assert_eq!(acc.display_text(), "非标准色域");
    }

    #[test]
    fn pixel_format_rules_in_order() {
        let cases = [
            ("yuv420p10le", ColorCategory::HighBitDepth, "高色深"),
            ("yuv422p12le", ColorCategory::HighBitDepth, "高色深"),
            ("yuva444p", ColorCategory::Advanced, "带透明通道"),
            ("yuv444p", ColorCategory::Advanced, "4:4:4格式"),
            ("rgb24", ColorCategory::Advanced, "RGB格式"),
            ("bgra", ColorCategory::Advanced, "RGB格式"),
            ("nv12", ColorCategory::Sdr, "nv12"),
        ];
        for (pix_fmt, category, display) in cases {
            let m = RawStreamMetadata {
                pixel_format: Some(pix_fmt.to_string()),
                ..meta()
            };
            let acc = evaluate(&m);
            assert_eq!(acc.category, category, "{}", pix_fmt);
            assert_eq!(acc.display_text(), display, "{}", pix_fmt);
        }
    }

    #[test]
    fn pixel_format_ignored_after_wide_gamut() {
        let m = RawStreamMetadata {
            color_transfer: Some("bt2020".to_string()),
            pixel_format: Some("yuv420p10le".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.category, ColorCategory::WideGamut);
        assert_eq!(acc.info_text(), "BT.2020");
    }

    #[test]
    fn unknown_color_space_is_passed_through() {
        let m = RawStreamMetadata {
            color_space: Some("smpte240m".to_string()),
            ..meta()
        };
        let acc = evaluate(&m);
        assert_eq!(acc.category, ColorCategory::Sdr);
        assert_eq!(acc.info_text(), "smpte240m色彩空间");
        assert_eq!(acc.display_text(), "smpte240m");
    }
}
