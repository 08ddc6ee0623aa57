use crate::analyzer::FileVerdict;
use crate::scan::{CorpusStatistics, ExcludedFile, ScanSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatisticsExport {
    #[serde(flatten)]
    counts: CorpusStatistics,
    sdr: usize,
}

/// Machine-readable counterpart of the HTML report
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    scanned_path: &'a str,
    generated_at: &'a str,
    statistics: StatisticsExport,
    files: &'a [FileVerdict],
    excluded: &'a [ExcludedFile],
}

pub fn render_json(
    summary: &ScanSummary,
    input_path: &str,
    timestamp: &str,
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        scanned_path: input_path,
        generated_at: timestamp,
        statistics: StatisticsExport {
            counts: summary.statistics,
            sdr: summary.statistics.sdr(),
        },
        files: &summary.verdicts,
        excluded: &summary.excluded,
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Classifier;
    use crate::analyzer::metadata::{FrameRate, RawStreamMetadata};
    use crate::config::ExtensionConfig;
    use serde_json::Value;
    use std::path::Path;

    #[test]
    fn exports_statistics_and_rows() {
        let meta = RawStreamMetadata {
            width: 3840,
            height: 2160,
            frame_rate: FrameRate::parse("60/1"),
            color_transfer: Some("smpte2084".to_string()),
            file_extension: ".mp4".to_string(),
            ..Default::default()
        };
        let verdicts = vec![Classifier::new(&ExtensionConfig::default()).classify_stream(
            Path::new("/v/a.mp4"),
            &meta,
            None,
        )];
        let summary = ScanSummary {
            statistics: CorpusStatistics::from_verdicts(&verdicts),
            verdicts,
            excluded: vec![ExcludedFile {
                path: "/v/b.mp4".to_string(),
                reason: "no video stream metadata in /v/b.mp4".to_string(),
            }],
        };

        let json: Value =
            serde_json::from_str(&render_json(&summary, "/v", "2026-10-18 09:00:00").unwrap())
                .unwrap();

        assert_eq!(json["scanned_path"], "/v");
        assert_eq!(json["statistics"]["total_files"], 1);
        assert_eq!(json["statistics"]["hdr"], 1);
        assert_eq!(json["statistics"]["sdr"], 0);
        assert_eq!(json["files"][0]["file_name"], "a.mp4");
        assert_eq!(json["files"][0]["color_display"], "HDR10");
        assert_eq!(json["excluded"][0]["path"], "/v/b.mp4");
    }
}
