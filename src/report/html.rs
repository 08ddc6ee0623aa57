use crate::analyzer::FileVerdict;
use crate::scan::{CorpusStatistics, ExcludedFile, ScanSummary};
use std::collections::HashMap;
use std::fmt::Write as _;

const TEMPLATE: &str = include_str!("template.html");

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a single- or double-quoted JavaScript string literal
pub fn escape_js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// A copy-to-clipboard button: the path goes into a JS string inside an
/// attribute, the label into element content
fn copy_button(path: &str, label: &str, title: &str) -> String {
    format!(
        r#"<button class="copy-btn" onclick="copyToClipboard('{}')" title="{}">{}</button>"#,
        escape_html(&escape_js_string(path)),
        title,
        escape_html(label)
    )
}

fn render_row(v: &FileVerdict) -> String {
    let note = v.note.as_deref().unwrap_or("-");
    format!(
        r#"
            <tr class="data-row {row_class}">
                <td>{dir}</td>
                <td>{file}</td>
                <td class="{res_class}">{res}</td>
                <td class="{fps_class}">{fps}</td>
                <td class="{color_class}" title="{color_info}">{color}</td>
                <td class="white">{note}</td>
            </tr>
"#,
        row_class = v.row_class(),
        dir = copy_button(&v.directory, &v.directory, "点击复制目录路径"),
        file = copy_button(&v.full_path, &v.file_name, "点击复制完整文件路径"),
        res_class = v.resolution_severity.css_class(),
        res = escape_html(v.resolution_status),
        fps_class = v.frame_rate_severity.css_class(),
        fps = escape_html(&v.frame_rate_status),
        color_class = v.color_severity.css_class(),
        color_info = escape_html(&v.color_info),
        color = escape_html(&v.color_display),
        note = escape_html(note),
    )
}

fn render_rows(verdicts: &[FileVerdict]) -> String {
    if verdicts.is_empty() {
        return r#"
            <tr>
                <td colspan="6" style="text-align: center; padding: 50px; color: #888;">
                    <h3>🎉 恭喜！</h3>
                    <p>没有发现需要警告的视频文件。</p>
                </td>
            </tr>
"#
        .to_string();
    }
    verdicts.iter().map(render_row).collect()
}

fn render_excluded(excluded: &[ExcludedFile]) -> String {
    if excluded.is_empty() {
        return String::new();
    }
    let mut out = String::from("<h3>未能分析的文件</h3>\n<table>\n<tbody>\n");
    for file in excluded {
        let _ = writeln!(
            out,
            r#"<tr><td class="red">{}</td><td class="gray">{}</td></tr>"#,
            escape_html(&file.path),
            escape_html(&file.reason)
        );
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Replace every `{{key}}` in one pass, so substituted values are never
/// re-scanned for placeholders
fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) if values.contains_key(&after[..end]) => {
                out.push_str(&values[&after[..end]]);
                rest = &after[end + 2..];
            }
            _ => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn stat_values(stats: &CorpusStatistics, values: &mut HashMap<&'static str, String>) {
    let entries: [(&'static str, &'static str, usize); 9] = [
        ("low_resolution_count", "low_resolution_percent", stats.low_resolution),
        ("good_resolution_count", "good_resolution_percent", stats.good_resolution),
        (
            "excellent_resolution_count",
            "excellent_resolution_percent",
            stats.excellent_resolution,
        ),
        ("low_framerate_count", "low_framerate_percent", stats.low_frame_rate),
        ("normal_framerate_count", "normal_framerate_percent", stats.normal_frame_rate),
        ("high_framerate_count", "high_framerate_percent", stats.high_frame_rate),
        ("hdr_count", "hdr_percent", stats.hdr),
        (
            "other_color_space_count",
            "other_color_space_percent",
            stats.other_color_space,
        ),
        ("sdr_count", "sdr_percent", stats.sdr()),
    ];
    for (count_key, percent_key, count) in entries {
        values.insert(count_key, count.to_string());
        values.insert(percent_key, format!("{:.1}", stats.percent(count)));
    }
}

/// Render the full HTML report
pub fn render_html(summary: &ScanSummary, input_path: &str, timestamp: &str) -> String {
    let mut values: HashMap<&str, String> = HashMap::new();
    values.insert("timestamp", escape_html(timestamp));
    values.insert("input_path", escape_html(input_path));
    values.insert("total_files", summary.statistics.total_files.to_string());
    values.insert(
        "excluded_summary",
        if summary.excluded.is_empty() {
            String::new()
        } else {
            format!(" &nbsp;|&nbsp; 未能分析: {}", summary.excluded.len())
        },
    );
    stat_values(&summary.statistics, &mut values);
    values.insert("table_rows", render_rows(&summary.verdicts));
    values.insert("excluded_rows", render_excluded(&summary.excluded));

    fill_template(TEMPLATE, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Classifier;
    use crate::analyzer::metadata::{FrameRate, RawStreamMetadata};
    use crate::config::ExtensionConfig;
    use std::path::Path;

    fn summary(verdicts: Vec<FileVerdict>, excluded: Vec<ExcludedFile>) -> ScanSummary {
        ScanSummary {
            statistics: CorpusStatistics::from_verdicts(&verdicts),
            verdicts,
            excluded,
        }
    }

    fn verdict(path: &str) -> FileVerdict {
        let meta = RawStreamMetadata {
            width: 1920,
            height: 1080,
            frame_rate: FrameRate::parse("25/1"),
            file_extension: ".mp4".to_string(),
            ..Default::default()
        };
        Classifier::new(&ExtensionConfig::default()).classify_stream(
            Path::new(path),
            &meta,
            Some("6400"),
        )
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("普通文本"), "普通文本");
    }

    #[test]
    fn escapes_script_strings() {
        assert_eq!(escape_js_string(r"C:\clips\it's"), r"C:\\clips\\it\'s");
        assert_eq!(escape_js_string("a\"b\nc"), "a\\\"b\\nc");
        assert_eq!(escape_js_string("</script>"), "\\x3C/script>");
        assert_eq!(escape_js_string("a\u{2028}b\u{2029}c"), "a\\u2028b\\u2029c");
    }

    #[test]
    fn copy_button_escapes_both_contexts() {
        let html = copy_button("/v/O'Brien & <co>", "O'Brien & <co>", "t");
        assert!(html.contains("copyToClipboard('/v/O\\&#39;Brien &amp; \\x3Cco&gt;')"));
        assert!(html.contains(">O&#39;Brien &amp; &lt;co&gt;</button>"));
    }

    #[test]
    fn fills_every_placeholder() {
        let html = render_html(&summary(vec![verdict("/v/a.mp4")], vec![]), "/v", "2026-10-18 09:00:00");
        assert!(!html.contains("{{"));
        assert!(html.contains("2026-10-18 09:00:00"));
        assert!(html.contains("文件总数: 1"));
        assert!(html.contains("ISO为6400，考虑提前降噪"));
        assert!(html.contains("低帧率"));
        assert!(html.contains("1 (100.0%)"));
    }

    #[test]
    fn empty_corpus_has_congratulation_row_and_zero_percentages() {
        let html = render_html(&summary(vec![], vec![]), "/v", "now");
        assert!(html.contains("没有发现需要警告的视频文件"));
        assert!(html.contains("0 (0.0%)"));
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn file_names_with_braces_are_not_substituted() {
        let html = render_html(&summary(vec![verdict("/v/{{sdr_count}}.mp4")], vec![]), "/v", "now");
        assert!(html.contains("{{sdr_count}}.mp4"));
    }

    #[test]
    fn rows_keep_given_order() {
        let html = render_html(
            &summary(vec![verdict("/v/z.mp4"), verdict("/v/a.mp4")], vec![]),
            "/v",
            "now",
        );
        let z = html.find("z.mp4").unwrap();
        let a = html.find("a.mp4").unwrap();
        assert!(z < a);
    }

    #[test]
    fn lists_excluded_files() {
        let excluded = vec![ExcludedFile {
            path: "/v/broken.mp4".to_string(),
            reason: "ffprobe exited with exit status: 1: <moov atom not found>".to_string(),
        }];
        let html = render_html(&summary(vec![], excluded), "/v", "now");
        assert!(html.contains("未能分析: 1"));
        assert!(html.contains("&lt;moov atom not found&gt;"));
    }
}
