use crate::error::AppError;
use crate::utils::run_tool;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Tags tried in order of preference
const ISO_TAGS: [&str; 3] = ["ISO", "ISOSensitivity", "RecommendedExposureIndex"];

/// Read the ISO-like tag of a file with exiftool
pub fn read_iso(exiftool: &Path, path: &Path, timeout: Duration) -> Result<Option<String>, AppError> {
    let input = path.to_string_lossy();
    let args = [
        "-json",
        "-ISO",
        "-ISOSensitivity",
        "-RecommendedExposureIndex",
        input.as_ref(),
    ];

    let output = run_tool(exiftool, &args, timeout).map_err(|e| AppError::ProbeFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(parse_iso_output(&output)?)
}

/// Pick the first non-empty ISO tag from exiftool's JSON output
pub fn parse_iso_output(output: &str) -> Result<Option<String>, serde_json::Error> {
    let data: Vec<serde_json::Map<String, Value>> = serde_json::from_str(output)?;
    let Some(tags) = data.first() else {
        return Ok(None);
    };

    Ok(ISO_TAGS
        .iter()
        .filter_map(|key| tags.get(*key))
        .find_map(normalize_iso))
}

/// Numbers become integer strings; empty, zero and null values are skipped
fn normalize_iso(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            let n = n.as_f64()?;
            (n != 0.0).then(|| (n.trunc() as i64).to_string())
        }
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Array(items) if !items.is_empty() => Some(value.to_string()),
        _ => None,
    }
}
