mod analyzer;
mod config;
mod error;
mod report;
mod scan;
mod utils;

use analyzer::{Classifier, MetadataFetcher};
use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use scan::{BatchScanner, CorpusStatistics, ScanEvent, ScanSummary};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Audit a footage folder for resolution, frame rate and color problems
#[derive(Debug, Parser)]
#[command(name = "clipaudit", version, about)]
struct Cli {
    /// Directory to scan recursively
    path: PathBuf,

    /// Number of files probed concurrently
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Timeout in seconds for every ffprobe/exiftool call
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// HTML report location (default: inside the scanned directory)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write a JSON export
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Configuration file to use instead of the default one
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not query ISO values with exiftool
    #[arg(long)]
    skip_iso: bool,

    /// ffprobe binary
    #[arg(long, value_name = "PATH")]
    ffprobe: Option<PathBuf>,

    /// exiftool binary
    #[arg(long, value_name = "PATH")]
    exiftool: Option<PathBuf>,

    /// Only log warnings; show a compact progress counter instead
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(jobs) = self.jobs {
            config.probe.jobs = jobs;
        }
        if let Some(timeout) = self.timeout {
            config.probe.timeout_secs = timeout;
        }
        if self.ffprobe.is_some() {
            config.probe.ffprobe = self.ffprobe.clone();
        }
        if self.exiftool.is_some() {
            config.probe.exiftool = self.exiftool.clone();
        }
        if self.skip_iso {
            config.probe.read_iso = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = utils::init_logging(cli.quiet);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::load(),
    };
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    let timeout = Duration::from_secs(config.probe.timeout_secs);

    let ffprobe = utils::resolve_tool("ffprobe", config.probe.ffprobe.as_deref());
    let version = utils::check_tool("ffprobe", &ffprobe, "-version", timeout)?;
    info!("Using {}", version);

    let exiftool = if config.probe.read_iso {
        let exiftool = utils::resolve_tool("exiftool", config.probe.exiftool.as_deref());
        match utils::check_tool("exiftool", &exiftool, "-ver", timeout) {
            Ok(version) => {
                info!("Using exiftool {}", version);
                Some(exiftool)
            }
            Err(e) => {
                warn!("{}. ISO values will not be read.", e);
                None
            }
        }
    } else {
        None
    };

    let root = cli
        .path
        .canonicalize()
        .map_err(|_| error::AppError::InvalidPath(cli.path.clone()))?;
    let files = scan::find_video_files(&root, &config.extensions)?;
    info!("Found {} video files under {}", files.len(), root.display());

    let fetcher = MetadataFetcher::new(ffprobe, exiftool, timeout);
    let classifier = Classifier::new(&config.extensions);
    let scanner = BatchScanner::new(fetcher, classifier, config.probe.jobs);

    let mut stdout = io::stdout();
    let summary = scanner.run(&files, |event| {
        if !cli.quiet {
            return;
        }
        if let ScanEvent::Progress { completed, total, .. } = event {
            let _ = queue!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine));
            let _ = write!(stdout, "Analyzing {}/{}", completed, total);
            let _ = stdout.flush();
        }
    });
    if cli.quiet {
        println!();
    }

    let input_path = root.display().to_string();
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let report_path = cli
        .output
        .clone()
        .unwrap_or_else(|| root.join(&config.report.file_name));
    let html = report::render_html(&summary, &input_path, &timestamp);
    report::write_report(&report_path, &html)
        .with_context(|| format!("Failed to write report {}", report_path.display()))?;

    if let Some(json_path) = &cli.json {
        let json = report::render_json(&summary, &input_path, &timestamp)
            .context("Failed to serialize JSON export")?;
        report::write_report(json_path, &json)
            .with_context(|| format!("Failed to write JSON export {}", json_path.display()))?;
    }

    print_summary(&summary, &report_path);
    Ok(())
}

fn count_line(label: &str, count: usize, stats: &CorpusStatistics) -> String {
    format!("{:<14}{:>6} ({:.1}%)", label, count, stats.percent(count))
}

fn print_summary(summary: &ScanSummary, report_path: &Path) {
    let stats = &summary.statistics;

    println!();
    println!("{}", format!("Analyzed {} files", stats.total_files).bold());

    println!("{}", "Resolution".underlined());
    println!("  {}", count_line("<1080p", stats.low_resolution, stats).red());
    println!("  {}", count_line("1080p", stats.good_resolution, stats).yellow());
    println!("  {}", count_line("4K", stats.excellent_resolution, stats).green());

    println!("{}", "Frame rate".underlined());
    println!("  {}", count_line("low", stats.low_frame_rate, stats).red());
    println!("  {}", count_line("30 fps", stats.normal_frame_rate, stats).yellow());
    println!("  {}", count_line("60 fps", stats.high_frame_rate, stats).green());
    println!("  {}", count_line("other", stats.other_frame_rate, stats));
    println!("  {}", count_line("unknown", stats.unknown_frame_rate, stats).dark_grey());

    println!("{}", "Color".underlined());
    println!("  {}", count_line("HDR", stats.hdr, stats).blue());
    println!("  {}", count_line("other", stats.other_color_space, stats).red());
    println!("  {}", count_line("SDR", stats.sdr(), stats));

    if !summary.excluded.is_empty() {
        println!(
            "{}",
            format!("{} files could not be analyzed:", summary.excluded.len()).red()
        );
        for file in &summary.excluded {
            println!("  {} {}", file.path.as_str().red(), file.reason.as_str().dark_grey());
        }
    }

    println!("Report: {}", report_path.display().to_string().cyan());
}
