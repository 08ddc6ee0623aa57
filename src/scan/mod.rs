pub mod discovery;
pub mod runner;
pub mod statistics;

pub use discovery::find_video_files;
pub use runner::{BatchScanner, ExcludedFile, ScanEvent, ScanSummary};
pub use statistics::CorpusStatistics;
