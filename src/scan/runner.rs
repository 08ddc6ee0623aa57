//! Batch orchestration: probe, classify and aggregate every discovered file.
//!
//! Worker threads pull file indices from a shared cursor and send their
//! outcome to the calling thread, which is the only one touching the
//! statistics. Rows are put back in discovery order before returning.

use crate::analyzer::{Classifier, FileVerdict, MetadataFetcher, ProbedFile};
use crate::error::AppError;
use crate::scan::statistics::CorpusStatistics;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use tracing::{error, info, warn};

/// Source of per-file metadata
pub trait Probe: Sync {
    fn probe(&self, path: &Path) -> Result<ProbedFile, AppError>;
}

impl Probe for MetadataFetcher {
    fn probe(&self, path: &Path) -> Result<ProbedFile, AppError> {
        MetadataFetcher::probe(self, path)
    }
}

/// Progress events emitted by the collecting thread
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// `completed` goes up by one per file, whatever the worker count
    Progress {
        completed: usize,
        total: usize,
        path: PathBuf,
    },
    /// A file was dropped from the corpus
    Excluded { path: PathBuf, reason: String },
}

/// A file that could not be classified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedFile {
    pub path: String,
    pub reason: String,
}

/// Result of one run
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub statistics: CorpusStatistics,
    /// In discovery order
    pub verdicts: Vec<FileVerdict>,
    /// In discovery order
    pub excluded: Vec<ExcludedFile>,
}

/// Message from a worker to the collector
struct WorkerMessage {
    index: usize,
    result: Result<FileVerdict, AppError>,
}

/// Runs the probe → classify → aggregate pipeline over a file list
pub struct BatchScanner<P: Probe> {
    prober: P,
    classifier: Classifier,
    jobs: usize,
}

impl<P: Probe> BatchScanner<P> {
    pub fn new(prober: P, classifier: Classifier, jobs: usize) -> Self {
        Self {
            prober,
            classifier,
            jobs: jobs.max(1),
        }
    }

    /// Process every file and fold the results
    pub fn run(&self, files: &[PathBuf], mut on_event: impl FnMut(ScanEvent)) -> ScanSummary {
        let total = files.len();
        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<WorkerMessage>();

        let mut rows: Vec<(usize, FileVerdict)> = Vec::with_capacity(total);
        let mut excluded: Vec<(usize, ExcludedFile)> = Vec::new();
        let mut completed = 0;

        thread::scope(|scope| {
            for _ in 0..self.jobs.min(total) {
                let tx = tx.clone();
                let cursor = &cursor;
                scope.spawn(move || self.work(files, cursor, tx));
            }
            drop(tx);

            for message in rx {
                completed += 1;
                let path = &files[message.index];

                match message.result {
                    Ok(verdict) => rows.push((message.index, verdict)),
                    Err(e) => {
                        if e.is_per_file() {
                            warn!("Excluding {}: {}", path.display(), e);
                        } else {
                            error!("Unexpected failure on {}: {}", path.display(), e);
                        }
                        let reason = e.to_string();
                        excluded.push((
                            message.index,
                            ExcludedFile {
                                path: path.display().to_string(),
                                reason: reason.clone(),
                            },
                        ));
                        on_event(ScanEvent::Excluded {
                            path: path.clone(),
                            reason,
                        });
                    }
                }

                info!(
                    "Analyzed {}/{} ({:.1}%) - {}",
                    completed,
                    total,
                    completed as f64 / total as f64 * 100.0,
                    path.display()
                );
                on_event(ScanEvent::Progress {
                    completed,
                    total,
                    path: path.clone(),
                });
            }
        });

        rows.sort_by_key(|(index, _)| *index);
        excluded.sort_by_key(|(index, _)| *index);

        let verdicts: Vec<FileVerdict> = rows.into_iter().map(|(_, v)| v).collect();
        ScanSummary {
            statistics: CorpusStatistics::from_verdicts(&verdicts),
            verdicts,
            excluded: excluded.into_iter().map(|(_, e)| e).collect(),
        }
    }

    fn work(&self, files: &[PathBuf], cursor: &AtomicUsize, tx: mpsc::Sender<WorkerMessage>) {
        loop {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            let Some(path) = files.get(index) else {
                break;
            };

            let result = self
                .prober
                .probe(path)
                .and_then(|probed| self.classifier.classify(&probed));

            if tx.send(WorkerMessage { index, result }).is_err() {
                break;
            }
        }
    }
}
