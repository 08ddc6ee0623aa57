use crate::analyzer::{CoarseColor, FileVerdict, FrameRateBucket, ResolutionBucket};
use serde::Serialize;

/// Corpus-wide counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStatistics {
    pub total_files: usize,

    pub low_resolution: usize,
    pub good_resolution: usize,
    pub excellent_resolution: usize,

    pub unknown_frame_rate: usize,
    pub low_frame_rate: usize,
    pub normal_frame_rate: usize,
    pub high_frame_rate: usize,
    pub other_frame_rate: usize,

    pub hdr: usize,
    pub other_color_space: usize,
}

impl CorpusStatistics {
    /// Fold a sequence of verdicts
    pub fn from_verdicts<'a>(verdicts: impl IntoIterator<Item = &'a FileVerdict>) -> Self {
        verdicts.into_iter().fold(Self::default(), |mut stats, v| {
            stats.record(v);
            stats
        })
    }

    /// Count one verdict
    pub fn record(&mut self, verdict: &FileVerdict) {
        self.total_files += 1;

        match verdict.resolution_bucket {
            ResolutionBucket::Low => self.low_resolution += 1,
            ResolutionBucket::Good => self.good_resolution += 1,
            ResolutionBucket::Excellent => self.excellent_resolution += 1,
        }

        match verdict.frame_rate_bucket {
            FrameRateBucket::Unknown => self.unknown_frame_rate += 1,
            FrameRateBucket::Low => self.low_frame_rate += 1,
            FrameRateBucket::Normal => self.normal_frame_rate += 1,
            FrameRateBucket::High => self.high_frame_rate += 1,
            FrameRateBucket::Other => self.other_frame_rate += 1,
        }

        match verdict.color_category.coarse() {
            CoarseColor::Hdr => self.hdr += 1,
            CoarseColor::OtherColorSpace => self.other_color_space += 1,
            CoarseColor::Sdr => {}
        }
    }

    /// Files neither HDR nor in another color space
    pub fn sdr(&self) -> usize {
        self.total_files - self.hdr - self.other_color_space
    }

    /// Share of `count` in percent, rounded half-to-even to one decimal, 0 for
    /// an empty corpus
    pub fn percent(&self, count: usize) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        let pct = count as f64 / self.total_files as f64 * 100.0;
        (pct * 10.0).round_ties_even() / 10.0
    }
}
