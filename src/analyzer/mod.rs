pub mod classifier;
pub mod color;
pub mod exiftool;
pub mod ffprobe;
pub mod metadata;
pub mod verdict;

pub use classifier::Classifier;
pub use ffprobe::MetadataFetcher;
pub use metadata::ProbedFile;
pub use verdict::{CoarseColor, FileVerdict, FrameRateBucket, ResolutionBucket};
