pub mod resample;
pub mod segment;
pub mod types;

pub use resample::{previous_value, resample_contour, resample_segment};
pub use segment::{segment_contour, SegmentPolicy, MEASURE_TIME_UNITS};
pub use types::{Contour, MelodyRecord, ResampledContour, Segment};

/// Errors from contour segmentation and resampling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed contour {id}: {reason}")]
    MalformedContour { id: String, reason: String },
    #[error("invalid sample count {0}: need at least 1")]
    InvalidSampleCount(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
