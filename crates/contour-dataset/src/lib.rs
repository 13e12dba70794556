pub mod batch;
pub mod dataset;

pub use batch::{
    build_dataset, encode_dataset, BatchOptions, BatchResult, ErrorPolicy, SkippedRecord,
};
pub use dataset::ContourDataset;

/// Errors from batch dataset construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Contour(#[from] contour_analysis::Error),
    #[error(transparent)]
    Codec(#[from] cosine_codec::Error),
    #[error("dataset serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
