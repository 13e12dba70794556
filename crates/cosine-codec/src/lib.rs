pub mod code;
pub mod dct;

pub use code::{
    encode_contour, forward, forward_samples, reconstruct, reconstruct_blended, CodecOrder,
    CodecParams, CosineCode,
};
pub use dct::{dct_ortho, idct_ortho};

/// Errors from cosine encoding and reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transform order must be 1 or 2, got {0}")]
    InvalidOrder(u8),
    #[error("coefficient count k={k} outside [1, {num_samples}]")]
    InvalidK { k: usize, num_samples: usize },
    #[error("incompatible cosine codes: {reason}")]
    IncompatibleCode { reason: String },
    #[error(transparent)]
    Contour(#[from] contour_analysis::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
