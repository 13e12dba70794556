use contour_analysis::{resample_contour, Contour, ResampledContour};
use serde::{Deserialize, Serialize};

use crate::dct::{dct_ortho, idct_ortho};
use crate::{Error, Result};

/// Transform order: how many forward passes produced a code.
///
/// Order two applies the transform to its own output. That is a
/// heuristic smoothed shape descriptor, not a higher-fidelity
/// encoding; it is kept because downstream representations depend on
/// its exact behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CodecOrder {
    One,
    Two,
}

impl From<CodecOrder> for u8 {
    fn from(order: CodecOrder) -> u8 {
        match order {
            CodecOrder::One => 1,
            CodecOrder::Two => 2,
        }
    }
}

impl TryFrom<u8> for CodecOrder {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(CodecOrder::One),
            2 => Ok(CodecOrder::Two),
            other => Err(Error::InvalidOrder(other)),
        }
    }
}

impl std::fmt::Display for CodecOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Forward-transform parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecParams {
    /// Number of coefficients retained by magnitude.
    pub k: usize,
    pub order: CodecOrder,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            k: 20,
            order: CodecOrder::One,
        }
    }
}

/// Sparse frequency-domain representation of one resampled contour.
///
/// `coefficients` has the full sample count, with at most `k` non-zero
/// entries. A code is an independent artifact: it keeps no reference
/// to the contour it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosineCode {
    pub order: CodecOrder,
    pub k: usize,
    pub coefficients: Vec<f64>,
}

impl CosineCode {
    pub fn num_samples(&self) -> usize {
        self.coefficients.len()
    }
}

/// Compress a resampled contour into a sparse cosine code.
pub fn forward(contour: &ResampledContour, params: &CodecParams) -> Result<CosineCode> {
    let samples: Vec<f64> = contour.samples.iter().map(|&p| p as f64).collect();
    forward_samples(&samples, params)
}

/// Forward transform over a raw sample vector.
///
/// Applies the orthonormal cosine transform once (order 1) or twice
/// (order 2), then zeroes all but the `k` largest-magnitude
/// coefficients.
pub fn forward_samples(samples: &[f64], params: &CodecParams) -> Result<CosineCode> {
    if params.k < 1 || params.k > samples.len() {
        return Err(Error::InvalidK {
            k: params.k,
            num_samples: samples.len(),
        });
    }

    let mut coefficients = match params.order {
        CodecOrder::One => dct_ortho(samples),
        CodecOrder::Two => dct_ortho(&dct_ortho(samples)),
    };
    retain_top_k(&mut coefficients, params.k);

    Ok(CosineCode {
        order: params.order,
        k: params.k,
        coefficients,
    })
}

/// Zero all but the `k` largest-magnitude coefficients in place.
///
/// Selection is by absolute magnitude, not frequency index. Ties at
/// the retention boundary break deterministically: the stable sort
/// zeroes the lower-index coefficient of a tied pair first.
fn retain_top_k(coefficients: &mut [f64], k: usize) {
    let mut by_magnitude: Vec<usize> = (0..coefficients.len()).collect();
    by_magnitude.sort_by(|&a, &b| coefficients[a].abs().total_cmp(&coefficients[b].abs()));
    for &idx in &by_magnitude[..coefficients.len() - k] {
        coefficients[idx] = 0.0;
    }
}

/// Encode a raw contour directly: whole-melody resampling followed by
/// the forward transform.
pub fn encode_contour(
    contour: &Contour,
    num_samples: usize,
    params: &CodecParams,
) -> Result<CosineCode> {
    let resampled = resample_contour(contour, num_samples)?;
    forward(&resampled, params)
}

/// Reconstruct an approximate sample vector from one code.
///
/// Order-1 codes invert with one inverse transform, order-2 codes with
/// two. The output is real-valued; callers needing integer pitches
/// round or truncate explicitly.
pub fn reconstruct(code: &CosineCode) -> Vec<f64> {
    match code.order {
        CodecOrder::One => idct_ortho(&code.coefficients),
        CodecOrder::Two => idct_ortho(&idct_ortho(&code.coefficients)),
    }
}

/// Blend an order-1 and an order-2 code of the same length into one
/// reconstruction: each inverts independently and the two signals are
/// averaged element-wise.
pub fn reconstruct_blended(first: &CosineCode, second: &CosineCode) -> Result<Vec<f64>> {
    if first.order != CodecOrder::One || second.order != CodecOrder::Two {
        return Err(Error::IncompatibleCode {
            reason: format!(
                "blended reconstruction needs an order-1 and an order-2 code, got orders {} and {}",
                first.order, second.order
            ),
        });
    }
    if first.num_samples() != second.num_samples() {
        return Err(Error::IncompatibleCode {
            reason: format!(
                "codes describe different sample counts: {} vs {}",
                first.num_samples(),
                second.num_samples()
            ),
        });
    }

    let a = reconstruct(first);
    let b = reconstruct(second);
    Ok(a.iter().zip(&b).map(|(x, y)| (x + y) / 2.0).collect())
}
