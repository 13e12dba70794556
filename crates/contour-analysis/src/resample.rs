//! Fixed-length resampling of contour segments.
//!
//! Pitch is piecewise-constant between note attacks, so segments are
//! sampled with a previous-value step function (zero-order hold) over
//! normalized time, never linear interpolation.

use crate::types::{Contour, ResampledContour, Segment};
use crate::{Error, Result};

/// Resample a segment to `num_samples` pitch values at equally spaced
/// points of normalized time `[0, 1]`, both endpoints included.
///
/// The final sample point is exactly `1.0` and resolves to the pitch
/// active at the segment's last onset. The segment's duration passes
/// through unchanged.
pub fn resample_segment(segment: &Segment<'_>, num_samples: usize) -> Result<ResampledContour> {
    if num_samples == 0 {
        return Err(Error::InvalidSampleCount(num_samples));
    }

    let times = segment.times();
    let pitches = segment.pitches();
    let duration = segment.duration();
    if pitches.is_empty() || duration <= 0.0 {
        return Err(Error::MalformedContour {
            id: segment.key(),
            reason: "segment spans no inter-onset interval".into(),
        });
    }

    let t_start = times[0];
    let knots: Vec<f64> = times.iter().map(|&t| (t - t_start) / duration).collect();

    let samples = (0..num_samples)
        .map(|i| {
            let x = if num_samples == 1 {
                0.0
            } else {
                i as f64 / (num_samples - 1) as f64
            };
            previous_value(&knots, pitches, x)
        })
        .collect();

    Ok(ResampledContour {
        key: segment.key(),
        duration,
        samples,
    })
}

/// Resample a whole contour as a single segment.
pub fn resample_contour(contour: &Contour, num_samples: usize) -> Result<ResampledContour> {
    contour.validate()?;
    resample_segment(&Segment::whole(contour), num_samples)
}

/// Zero-order-hold lookup: the value active at the last knot `<= x`.
///
/// `knots` must be sorted with one more entry than `values`;
/// `values[i]` holds on `[knots[i], knots[i + 1])`. Queries at or past
/// the final knot resolve to the final value, so the closed right
/// endpoint of a normalized segment maps to its last pitch.
pub fn previous_value(knots: &[f64], values: &[i32], x: f64) -> i32 {
    debug_assert_eq!(knots.len(), values.len() + 1);
    let idx = knots.partition_point(|&t| t <= x);
    values[idx.saturating_sub(1).min(values.len() - 1)]
}
