use std::num::NonZeroU32;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::{Contour, Segment};
use crate::{Error, Result};

/// Time units per measure in the corpus encoding.
pub const MEASURE_TIME_UNITS: f64 = 6.0;

/// How a contour is split into segments before resampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPolicy {
    /// Place a boundary every `measure_resolution` measures; `None`
    /// keeps the whole melody as a single segment.
    pub measure_resolution: Option<NonZeroU32>,
    /// Seed for boundary jitter; `None` leaves boundaries in place.
    pub random_seed: Option<u64>,
    /// Derive each segment's sample count from its own time resolution
    /// instead of a fixed count.
    pub adaptable_resolution: bool,
}

impl SegmentPolicy {
    /// Whole-melody policy: one segment per contour, no jitter.
    pub fn whole_melody() -> Self {
        Self::default()
    }

    /// Measure-aligned policy with boundaries every `resolution` measures.
    pub fn measures(resolution: u32) -> Self {
        Self {
            measure_resolution: NonZeroU32::new(resolution),
            ..Self::default()
        }
    }
}

/// Split a contour into segments according to the policy.
///
/// Whole-melody policy yields exactly one segment spanning the entire
/// contour. Measure-aligned policy yields one segment per consecutive
/// pair of boundary onsets; a contour with fewer than two boundaries
/// yields no segments, which is not an error.
///
/// The contour is validated first; malformed input fails immediately
/// rather than producing degenerate segments.
pub fn segment_contour<'a>(
    contour: &'a Contour,
    policy: &SegmentPolicy,
) -> Result<Vec<Segment<'a>>> {
    contour.validate()?;

    let Some(resolution) = policy.measure_resolution else {
        return Ok(vec![Segment::whole(contour)]);
    };

    let mut boundaries = measure_boundaries(&contour.times, resolution);

    if let Some(seed) = policy.random_seed {
        let mut rng = StdRng::seed_from_u64(seed);
        boundaries = jitter_boundaries(&boundaries, resolution, contour.times.len(), &mut rng);
    }

    let mut segments = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for (ordinal, pair) in boundaries.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        if end <= start {
            // Jitter drew offsets that put consecutive boundaries out
            // of order; the segment would span no interval.
            return Err(Error::MalformedContour {
                id: contour.id.clone(),
                reason: format!("boundaries {start} and {end} leave no segment span"),
            });
        }
        segments.push(Segment::new(contour, start, end, Some(ordinal)));
    }
    Ok(segments)
}

/// Onset indices whose measure index (`time / 6`) is an exact integer
/// multiple of `resolution`.
fn measure_boundaries(times: &[f64], resolution: NonZeroU32) -> Vec<usize> {
    let period = MEASURE_TIME_UNITS * resolution.get() as f64;
    times
        .iter()
        .enumerate()
        .filter(|&(_, &t)| is_integral(t / period))
        .map(|(i, _)| i)
        .collect()
}

/// Integrality test with a small tolerance, so onset grids that encode
/// measures exactly stay exact under division.
fn is_integral(x: f64) -> bool {
    (x - x.round()).abs() < 1e-9
}

/// Shift every boundary index forward by an independent uniform draw in
/// `[0, resolution)`, then drop any index at or past the contour's last
/// valid onset.
fn jitter_boundaries(
    boundaries: &[usize],
    resolution: NonZeroU32,
    num_times: usize,
    rng: &mut StdRng,
) -> Vec<usize> {
    boundaries
        .iter()
        .map(|&idx| idx + rng.random_range(0..resolution.get()) as usize)
        .filter(|&idx| idx < num_times - 1)
        .collect()
}
