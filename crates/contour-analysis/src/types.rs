use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A monophonic melodic line as paired onset times and pitches.
///
/// `times` is strictly increasing; the final entry is the melody's end
/// timestamp (a sentinel, not a note onset). `pitches[i]` is the pitch
/// sounding during `[times[i], times[i + 1])`, so there is one pitch
/// per inter-onset interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub id: String,
    pub times: Vec<f64>,
    pub pitches: Vec<i32>,
}

impl Contour {
    /// Build a validated contour.
    ///
    /// Accepts either one pitch per inter-onset interval, or the corpus
    /// loader convention of one pitch per timestamp (the trailing pitch
    /// aligned with the end sentinel is dropped).
    pub fn new(id: impl Into<String>, times: Vec<f64>, mut pitches: Vec<i32>) -> Result<Self> {
        if !times.is_empty() && pitches.len() == times.len() {
            pitches.pop();
        }
        let contour = Self {
            id: id.into(),
            times,
            pitches,
        };
        contour.validate()?;
        Ok(contour)
    }

    /// Check the contour invariants, failing with the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.times.len() < 2 {
            return Err(self.malformed(format!(
                "need at least 2 timestamps, got {}",
                self.times.len()
            )));
        }
        if let Some(w) = self.times.windows(2).find(|w| w[1] <= w[0]) {
            return Err(self.malformed(format!(
                "onset times not strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }
        if self.pitches.len() != self.times.len() - 1 {
            return Err(self.malformed(format!(
                "expected {} pitches for {} timestamps, got {}",
                self.times.len() - 1,
                self.times.len(),
                self.pitches.len()
            )));
        }
        Ok(())
    }

    /// Total duration from first onset to the end sentinel.
    pub fn duration(&self) -> f64 {
        self.times[self.times.len() - 1] - self.times[0]
    }

    fn malformed(&self, reason: String) -> Error {
        Error::MalformedContour {
            id: self.id.clone(),
            reason,
        }
    }
}

/// Input record as produced by the corpus loader.
///
/// Field names on the wire follow the loader's convention
/// (`timespace` / `pitchspace`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodyRecord {
    pub title: String,
    #[serde(rename = "timespace")]
    pub times: Vec<f64>,
    #[serde(rename = "pitchspace")]
    pub pitches: Vec<i32>,
}

impl TryFrom<MelodyRecord> for Contour {
    type Error = Error;

    fn try_from(record: MelodyRecord) -> Result<Self> {
        Contour::new(record.title, record.times, record.pitches)
    }
}

/// A contiguous slice of a contour between two boundary onsets.
///
/// The segment owns onset indices `start..end`; `times[end]` acts as
/// its end sentinel (the next boundary onset, or the contour's final
/// timestamp). Duration and time normalization both use that sentinel,
/// so the whole-melody and measure-aligned paths share one convention.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    contour: &'a Contour,
    pub start: usize,
    pub end: usize,
    ordinal: Option<usize>,
}

impl<'a> Segment<'a> {
    pub(crate) fn new(
        contour: &'a Contour,
        start: usize,
        end: usize,
        ordinal: Option<usize>,
    ) -> Self {
        Self {
            contour,
            start,
            end,
            ordinal,
        }
    }

    /// Segment spanning the entire contour.
    pub(crate) fn whole(contour: &'a Contour) -> Self {
        Self::new(contour, 0, contour.times.len() - 1, None)
    }

    /// Row key: the contour id alone for a whole-melody segment,
    /// `{id}_{ordinal}` for measure-aligned segments.
    pub fn key(&self) -> String {
        match self.ordinal {
            None => self.contour.id.clone(),
            Some(i) => format!("{}_{}", self.contour.id, i),
        }
    }

    /// Segment-local duration, up to the end sentinel.
    pub fn duration(&self) -> f64 {
        self.contour.times[self.end] - self.contour.times[self.start]
    }

    /// Onset times including the end sentinel.
    pub fn times(&self) -> &[f64] {
        &self.contour.times[self.start..=self.end]
    }

    /// One pitch per inter-onset interval within the segment.
    pub fn pitches(&self) -> &[i32] {
        &self.contour.pitches[self.start..self.end]
    }

    /// Smallest inter-onset gap within the segment.
    pub fn min_onset_gap(&self) -> f64 {
        self.times()
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f64::INFINITY, f64::min)
    }

    /// Sample count derived from the segment's own time resolution:
    /// `floor(duration / min_onset_gap)`. Always at least 1, since the
    /// duration is the sum of the gaps.
    pub fn adaptive_num_samples(&self) -> usize {
        (self.duration() / self.min_onset_gap()).floor() as usize
    }
}

/// Fixed-length sample vector produced by the resampler.
///
/// `samples` holds `num_samples` pitch values taken at equally spaced
/// points of normalized time; `duration` carries the segment-local
/// duration through unchanged. Under adaptive resolution the batch
/// padding pass may extend `samples` with zeros; padding never touches
/// the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledContour {
    pub key: String,
    pub duration: f64,
    pub samples: Vec<i32>,
}

impl ResampledContour {
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }
}
