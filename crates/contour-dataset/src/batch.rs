//! Batch construction of contour datasets.
//!
//! Records are independent, so resampling fans out across a rayon
//! worker pool; results are collected back in input order for
//! deterministic row ordering. The only cross-record coupling is the
//! adaptive-resolution padding pass, which runs once, sequentially,
//! after every record has finished.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use contour_analysis::{
    resample_segment, segment_contour, Contour, MelodyRecord, ResampledContour, SegmentPolicy,
};
use cosine_codec::{forward, CodecParams, CosineCode};

use crate::dataset::ContourDataset;
use crate::{Error, Result};

/// What to do when a record fails mid-batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failing record and return its error.
    #[default]
    Abort,
    /// Drop failing records and report them alongside the dataset.
    Skip,
}

/// Batch construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    pub policy: SegmentPolicy,
    /// Fixed sample count per row; each segment derives its own count
    /// instead when the policy enables adaptive resolution.
    pub num_samples: usize,
    pub error_policy: ErrorPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            policy: SegmentPolicy::default(),
            num_samples: 100,
            error_policy: ErrorPolicy::Abort,
        }
    }
}

/// A record dropped under [`ErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub key: String,
    pub reason: String,
}

/// Dataset plus the records skipped while building it.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub dataset: ContourDataset,
    pub skipped: Vec<SkippedRecord>,
}

/// Resample a batch of corpus records into a contour dataset.
pub fn build_dataset(records: &[MelodyRecord], options: &BatchOptions) -> Result<BatchResult> {
    let per_record: Vec<Result<Vec<ResampledContour>>> = records
        .par_iter()
        .map(|record| process_record(record, options))
        .collect();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (record, result) in records.iter().zip(per_record) {
        match result {
            Ok(segment_rows) => rows.extend(segment_rows),
            Err(err) => match options.error_policy {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::Skip => {
                    warn!(record = %record.title, error = %err, "skipping record");
                    skipped.push(SkippedRecord {
                        key: record.title.clone(),
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    let dataset = ContourDataset::from_rows(rows);
    info!(
        rows = dataset.len(),
        skipped = skipped.len(),
        width = dataset.num_samples(),
        "contour dataset built"
    );
    Ok(BatchResult { dataset, skipped })
}

/// Encode every dataset row as a sparse cosine code, in row order.
pub fn encode_dataset(dataset: &ContourDataset, params: &CodecParams) -> Result<Vec<CosineCode>> {
    dataset
        .rows()
        .par_iter()
        .map(|row| forward(row, params).map_err(Error::from))
        .collect()
}

fn process_record(record: &MelodyRecord, options: &BatchOptions) -> Result<Vec<ResampledContour>> {
    let contour = Contour::try_from(record.clone())?;
    let segments = segment_contour(&contour, &options.policy)?;
    debug!(record = %contour.id, segments = segments.len(), "resampling record");

    segments
        .iter()
        .map(|segment| {
            let num_samples = if options.policy.adaptable_resolution {
                segment.adaptive_num_samples()
            } else {
                options.num_samples
            };
            resample_segment(segment, num_samples).map_err(Error::from)
        })
        .collect()
}
