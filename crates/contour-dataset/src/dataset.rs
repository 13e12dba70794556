use contour_analysis::ResampledContour;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Batch output table: one row per segment, all rows the same width.
///
/// Rows keep the order their source records arrived in. The table is
/// immutable once built; downstream analysis reads rows or serializes
/// the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourDataset {
    num_samples: usize,
    rows: Vec<ResampledContour>,
}

impl ContourDataset {
    /// Assemble the table from finished per-segment results.
    ///
    /// The uniform width is the widest row in the batch; shorter rows
    /// (from adaptive resolution) are zero-padded on the right. Must
    /// run strictly after all resampling has completed, as the one
    /// sequential step of batch construction. Durations are untouched
    /// by padding.
    pub(crate) fn from_rows(mut rows: Vec<ResampledContour>) -> Self {
        let num_samples = rows.iter().map(|r| r.num_samples()).max().unwrap_or(0);
        for row in &mut rows {
            row.samples.resize(num_samples, 0);
        }
        Self { num_samples, rows }
    }

    /// Uniform sample-vector width of every row.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ResampledContour] {
        &self.rows
    }

    /// Look up a row by its segment key.
    pub fn get(&self, key: &str) -> Option<&ResampledContour> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_row(key: &str, samples: Vec<i32>) -> ResampledContour {
        ResampledContour {
            key: key.into(),
            duration: 8.0,
            samples,
        }
    }

    #[test]
    fn rows_pad_to_widest() {
        let dataset = ContourDataset::from_rows(vec![
            make_row("a", vec![60, 62, 64]),
            make_row("b", vec![50, 52, 54, 55, 57]),
        ]);

        assert_eq!(dataset.num_samples(), 5);
        assert_eq!(dataset.rows()[0].samples, vec![60, 62, 64, 0, 0]);
        assert_eq!(dataset.rows()[1].samples, vec![50, 52, 54, 55, 57]);
        // Padding changes the sample count, never the duration.
        assert_eq!(dataset.rows()[0].duration, 8.0);
    }

    #[test]
    fn get_by_key() {
        let dataset = ContourDataset::from_rows(vec![
            make_row("a_0", vec![60, 62]),
            make_row("a_1", vec![64, 65]),
        ]);
        assert_eq!(dataset.get("a_1").unwrap().samples, vec![64, 65]);
        assert!(dataset.get("missing").is_none());
    }

    #[test]
    fn empty_batch_is_an_empty_table() {
        let dataset = ContourDataset::from_rows(vec![]);
        assert!(dataset.is_empty());
        assert_eq!(dataset.num_samples(), 0);
    }

    #[test]
    fn json_round_trip() {
        let dataset = ContourDataset::from_rows(vec![make_row("a", vec![60, 62])]);
        let json = dataset.to_json().unwrap();
        assert!(json.contains("\"duration\":8.0"));
        let back: ContourDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);
    }
}
