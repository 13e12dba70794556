//! End-to-end tests for the record → dataset → cosine code pipeline.

use contour_analysis::{MelodyRecord, SegmentPolicy};
use contour_dataset::{build_dataset, encode_dataset, BatchOptions, ErrorPolicy};
use cosine_codec::{reconstruct, reconstruct_blended, CodecOrder, CodecParams};

/// A short reel: onsets on a 6-units-per-measure grid, three measures.
fn reel() -> MelodyRecord {
    MelodyRecord {
        title: "reel".into(),
        times: vec![0.0, 1.5, 3.0, 6.0, 7.5, 10.5, 12.0, 13.5, 16.5, 18.0],
        pitches: vec![62, 64, 66, 67, 66, 64, 62, 59, 57],
    }
}

fn air() -> MelodyRecord {
    MelodyRecord {
        title: "air".into(),
        times: vec![0.0, 2.0, 3.0, 4.5, 6.0],
        pitches: vec![69, 71, 72, 69],
    }
}

#[test]
fn whole_melody_dataset_round_trips_through_codec() {
    let records = vec![reel(), air()];
    let options = BatchOptions {
        num_samples: 40,
        ..BatchOptions::default()
    };

    let result = build_dataset(&records, &options).expect("batch should succeed");
    assert_eq!(result.dataset.len(), 2);
    assert_eq!(result.dataset.num_samples(), 40);
    assert!(result.skipped.is_empty());

    // Full retention: reconstruction matches the resampled row.
    let params = CodecParams {
        k: 40,
        order: CodecOrder::One,
    };
    let codes = encode_dataset(&result.dataset, &params).expect("encoding should succeed");
    for (row, code) in result.dataset.rows().iter().zip(&codes) {
        let back = reconstruct(code);
        for (orig, rec) in row.samples.iter().zip(&back) {
            assert!(
                (*orig as f64 - rec).abs() < 1e-9,
                "row {}: {} vs {}",
                row.key,
                orig,
                rec
            );
        }
    }
}

#[test]
fn measure_segmented_dataset_has_per_measure_rows() {
    let options = BatchOptions {
        policy: SegmentPolicy::measures(1),
        num_samples: 16,
        ..BatchOptions::default()
    };

    let result = build_dataset(&[reel()], &options).expect("batch should succeed");

    // Boundary onsets at times 0, 6, 12, 18 → three measure segments.
    let keys: Vec<&str> = result
        .dataset
        .rows()
        .iter()
        .map(|r| r.key.as_str())
        .collect();
    assert_eq!(keys, vec!["reel_0", "reel_1", "reel_2"]);

    for row in result.dataset.rows() {
        assert_eq!(row.num_samples(), 16);
        assert_eq!(row.duration, 6.0);
    }

    // Each row starts at the pitch sounding on its measure's downbeat.
    assert_eq!(result.dataset.get("reel_0").unwrap().samples[0], 62);
    assert_eq!(result.dataset.get("reel_1").unwrap().samples[0], 67);
    assert_eq!(result.dataset.get("reel_2").unwrap().samples[0], 62);
}

#[test]
fn lossy_codes_blend_into_one_reconstruction() {
    let options = BatchOptions {
        num_samples: 32,
        ..BatchOptions::default()
    };
    let result = build_dataset(&[reel()], &options).expect("batch should succeed");

    let first = encode_dataset(
        &result.dataset,
        &CodecParams {
            k: 8,
            order: CodecOrder::One,
        },
    )
    .expect("order-1 encoding");
    let second = encode_dataset(
        &result.dataset,
        &CodecParams {
            k: 8,
            order: CodecOrder::Two,
        },
    )
    .expect("order-2 encoding");

    let blended = reconstruct_blended(&first[0], &second[0]).expect("blend");
    assert_eq!(blended.len(), 32);

    // Order 1 alone tracks the contour closely even at 8 of 32
    // coefficients; the order-2 half of the blend is a much looser
    // shape descriptor, so only the averaging contract is asserted.
    let row = &result.dataset.rows()[0];
    let from_first = reconstruct(&first[0]);
    for (orig, rec) in row.samples.iter().zip(&from_first) {
        assert!(
            (*orig as f64 - rec).abs() < 2.0,
            "order-1 reconstruction drifted: {} vs {}",
            orig,
            rec
        );
    }

    let from_second = reconstruct(&second[0]);
    for i in 0..blended.len() {
        let mean = (from_first[i] + from_second[i]) / 2.0;
        assert!((blended[i] - mean).abs() < 1e-9);
    }
}

#[test]
fn skip_policy_keeps_batch_going() {
    let mut records = vec![reel()];
    records.push(MelodyRecord {
        title: "broken".into(),
        times: vec![4.0, 2.0],
        pitches: vec![60],
    });
    records.push(air());

    let options = BatchOptions {
        num_samples: 20,
        error_policy: ErrorPolicy::Skip,
        ..BatchOptions::default()
    };

    let result = build_dataset(&records, &options).expect("skip policy should not abort");
    assert_eq!(result.dataset.len(), 2);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].key, "broken");

    let json = result.dataset.to_json().expect("dataset serializes");
    assert!(json.contains("\"key\":\"reel\""));
    assert!(json.contains("\"duration\""));
}
