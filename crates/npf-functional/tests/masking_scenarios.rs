//! End-to-end masking scenarios on small, hand-checked arrays.

use approx::assert_relative_eq;
use npf_core::{ErrorKind, Tensor};
use npf_functional::*;

fn sequence_batch() -> Tensor<f64> {
    // batch of 2 sequences, length 4, 3 features
    Tensor::from_vec((0..24).map(f64::from).collect(), &[2, 4, 3]).unwrap()
}

#[test]
fn test_fill_columns_of_a_matrix() {
    let a = Tensor::from_vec((1..=12).map(f64::from).collect(), &[4, 3]).unwrap();
    let mask = Tensor::from_vec(vec![true, false, true], &[3]).unwrap();

    let filled = masked_fill(&a, &mask, &AxisSpec::mask_axis(1), -1.0).unwrap();
    for row in filled.to_vec().chunks(3) {
        assert_eq!(row[1], -1.0);
        assert_ne!(row[0], -1.0);
        assert_ne!(row[2], -1.0);
    }
}

#[test]
fn test_sequence_length_mask_over_time_axis() {
    let x = sequence_batch();
    let valid = get_mask(4, 0, Some(2));
    let spec = AxisSpec::non_mask_axis([0, 2]);

    let pooled = masked_mean(&x, &valid, Some(1.into()), &spec, false).unwrap();
    assert_eq!(pooled.shape().dims(), &[2, 3]);
    // mean of time steps 0 and 1
    assert_eq!(pooled.to_vec(), vec![1.5, 2.5, 3.5, 13.5, 14.5, 15.5]);

    let peak = masked_max(&x, &valid, Some(1.into()), &spec, true).unwrap();
    assert_eq!(peak.shape().dims(), &[2, 1, 3]);
    assert_eq!(peak.to_vec(), vec![3.0, 4.0, 5.0, 15.0, 16.0, 17.0]);
}

#[test]
fn test_two_dimensional_mask_over_batch_and_time() {
    let x = sequence_batch();
    let mask = Tensor::from_vec(
        vec![true, true, false, false, true, true, true, false],
        &[2, 4],
    )
    .unwrap();
    let spec = AxisSpec::mask_axis([0, 1]);

    let totals = masked_sum(&x, &mask, Some([1, 2].into()), &spec, false).unwrap();
    // batch 0: steps 0..2 -> 0..6; batch 1: steps 0..3 -> 12..21
    assert_eq!(totals.to_vec(), vec![15.0, 144.0]);

    let lowest = masked_min(&x, &mask, None, &spec, false).unwrap();
    assert_eq!(lowest.to_vec(), vec![0.0]);
}

#[test]
fn test_flatten_then_mask_then_unflatten() {
    let x = sequence_batch();
    let (flat, meta) = flatten(&x, Some(0), Some(2)).unwrap();
    assert_eq!(flat.shape().dims(), &[8, 3]);

    let rows = get_mask(8, 2, Some(6));
    let filled = masked_fill(&flat, &rows, &AxisSpec::mask_axis(0), 0.0).unwrap();
    let restored = unflatten(&filled, &meta, 0).unwrap();
    assert_eq!(restored.shape().dims(), &[2, 4, 3]);

    let values = restored.to_vec();
    assert!(values[..6].iter().all(|&v| v == 0.0));
    assert_eq!(values[6], 6.0);
    assert!(values[18..].iter().all(|&v| v == 0.0));
}

#[test]
fn test_repeat_axis_broadcasts_features() {
    let features = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
    let tiled = repeat_axis(&features, [2usize, 4], [0, 1]).unwrap();
    assert_eq!(tiled.shape().dims(), &[2, 4, 3]);
    assert!(tiled.to_vec().chunks(3).all(|c| c == [1.0, 2.0, 3.0]));
}

#[test]
fn test_logmeanexp_matches_direct_evaluation() {
    let x = Tensor::from_vec(vec![0.5, -1.0, 2.0, 0.0], &[2, 2]).unwrap();
    let out = logmeanexp(&x, Some(1.into()), None, true).unwrap();
    assert_eq!(out.shape().dims(), &[2, 1]);

    let out = out.to_vec();
    let first = ((0.5f64.exp() + (-1.0f64).exp()) / 2.0).ln();
    let second = ((2.0f64.exp() + 1.0) / 2.0).ln();
    assert_relative_eq!(out[0], first, epsilon = 1e-12);
    assert_relative_eq!(out[1], second, epsilon = 1e-12);

    let zeros = Tensor::<f64>::zeros(&[5]);
    assert_eq!(logmeanexp(&zeros, None, None, false).unwrap().to_vec(), vec![0.0]);
}

#[test]
fn test_error_classification() {
    let x = sequence_batch();
    let mask = get_mask(4, 0, None);

    let err = AxisSpec::from_options(Some(1.into()), Some([0, 2].into())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let err = masked_sum(&x, &mask, None, &AxisSpec::Unspecified, false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);

    let err = masked_sum(&x, &mask, None, &AxisSpec::mask_axis(2), false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(err.to_string().contains("[2, 4, 3]"));

    let err = repeat_axis(&x, 2usize, [0, 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
