//! Cross-checks between the plain reductions and their `where`-aware forms.

use approx::assert_relative_eq;
use npf_core::ops::{
    max, max_where, mean, mean_where, min, min_where, sum, sum_where, MAX_IDENTITY, MIN_IDENTITY,
};
use npf_core::Tensor;

fn cube() -> Tensor<f64> {
    let data = (0..24).map(|v| (v as f64 * 0.7).sin() * 10.0).collect();
    Tensor::from_vec(data, &[2, 3, 4]).unwrap()
}

fn assert_all_close(a: &Tensor<f64>, b: &Tensor<f64>) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.to_vec().iter().zip(b.to_vec()) {
        assert_relative_eq!(*x, y, epsilon = 1e-10);
    }
}

#[test]
fn test_all_true_where_matches_plain_reductions() {
    let x = cube();
    let everywhere = Tensor::full(&[1, 1, 1], true);

    let axis_sets: [Option<&[i32]>; 5] = [None, Some(&[0]), Some(&[1]), Some(&[-1]), Some(&[0, 2])];
    for axes in axis_sets {
        for keepdims in [false, true] {
            assert_all_close(
                &sum_where(&x, &everywhere, axes, keepdims).unwrap(),
                &sum(&x, axes, keepdims).unwrap(),
            );
            assert_all_close(
                &mean_where(&x, &everywhere, axes, keepdims).unwrap(),
                &mean(&x, axes, keepdims).unwrap(),
            );
            assert_all_close(
                &min_where(&x, &everywhere, axes, keepdims, MIN_IDENTITY.value()).unwrap(),
                &min(&x, axes, keepdims).unwrap(),
            );
            assert_all_close(
                &max_where(&x, &everywhere, axes, keepdims, MAX_IDENTITY.value()).unwrap(),
                &max(&x, axes, keepdims).unwrap(),
            );
        }
    }
}

#[test]
fn test_all_false_where_yields_identities() {
    let x = cube();
    let nowhere = Tensor::full(&[4], false);

    let s = sum_where(&x, &nowhere, Some(&[2]), false).unwrap();
    assert!(s.to_vec().iter().all(|&v| v == 0.0));

    let m = mean_where(&x, &nowhere, Some(&[2]), false).unwrap();
    assert!(m.to_vec().iter().all(|v| v.is_nan()));

    let lo = min_where(&x, &nowhere, None, false, MIN_IDENTITY.value()).unwrap();
    assert_eq!(lo.to_vec(), vec![f64::INFINITY]);

    let hi = max_where(&x, &nowhere, None, false, MAX_IDENTITY.value()).unwrap();
    assert_eq!(hi.to_vec(), vec![f64::NEG_INFINITY]);
}
