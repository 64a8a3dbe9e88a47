use super::*;

#[test]
fn test_blend_renormalizes_over_available() {
    let full = weighted_blend(&[(Some(1.0), 0.7), (Some(2.0), 0.2), (Some(3.0), 0.1)]).unwrap();
    assert!((full - 1.4).abs() < 1e-12);

    let partial = weighted_blend(&[(Some(1.0), 0.7), (None, 0.2), (Some(3.0), 0.1)]).unwrap();
    let expected = (0.7 * 1.0 + 0.1 * 3.0) / 0.8;
    assert!((partial - expected).abs() < 1e-12);
}

#[test]
fn test_blend_ignores_non_finite_and_zero_weight() {
    let v = weighted_blend(&[(Some(f64::NAN), 0.5), (Some(2.0), 0.0), (Some(-1.0), 0.3)]).unwrap();
    assert!((v + 1.0).abs() < 1e-12);
}

#[test]
fn test_blend_empty_is_none() {
    assert_eq!(weighted_blend(&[]), None);
    assert_eq!(weighted_blend(&[(None, 0.5), (None, 0.5)]), None);
}

#[test]
fn test_median_even_and_odd() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    assert_eq!(median(&[]), None);
}

#[test]
fn test_mean_and_max_abs() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    assert_eq!(mean(&[]), None);
    assert_eq!(max_abs([0.5, -2.5, 1.0]), Some(2.5));
    assert_eq!(max_abs(std::iter::empty()), None);
}
