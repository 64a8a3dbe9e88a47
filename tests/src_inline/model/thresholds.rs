use super::*;

#[test]
fn test_severity_boundaries() {
    assert_eq!(Severity::from_score(2.0), Severity::Significant);
    assert_eq!(Severity::from_score(1.999_999), Severity::Mild);
    assert_eq!(Severity::from_score(1.0), Severity::Mild);
    assert_eq!(Severity::from_score(0.999_999), Severity::Normal);
    assert_eq!(Severity::from_score(0.0), Severity::Normal);
}

#[test]
fn test_category_boundaries() {
    assert_eq!(Category::from_sigma(0.5), Category::Overactive);
    assert_eq!(Category::from_sigma(0.49999), Category::Stable);
    assert_eq!(Category::from_sigma(-0.5), Category::Underactive);
    assert_eq!(Category::from_sigma(-0.49999), Category::Stable);
}

#[test]
fn test_normal_renders_as_stable() {
    assert_eq!(Severity::Normal.label(), "Stable");
    assert_eq!(Severity::Normal.as_str(), "normal");
}
