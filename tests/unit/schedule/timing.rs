use super::*;

#[test]
fn frame_mode_truncates() {
    assert_eq!(TimingMode::Frame.resolve_start(3.7, 10).unwrap(), 3);
    assert_eq!(TimingMode::Frame.resolve_span(2.0, 10).unwrap(), 2);
}

#[test]
fn percent_mode_offsets_start_but_not_span() {
    assert_eq!(TimingMode::Percent.resolve_start(0.25, 100).unwrap(), 24);
    assert_eq!(TimingMode::Percent.resolve_start(0.0, 100).unwrap(), 0);
    assert_eq!(TimingMode::Percent.resolve_span(0.25, 100).unwrap(), 25);
}

#[test]
fn rejects_negative_and_non_finite() {
    assert!(TimingMode::Frame.resolve_start(-1.0, 10).is_err());
    assert!(TimingMode::Percent.resolve_span(f64::NAN, 10).is_err());
}

#[test]
fn names_parse() {
    assert_eq!("Percent".parse::<TimingMode>().unwrap(), TimingMode::Percent);
    assert_eq!("frame".parse::<TimingMode>().unwrap(), TimingMode::Frame);
    assert!("seconds".parse::<TimingMode>().is_err());
    assert_eq!(TimingMode::Percent.to_string(), "percent");
}
