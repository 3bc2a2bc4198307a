use super::*;
use crate::foundation::core::Dims;

fn dot(width: usize, height: usize, frames: usize) -> Mask {
    let dims = Dims::new(width, height);
    let mut frame = MaskFrame::empty(dims);
    frame.set(width / 2, height / 2, true);
    Mask::repeat(frame, frames).unwrap()
}

#[test]
fn quality_validates_range() {
    assert!(Quality::new(-0.1).is_err());
    assert!(Quality::new(1.5).is_err());
    assert!(Quality::new(f64::NAN).is_err());
    assert!(Quality::new(0.0).unwrap().is_square());
    assert!(!Quality::new(0.25).unwrap().is_square());
}

#[test]
fn quality_trades_radius_for_iterations() {
    let q = Quality::new(0.25).unwrap();
    assert_eq!(q.iterations(), 4);
    assert_eq!(q.kernel_radius(8.0), 2);
    assert_eq!(q.kernel_radius(1.0), 0);
    assert_eq!(q.shape(KernelShape::Circle), KernelShape::Circle);

    let q = Quality::new(0.15).unwrap();
    assert_eq!(q.iterations(), 7);

    let q = Quality::new(1e-9).unwrap();
    assert_eq!(q.iterations(), 1);
    assert_eq!(q.kernel_radius(6.4), 6);
    assert_eq!(q.shape(KernelShape::Circle), KernelShape::Square);
}

#[test]
fn first_frame_of_center_dot_is_radius_one_disk() {
    let out = grow(&dot(3, 3, 3), 1, 0, 3, Quality::FULL).unwrap();
    assert_eq!(out.len(), 3);
    let expected = [false, true, false, true, true, true, false, true, false];
    assert_eq!(out.frame(0).unwrap().cells(), &expected);
    assert!(out.frame(1).unwrap().is_full());
    assert!(out.frame(2).unwrap().is_full());
}

#[test]
fn saturation_fills_every_later_frame() {
    let (out, report) =
        grow_with_report(&dot(5, 5, 6), 1, 0, 6, &GrowOptions::default()).unwrap();
    assert_eq!(report.saturated_at, Some(2));
    assert!(!out.frame(1).unwrap().is_full());
    assert!(out.frames()[2..].iter().all(MaskFrame::is_full));
    // Kernels for radii 1, 2 and 3 only.
    assert_eq!(report.kernels_built, 3);
}

#[test]
fn frames_before_start_are_empty_or_source() {
    let mask = dot(7, 7, 4);
    let out = grow(&mask, 1, 2, 4, Quality::FULL).unwrap();
    assert!(out.frame(0).unwrap().is_empty());
    assert!(out.frame(1).unwrap().is_empty());
    assert_eq!(out.frame(2).unwrap().count(), 5);

    let opts = GrowOptions {
        pre_roll: PreRoll::Source,
        ..GrowOptions::default()
    };
    let (out, _) = grow_with_report(&mask, 1, 2, 4, &opts).unwrap();
    assert_eq!(out.frame(0).unwrap(), mask.frame(0).unwrap());
}

#[test]
fn reduced_quality_iterates_smaller_kernel() {
    // Logical radius 2 at q = 0.5 is a radius-1 disk applied twice: a diamond of 13 cells.
    let q = Quality::new(0.5).unwrap();
    let out = grow(&dot(7, 7, 1), 2, 0, 1, q).unwrap();
    let frame = out.frame(0).unwrap();
    assert_eq!(frame.count(), 13);
    assert!(frame.get(3, 1));
    assert!(!frame.get(2, 1));
}

#[test]
fn zero_quality_uses_square_kernels_only() {
    let opts = GrowOptions {
        quality: Quality::new(0.0).unwrap(),
        ..GrowOptions::default()
    };
    let (out, report) = grow_with_report(&dot(9, 9, 2), 1, 0, 2, &opts).unwrap();
    assert_eq!(report.shape, KernelShape::Square);
    assert_eq!(out.frame(0).unwrap().count(), 9);
    assert_eq!(out.frame(1).unwrap().count(), 25);
}

#[test]
fn zero_speed_leaves_source_unchanged() {
    let mask = dot(5, 5, 3);
    let out = grow(&mask, 0, 0, 3, Quality::FULL).unwrap();
    assert_eq!(out, mask);
}

#[test]
fn more_output_frames_than_source_reuse_last_frame() {
    let out = grow(&dot(9, 9, 1), 1, 0, 3, Quality::FULL).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.frame(2).unwrap().count() > out.frame(1).unwrap().count());
}

#[test]
fn grow_rejects_zero_frames() {
    assert!(matches!(
        grow(&dot(3, 3, 1), 1, 0, 0, Quality::FULL),
        Err(MaskError::Range(_))
    ));
}

#[test]
fn follow_skips_non_positive_and_missing_radii() {
    let mask = dot(9, 9, 4);
    let out = follow(&mask, &[0.0, 1.7, -2.0], KernelShape::Circle).unwrap();
    assert_eq!(out.frame(0).unwrap(), mask.frame(0).unwrap());
    assert_eq!(out.frame(1).unwrap().count(), 5);
    assert_eq!(out.frame(2).unwrap(), mask.frame(2).unwrap());
    assert_eq!(out.frame(3).unwrap(), mask.frame(3).unwrap());
}
