use super::*;

#[test]
fn from_values_treats_positive_as_foreground() {
    let dims = Dims::new(2, 2);
    let f = MaskFrame::from_values(dims, &[0.0, 1.0, 0.5, -1.0]).unwrap();
    assert!(!f.get(0, 0));
    assert!(f.get(1, 0));
    assert!(f.get(0, 1));
    assert!(!f.get(1, 1));
    assert_eq!(f.count(), 2);
}

#[test]
fn from_cells_rejects_wrong_length() {
    let err = MaskFrame::from_cells(Dims::new(3, 3), vec![true; 8]).unwrap_err();
    assert!(matches!(err, MaskError::Shape(_)));
}

#[test]
fn saturation_and_emptiness() {
    let dims = Dims::new(3, 2);
    assert!(MaskFrame::full(dims).is_full());
    assert!(MaskFrame::empty(dims).is_empty());
    let mut f = MaskFrame::empty(dims);
    f.set(2, 1, true);
    assert!(!f.is_empty());
    assert!(!f.is_full());
    assert_eq!(f.row(1), &[false, false, true]);
}

#[test]
fn out_of_bounds_access_is_background() {
    let mut f = MaskFrame::empty(Dims::new(2, 2));
    f.set(5, 5, true);
    assert!(!f.get(5, 5));
    assert!(f.is_empty());
}

#[test]
fn mask_requires_uniform_frames() {
    let err = Mask::new(vec![
        MaskFrame::empty(Dims::new(2, 2)),
        MaskFrame::empty(Dims::new(3, 2)),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("frame 1"));
    assert!(Mask::new(Vec::new()).is_err());
}

#[test]
fn mask_from_flat_buffer() {
    let dims = Dims::new(2, 1);
    let m = Mask::from_values(3, dims, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
    assert_eq!(m.len(), 3);
    assert!(m.frame(0).unwrap().get(0, 0));
    assert!(m.frame(1).unwrap().get(1, 0));
    assert!(m.frame(2).unwrap().is_full());
    assert!(Mask::from_values(3, dims, &[1.0; 5]).is_err());
}

#[test]
fn frame_or_last_holds_final_frame() {
    let dims = Dims::new(1, 1);
    let m = Mask::new(vec![MaskFrame::empty(dims), MaskFrame::full(dims)]).unwrap();
    assert!(m.frame_or_last(10).unwrap().is_full());
    assert!(m.frame_or_last(0).unwrap().is_empty());
}
