use super::*;

#[test]
fn irect_min_max_roundtrip() {
    let r = IRect::from_min_max(10, 20, 30, 60);
    assert_eq!(r, IRect::new(10, 20, 20, 40));
    assert_eq!(r.max_x(), 30);
    assert_eq!(r.max_y(), 60);
    assert_eq!(r.area(), 800);
}

#[test]
fn zero_rect_is_empty() {
    assert!(IRect::ZERO.is_empty());
    assert_eq!(IRect::ZERO.area(), 0);
    assert!(IRect::new(5, 5, 10, 0).is_empty());
    assert!(!IRect::new(5, 5, 1, 1).is_empty());
}

#[test]
fn expanded_clamps_at_frame_edges() {
    let frame = FrameSize::new(100, 50);
    let r = IRect::new(0, 0, 10, 10).expanded(4, frame);
    assert_eq!(r, IRect::new(0, 0, 14, 14));

    let r = IRect::new(90, 40, 10, 10).expanded(4, frame);
    assert_eq!(r, IRect::new(86, 36, 14, 14));

    let r = IRect::new(40, 20, 10, 10).expanded(3, frame);
    assert_eq!(r, IRect::new(37, 17, 16, 16));
}

#[test]
fn frame_size_aspect_and_full_rect() {
    assert_eq!(FrameSize::ZERO.aspect(), None);
    assert_eq!(FrameSize::new(200, 100).aspect(), Some(2.0));
    assert_eq!(
        FrameSize::new(640, 480).full_rect(),
        IRect::new(0, 0, 640, 480)
    );
}

#[test]
fn rgb_components_must_be_in_unit_range() {
    assert!(Rgb::new(1.0, 0.5, 0.0).validate("color").is_ok());
    assert!(Rgb::new(f32::NAN, 0.5, 0.0).validate("color").is_err());
    assert!(Rgb::new(-0.1, 0.5, 0.0).validate("color").is_err());
    assert!(Rgb::new(0.0, 1.0, 0.0).validate("color").is_ok());
    assert!(Rgb::new(0.2, 1.01, 0.0).validate("color").is_err());
}
