use super::*;
use crate::foundation::core::Vec4;

#[test]
fn subregion_of_full_viewport_is_identity() {
    let size = FrameSize::new(800, 600);
    let m = subregion_texcoord_transform(size, size.full_rect());
    assert_eq!(m, Mat4::IDENTITY);
}

#[test]
fn subregion_maps_unit_square_onto_region() {
    let size = FrameSize::new(200, 100);
    let m = subregion_texcoord_transform(size, IRect::new(100, 50, 100, 50));
    let p = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert_eq!((p.x, p.y), (0.5, 0.5));
    let p = m * Vec4::new(1.0, 1.0, 0.0, 1.0);
    assert_eq!((p.x, p.y), (1.0, 1.0));
}

#[test]
fn ndc_to_pixel_spans_extent() {
    assert_eq!(ndc_to_pixel(-1.0, 640), 0.0);
    assert_eq!(ndc_to_pixel(0.0, 640), 320.0);
    assert_eq!(ndc_to_pixel(1.0, 640), 640.0);
}

#[test]
fn ceil_px_handles_degenerate_values() {
    assert_eq!(ceil_px(0.0), 0);
    assert_eq!(ceil_px(-3.0), 0);
    assert_eq!(ceil_px(f32::NAN), 0);
    assert_eq!(ceil_px(2.01), 3);
    assert_eq!(ceil_px(3.0), 3);
}
