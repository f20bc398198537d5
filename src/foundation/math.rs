use crate::foundation::core::{FrameSize, IRect, Mat4, Vec3};

/// Texture-coordinate transform mapping `[0, 1]²` onto `region` of a `surface`-sized target.
pub(crate) fn subregion_texcoord_transform(surface: FrameSize, region: IRect) -> Mat4 {
    if surface.is_empty() {
        return Mat4::IDENTITY;
    }
    let w = surface.width as f32;
    let h = surface.height as f32;
    let translate = Vec3::new(region.x as f32 / w, region.y as f32 / h, 0.0);
    let scale = Vec3::new(region.width as f32 / w, region.height as f32 / h, 1.0);
    Mat4::from_translation(translate) * Mat4::from_scale(scale)
}

/// Map a normalized-device coordinate in `[-1, 1]` to a pixel coordinate along an axis of
/// `extent` pixels.
pub(crate) fn ndc_to_pixel(ndc: f64, extent: i32) -> f64 {
    (ndc + 1.0) * (f64::from(extent) * 0.5)
}

/// `ceil(v)` as a non-negative pixel count; non-finite input maps to zero.
pub(crate) fn ceil_px(v: f32) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.ceil() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
