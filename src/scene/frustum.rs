use kurbo::{Point, Rect};

use crate::{
    foundation::core::{Mat4, Vec3, Vec4},
    scene::bounds::{AABB_EDGES, Aabb},
};

/// Clip-space `w` below which a point is treated as behind the eye.
const NEAR_W: f32 = 1e-5;

/// Visible NDC square.
const NDC_SQUARE: Rect = Rect::new(-1.0, -1.0, 1.0, 1.0);

/// Camera used to render the current frame.
///
/// Clip space follows the GL convention: a point is visible when
/// `-w <= x, y, z <= w`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewFrustum {
    /// World → eye transform.
    pub view: Mat4,
    /// Eye → clip transform.
    pub projection: Mat4,
}

impl ViewFrustum {
    /// Frustum from view and projection matrices.
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// `projection * view`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Distance in front of the eye along the view direction (eye looks down `-Z`).
    pub fn view_depth(&self, world: Vec3) -> f32 {
        -self.view.transform_point3(world).z
    }

    /// Screen-space NDC rectangle covered by `aabb`, clipped to `[-1, 1]²`.
    ///
    /// Returns `None` when the box lies entirely outside one of the frustum planes or
    /// entirely behind the eye. Boxes straddling the eye plane are clipped against it
    /// before projection, so the result stays conservative.
    pub fn projected_rect(&self, aabb: &Aabb) -> Option<Rect> {
        let vp = self.view_projection();
        let clip: [Vec4; 8] = aabb.corners().map(|c| vp * c.extend(1.0));

        let planes: [fn(Vec4) -> bool; 6] = [
            |p| p.x < -p.w,
            |p| p.x > p.w,
            |p| p.y < -p.w,
            |p| p.y > p.w,
            |p| p.z < -p.w,
            |p| p.z > p.w,
        ];
        for outside in planes {
            if clip.iter().all(|&p| outside(p)) {
                return None;
            }
        }

        let mut bounds: Option<Rect> = None;
        let mut add = |p: Vec4| {
            let ndc = Point::new(f64::from(p.x / p.w), f64::from(p.y / p.w));
            bounds = Some(match bounds {
                Some(r) => r.union_pt(ndc),
                None => Rect::from_points(ndc, ndc),
            });
        };

        for &p in &clip {
            if p.w > NEAR_W {
                add(p);
            }
        }
        for (a, b) in AABB_EDGES {
            let (pa, pb) = (clip[a], clip[b]);
            if (pa.w > NEAR_W) != (pb.w > NEAR_W) {
                let t = (NEAR_W - pa.w) / (pb.w - pa.w);
                add(pa.lerp(pb, t));
            }
        }

        let r = bounds?;
        if r.x1 < NDC_SQUARE.x0
            || r.x0 > NDC_SQUARE.x1
            || r.y1 < NDC_SQUARE.y0
            || r.y0 > NDC_SQUARE.y1
        {
            return None;
        }
        Some(r.intersect(NDC_SQUARE))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/frustum.rs"]
mod tests;
