use std::rc::Rc;

use kurbo::Rect;

use crate::{
    foundation::core::{FrameSize, IRect},
    foundation::error::{OutlineError, OutlineResult},
    foundation::math::ndc_to_pixel,
    gpu::backend::GpuBackend,
    gpu::batch::Batch,
    outline::job::{FrameInputs, OutlineVaryings},
    outline::params::SharedOutlineParameters,
    outline::plumber::ShapePlumber,
    scene::bounds::{ShapeBounds, item_count},
    scene::frustum::ViewFrustum,
};

/// Depth value the mask buffer is cleared to before drawing.
const MASK_CLEAR_DEPTH: f32 = 1.0;

/// Pixel rectangle covered by the projected bounds of every item in `shapes`.
///
/// Items the frustum rejects do not contribute. Returns [`IRect::ZERO`] when nothing
/// projects on screen.
pub fn compute_outline_rect(
    shapes: &ShapeBounds,
    frustum: &ViewFrustum,
    frame: FrameSize,
) -> IRect {
    let mut ndc: Option<Rect> = None;
    for item in shapes.values().flatten() {
        if let Some(r) = frustum.projected_rect(&item.bound) {
            ndc = Some(ndc.map_or(r, |acc| acc.union(r)));
        }
    }
    let Some(ndc) = ndc else {
        return IRect::ZERO;
    };

    let w = frame.width_i32();
    let h = frame.height_i32();
    let to_px = |v: f64, extent: i32, round: fn(f64) -> f64| {
        (round(ndc_to_pixel(v, extent)) as i32).clamp(0, extent)
    };
    IRect::from_min_max(
        to_px(ndc.x0, w, f64::floor),
        to_px(ndc.y0, h, f64::floor),
        to_px(ndc.x1, w, f64::ceil),
        to_px(ndc.y1, h, f64::ceil),
    )
}

/// Grow `rect` by `amount` pixels per side, clamped to the frame.
pub fn expand_rect(rect: IRect, amount: i32, frame: FrameSize) -> IRect {
    rect.expanded(amount, frame)
}

/// Renders one group's items into the shared mask depth buffer and publishes the
/// group's on-screen rect.
#[derive(Debug)]
pub struct DrawOutlineMask {
    name: String,
    group: usize,
    plumber: ShapePlumber,
    shared: Rc<SharedOutlineParameters>,
}

impl DrawOutlineMask {
    /// Job for `group`, drawing with `plumber` and reading blur widths from `shared`.
    pub fn new(
        name: impl Into<String>,
        group: usize,
        plumber: ShapePlumber,
        shared: Rc<SharedOutlineParameters>,
    ) -> Self {
        Self {
            name: name.into(),
            group,
            plumber,
            shared,
        }
    }

    /// Job name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn run(
        &self,
        backend: &mut dyn GpuBackend,
        frame: &FrameInputs<'_>,
        varyings: &mut OutlineVaryings,
    ) -> OutlineResult<()> {
        let frustum = frame
            .view_frustum
            .ok_or_else(|| OutlineError::precondition("outline mask requires a view frustum"))?;

        varyings.rects[self.group] = IRect::ZERO;
        let shapes = &varyings.shapes[self.group];
        if item_count(shapes) == 0 {
            return Ok(());
        }
        let Some(targets) = varyings.targets else {
            tracing::trace!(group = self.group, "mask skipped: no outline buffers");
            return Ok(());
        };

        let size = targets.frame_size;
        let rect = compute_outline_rect(shapes, &frustum, size);
        if rect.is_empty() {
            tracing::trace!(group = self.group, "mask skipped: group is off screen");
            return Ok(());
        }

        let blur = self.shared.blur_pixel_width(self.group);
        let margin = i32::try_from(blur).unwrap_or(i32::MAX).saturating_add(1);
        let published = expand_rect(rect, margin, size);
        let scissor = expand_rect(published, margin, size);

        let mut batch = Batch::new(self.name.as_str());
        batch
            .set_scissor(scissor)
            .set_framebuffer(targets.depth_framebuffer)
            .clear_depth(MASK_CLEAR_DEPTH)
            .set_viewport(frame.viewport)
            .set_projection(frustum.projection)
            .set_view(frustum.view);

        let mut drawn = 0u32;
        for skinned in [false, true] {
            let mut bound = None;
            for (&key, items) in shapes.iter().filter(|(k, _)| k.is_skinned() == skinned) {
                if items.is_empty() {
                    continue;
                }
                let pipeline = self.plumber.pick(key);
                if bound != Some(pipeline) {
                    batch.set_pipeline(pipeline);
                    bound = Some(pipeline);
                }
                for item in items {
                    batch.draw_item(item.id);
                    drawn += 1;
                }
            }
        }

        backend.submit(batch)?;
        varyings.rects[self.group] = published;
        varyings.stats.mask_passes += 1;
        varyings.stats.items_drawn += drawn;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/mask.rs"]
mod tests;
