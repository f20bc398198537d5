use std::rc::Rc;

use crate::{
    foundation::core::{FrameSize, Mat4},
    foundation::error::OutlineResult,
    foundation::math::{ceil_px, subregion_texcoord_transform},
    gpu::backend::{
        AlphaBlend, BufferHandle, DepthTest, GpuBackend, PipelineDesc, PipelineHandle,
        PipelineState,
    },
    gpu::batch::{Batch, Primitive},
    outline::config::OutlineConfig,
    outline::job::{FrameInputs, OutlineVaryings},
    outline::params::SharedOutlineParameters,
    outline::shaders::ShaderAssets,
};

/// Uniform slot of the [`OutlineParameters`] block.
pub const OUTLINE_PARAMS_SLOT: u32 = 0;
/// Uniform slot of the renderer's frame transform.
pub const FRAME_TRANSFORM_SLOT: u32 = 1;
/// Texture slot of the main scene depth.
pub const SCENE_DEPTH_SLOT: u32 = 0;
/// Texture slot of the outline mask depth.
pub const OUTLINED_DEPTH_SLOT: u32 = 1;

/// Fill opacities at or below this value count as "no fill".
pub const OPACITY_EPSILON: f32 = 5e-3;

const WIDTH_UNITS_PER_HEIGHT: f32 = 400.0;
const GLOW_THRESHOLD: f32 = 1.0;
const EDGE_THRESHOLD: f32 = 1e-3;

/// GPU-side parameter block for the composite pass (std140 compatible, 48 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutlineParameters {
    /// Outline color.
    pub color: [f32; 3],
    /// Intensity, doubled for glow.
    pub intensity: f32,
    /// Aspect-corrected outline size in UV units.
    pub size: [f32; 2],
    /// Blur taps, in `[2, 7]`.
    pub blur_kernel_size: i32,
    /// Edge threshold.
    pub threshold: f32,
    /// Fill opacity where the object is visible.
    pub unoccluded_fill_opacity: f32,
    /// Fill opacity where the object is hidden.
    pub occluded_fill_opacity: f32,
    /// Keeps the block a multiple of 16 bytes.
    pub _padding: [f32; 2],
}

/// Blur kernel taps for an outline `width`: `clamp(floor(width * 3 + 0.5), 2, 7)`.
pub fn blur_kernel_size(width: f32) -> i32 {
    ((width * 3.0 + 0.5).floor() as i32).clamp(2, 7)
}

/// Whether either fill opacity is visible.
pub fn is_filled(config: &OutlineConfig) -> bool {
    config.unoccluded_fill_opacity > OPACITY_EPSILON
        || config.occluded_fill_opacity > OPACITY_EPSILON
}

/// Outline width as a fraction of the frame height.
pub fn normalized_size(width: f32) -> f32 {
    width / WIDTH_UNITS_PER_HEIGHT
}

/// Blur radius in pixels for a normalized `size` on a `frame`.
pub fn blur_pixel_width(size: f32, frame: FrameSize) -> u32 {
    ceil_px(size * frame.height as f32)
}

impl OutlineParameters {
    /// Derive the block from a group style; `size` is not yet aspect-corrected.
    pub fn from_config(config: &OutlineConfig) -> Self {
        let size = normalized_size(config.width);
        let (intensity, threshold) = if config.glow {
            (config.intensity * 2.0, GLOW_THRESHOLD)
        } else {
            (config.intensity, EDGE_THRESHOLD)
        };
        Self {
            color: config.color.to_array(),
            intensity,
            size: [size, size],
            blur_kernel_size: blur_kernel_size(config.width),
            threshold,
            unoccluded_fill_opacity: config.unoccluded_fill_opacity,
            occluded_fill_opacity: config.occluded_fill_opacity,
            _padding: [0.0; 2],
        }
    }
}

/// Composite pipelines: plain edge and edge plus fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutlineEffectPipelines {
    /// Edge-only variant.
    pub edge: PipelineHandle,
    /// Edge plus fill variant.
    pub filled: PipelineHandle,
}

impl OutlineEffectPipelines {
    /// Depth test off, alpha blending, scissored.
    pub fn composite_state() -> PipelineState {
        PipelineState {
            depth: DepthTest::DISABLED,
            color_write: true,
            blend: Some(AlphaBlend),
            scissor: true,
        }
    }

    /// Create both variants.
    pub fn build(backend: &mut dyn GpuBackend, shaders: &ShaderAssets) -> OutlineResult<Self> {
        let bindings = vec![
            ("outlineParamsBuffer", OUTLINE_PARAMS_SLOT),
            ("deferredFrameTransformBuffer", FRAME_TRANSFORM_SLOT),
            ("sceneDepthMap", SCENE_DEPTH_SLOT),
            ("outlinedDepthMap", OUTLINED_DEPTH_SLOT),
        ];
        let edge = backend.create_pipeline(&PipelineDesc {
            label: "outlineEdge",
            vertex: shaders.viewport_quad_vertex.clone(),
            fragment: shaders.outline_fragment.clone(),
            bindings: bindings.clone(),
            state: Self::composite_state(),
        })?;
        let filled = match backend.create_pipeline(&PipelineDesc {
            label: "outlineFilled",
            vertex: shaders.viewport_quad_vertex.clone(),
            fragment: shaders.outline_filled_fragment.clone(),
            bindings,
            state: Self::composite_state(),
        }) {
            Ok(p) => p,
            Err(e) => {
                backend.release_pipeline(edge);
                return Err(e);
            }
        };
        tracing::debug!(edge = edge.0, filled = filled.0, "outline composite pipelines created");
        Ok(Self { edge, filled })
    }

    /// Variant for a filled or edge-only style.
    pub fn pick(&self, filled: bool) -> PipelineHandle {
        if filled { self.filled } else { self.edge }
    }

    /// Free both pipelines.
    pub fn release(self, backend: &mut dyn GpuBackend) {
        backend.release_pipeline(self.edge);
        backend.release_pipeline(self.filled);
    }
}

/// Composites one group's mask depth onto the primary color target.
#[derive(Debug)]
pub struct DrawOutline {
    name: String,
    group: usize,
    shared: Rc<SharedOutlineParameters>,
    pipelines: OutlineEffectPipelines,
    params_buffer: BufferHandle,
    parameters: OutlineParameters,
    size: f32,
    frame_size: FrameSize,
    filled: bool,
    dirty: bool,
}

impl DrawOutline {
    /// Create the job together with its uniform buffer.
    pub fn build(
        name: impl Into<String>,
        group: usize,
        backend: &mut dyn GpuBackend,
        pipelines: OutlineEffectPipelines,
        shared: Rc<SharedOutlineParameters>,
    ) -> OutlineResult<Self> {
        let params_buffer = backend.create_uniform_buffer(
            "outlineParamsBuffer",
            std::mem::size_of::<OutlineParameters>(),
        )?;
        let config = OutlineConfig::default();
        let mut job = Self {
            name: name.into(),
            group,
            shared,
            pipelines,
            params_buffer,
            parameters: OutlineParameters::from_config(&config),
            size: normalized_size(config.width),
            frame_size: FrameSize::ZERO,
            filled: is_filled(&config),
            dirty: true,
        };
        job.update_size();
        Ok(job)
    }

    /// Job name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outline group this job composites.
    pub fn group(&self) -> usize {
        self.group
    }

    /// Current parameter block.
    pub fn parameters(&self) -> &OutlineParameters {
        &self.parameters
    }

    /// Whether the filled variant is selected.
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Uniform buffer holding the parameter block.
    pub fn params_buffer(&self) -> BufferHandle {
        self.params_buffer
    }

    /// Apply a group style and republish the blur width.
    pub fn configure(&mut self, config: &OutlineConfig) {
        self.parameters = OutlineParameters::from_config(config);
        self.size = normalized_size(config.width);
        self.filled = is_filled(config);
        self.update_size();
        self.dirty = true;
    }

    /// Aspect-correct the size vector for the last seen frame and publish the blur width.
    fn update_size(&mut self) {
        let x = match self.frame_size.aspect() {
            Some(aspect) => self.size / aspect,
            None => self.size,
        };
        self.parameters.size = [x, self.size];
        self.shared
            .set_blur_pixel_width(self.group, blur_pixel_width(self.size, self.frame_size));
    }

    pub(crate) fn run(
        &mut self,
        backend: &mut dyn GpuBackend,
        frame: &FrameInputs<'_>,
        varyings: &mut OutlineVaryings,
    ) -> OutlineResult<()> {
        let rect = varyings.rects[self.group];
        if rect.is_empty() {
            return Ok(());
        }
        let Some(targets) = varyings.targets else {
            tracing::trace!(group = self.group, "composite skipped: no outline buffers");
            return Ok(());
        };
        let Some(scene_depth) = frame.scene_depth else {
            tracing::trace!(group = self.group, "composite skipped: no scene depth");
            return Ok(());
        };

        if self.frame_size != targets.frame_size {
            self.frame_size = targets.frame_size;
            self.update_size();
            self.dirty = true;
        }
        if self.dirty {
            backend.write_buffer(self.params_buffer, bytemuck::bytes_of(&self.parameters))?;
            self.dirty = false;
        }

        let mut batch = Batch::new(self.name.as_str());
        batch
            .set_framebuffer(targets.color_framebuffer)
            .set_viewport(frame.viewport)
            .set_projection(Mat4::IDENTITY)
            .set_view(Mat4::IDENTITY)
            .set_model(subregion_texcoord_transform(
                targets.frame_size,
                frame.viewport,
            ))
            .set_pipeline(self.pipelines.pick(self.filled))
            .set_scissor(rect)
            .set_uniform_buffer(OUTLINE_PARAMS_SLOT, self.params_buffer)
            .set_uniform_buffer(FRAME_TRANSFORM_SLOT, frame.frame_transform)
            .set_texture(SCENE_DEPTH_SLOT, Some(scene_depth))
            .set_texture(OUTLINED_DEPTH_SLOT, Some(targets.depth_texture))
            .draw(Primitive::TriangleStrip, 4);
        backend.submit(batch)?;
        varyings.stats.composite_passes += 1;
        Ok(())
    }

    pub(crate) fn release(self, backend: &mut dyn GpuBackend) {
        backend.release_buffer(self.params_buffer);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/effect.rs"]
mod tests;
