use crate::{
    foundation::core::{Mat4, Vec2, Vec4},
    foundation::error::{OutlineError, OutlineResult},
    gpu::backend::{DepthTest, GpuBackend, PipelineDesc, PipelineHandle, PipelineState},
    gpu::batch::Batch,
    outline::config::DebugOutlineConfig,
    outline::job::{FrameInputs, OutlineVaryings},
    outline::shaders::{DEPTH_DEBUG_BODY, ShaderAssets, synthesize_debug_fragment},
};

/// Texture slot the mask depth is bound to while drawing the debug quad.
pub const DEBUG_DEPTH_SLOT: u32 = 0;

/// Visualizes the mask depth buffer over the first group's rect.
#[derive(Debug)]
pub struct DebugOutline {
    name: String,
    pipeline: PipelineHandle,
    enabled: bool,
}

impl DebugOutline {
    /// Create the job and its pipeline. Fails with [`OutlineError::ShaderTemplate`] when the debug template has no placeholder.
    pub fn build(
        name: impl Into<String>,
        backend: &mut dyn GpuBackend,
        shaders: &ShaderAssets,
    ) -> OutlineResult<Self> {
        let fragment =
            synthesize_debug_fragment(&shaders.debug_fragment_template, DEPTH_DEBUG_BODY)?;
        let pipeline = backend.create_pipeline(&PipelineDesc {
            label: "outlineDebugDepth",
            vertex: shaders.debug_vertex.clone(),
            fragment,
            bindings: vec![("depthMap", DEBUG_DEPTH_SLOT)],
            state: PipelineState {
                depth: DepthTest::DISABLED,
                color_write: true,
                blend: None,
                scissor: true,
            },
        })?;
        Ok(Self {
            name: name.into(),
            pipeline,
            enabled: false,
        })
    }

    /// Job name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the mask view is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Debug pipeline handle.
    pub fn pipeline(&self) -> PipelineHandle {
        self.pipeline
    }

    /// Apply the debug switches.
    pub fn configure(&mut self, config: &DebugOutlineConfig) {
        self.enabled = config.view_mask;
    }

    pub(crate) fn run(
        &self,
        backend: &mut dyn GpuBackend,
        frame: &FrameInputs<'_>,
        varyings: &mut OutlineVaryings,
    ) -> OutlineResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let Some(targets) = varyings.targets else {
            return Ok(());
        };
        let rect = varyings.rects[0];
        if rect.is_empty() {
            tracing::trace!("debug view skipped: first group has no rect");
            return Ok(());
        }
        let frustum = frame.view_frustum.ok_or_else(|| {
            OutlineError::precondition("outline debug view requires a view frustum")
        })?;

        let mut batch = Batch::new(self.name.as_str());
        batch
            .set_viewport(frame.viewport)
            .set_scissor(rect)
            .set_projection(frustum.projection)
            .set_view(frustum.view)
            .set_model(Mat4::IDENTITY)
            .set_pipeline(self.pipeline)
            .set_texture(DEBUG_DEPTH_SLOT, Some(targets.depth_texture))
            .draw_quad(Vec2::splat(-1.0), Vec2::splat(1.0), Vec4::ONE)
            .set_texture(DEBUG_DEPTH_SLOT, None);
        backend.submit(batch)?;
        varyings.stats.debug_draws += 1;
        Ok(())
    }

    pub(crate) fn release(self, backend: &mut dyn GpuBackend) {
        backend.release_pipeline(self.pipeline);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/debug.rs"]
mod tests;
