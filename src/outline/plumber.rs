use crate::{
    foundation::error::OutlineResult,
    gpu::backend::{DepthTest, GpuBackend, PipelineDesc, PipelineHandle, PipelineState},
    outline::shaders::ShaderAssets,
    scene::bounds::ShapeKey,
};

/// Pipeline selection table for the mask passes: one rigid and one skinned entry.
///
/// Built once by the task and copied into every mask job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapePlumber {
    rigid: PipelineHandle,
    skinned: PipelineHandle,
}

impl ShapePlumber {
    /// Depth-only state: LESS test with writes, no color, scissored.
    pub fn mask_state() -> PipelineState {
        PipelineState {
            depth: DepthTest::less_write(),
            color_write: false,
            blend: None,
            scissor: true,
        }
    }

    /// Create the rigid and skinned mask pipelines.
    pub fn build_mask(
        backend: &mut dyn GpuBackend,
        shaders: &ShaderAssets,
    ) -> OutlineResult<Self> {
        let rigid = backend.create_pipeline(&PipelineDesc {
            label: "outlineMask",
            vertex: shaders.mask_vertex.clone(),
            fragment: shaders.mask_fragment.clone(),
            bindings: Vec::new(),
            state: Self::mask_state(),
        })?;
        let skinned = match backend.create_pipeline(&PipelineDesc {
            label: "outlineMaskSkinned",
            vertex: shaders.mask_skinned_vertex.clone(),
            fragment: shaders.mask_fragment.clone(),
            bindings: Vec::new(),
            state: Self::mask_state(),
        }) {
            Ok(p) => p,
            Err(e) => {
                backend.release_pipeline(rigid);
                return Err(e);
            }
        };
        tracing::debug!(rigid = rigid.0, skinned = skinned.0, "mask pipelines created");
        Ok(Self { rigid, skinned })
    }

    /// Pipeline for items of `key`.
    pub fn pick(&self, key: ShapeKey) -> PipelineHandle {
        if key.is_skinned() {
            self.skinned
        } else {
            self.rigid
        }
    }

    /// Pipeline for rigid items.
    pub fn rigid(&self) -> PipelineHandle {
        self.rigid
    }

    /// Pipeline for skinned items.
    pub fn skinned(&self) -> PipelineHandle {
        self.skinned
    }

    /// Free both pipelines.
    pub fn release(self, backend: &mut dyn GpuBackend) {
        backend.release_pipeline(self.rigid);
        backend.release_pipeline(self.skinned);
    }
}
