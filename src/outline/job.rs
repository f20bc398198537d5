use crate::{
    foundation::core::IRect,
    foundation::error::OutlineResult,
    gpu::backend::{BufferHandle, GpuBackend, PrimaryFramebuffer, TextureHandle},
    outline::{
        config::OutlineTaskConfig,
        debug::DebugOutline,
        effect::DrawOutline,
        items::{FetchOutlineItems, SortOutlineShapes},
        mask::DrawOutlineMask,
        params::MAX_OUTLINE_COUNT,
        resources::{OutlineTargets, PrepareOutline},
    },
    scene::bounds::{ItemBound, ShapeBounds, ShapeKey},
    scene::frustum::ViewFrustum,
    scene::store::OutlineScene,
};

/// Per-frame inputs supplied by the renderer.
#[derive(Clone, Copy)]
pub struct FrameInputs<'a> {
    /// Primary render target.
    pub primary: PrimaryFramebuffer,
    /// Depth texture of the main scene pass; compositing is skipped without it.
    pub scene_depth: Option<TextureHandle>,
    /// Uniform buffer holding the renderer's frame transform.
    pub frame_transform: BufferHandle,
    /// Camera of the frame; required when any group has items.
    pub view_frustum: Option<ViewFrustum>,
    /// Viewport in primary framebuffer pixels.
    pub viewport: IRect,
    /// Scene queried for selections and bounds.
    pub scene: &'a dyn OutlineScene,
}

impl std::fmt::Debug for FrameInputs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameInputs")
            .field("primary", &self.primary)
            .field("scene_depth", &self.scene_depth)
            .field("frame_transform", &self.frame_transform)
            .field("view_frustum", &self.view_frustum)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters for one [`OutlineTask::run`](crate::OutlineTask::run).
pub struct FrameStats {
    /// Outline buffers were (re)allocated this frame.
    pub resources_reallocated: bool,
    /// Mask batches submitted.
    pub mask_passes: u32,
    /// Composite batches submitted.
    pub composite_passes: u32,
    /// Debug quads drawn.
    pub debug_draws: u32,
    /// Items drawn into the mask across all groups.
    pub items_drawn: u32,
}

/// Data handed from one job to the next within a frame.
#[derive(Debug, Default)]
pub(crate) struct OutlineVaryings {
    pub targets: Option<OutlineTargets>,
    pub fetched: [Vec<(ShapeKey, ItemBound)>; MAX_OUTLINE_COUNT],
    pub shapes: [ShapeBounds; MAX_OUTLINE_COUNT],
    pub rects: [IRect; MAX_OUTLINE_COUNT],
    pub stats: FrameStats,
}

impl OutlineVaryings {
    pub fn reset(&mut self) {
        self.targets = None;
        for v in &mut self.fetched {
            v.clear();
        }
        for s in &mut self.shapes {
            s.clear();
        }
        self.rects = [IRect::ZERO; MAX_OUTLINE_COUNT];
        self.stats = FrameStats::default();
    }
}

/// One step of the outline task, run once per frame in declaration order.
#[derive(Debug)]
pub enum OutlineJob {
    /// Resource update.
    Prepare(PrepareOutline),
    /// Selection gather.
    FetchItems(FetchOutlineItems),
    /// Bucketing and depth sort.
    Sort(SortOutlineShapes),
    /// Mask depth pass.
    Mask(DrawOutlineMask),
    /// Composite pass.
    Effect(DrawOutline),
    /// Mask depth visualization.
    Debug(DebugOutline),
}

impl OutlineJob {
    /// Job name as declared by the task.
    pub fn name(&self) -> &str {
        match self {
            Self::Prepare(j) => j.name(),
            Self::FetchItems(j) => j.name(),
            Self::Sort(j) => j.name(),
            Self::Mask(j) => j.name(),
            Self::Effect(j) => j.name(),
            Self::Debug(j) => j.name(),
        }
    }

    pub(crate) fn configure(&mut self, config: &OutlineTaskConfig) {
        match self {
            Self::Effect(j) => j.configure(&config.group(j.group())),
            Self::Debug(j) => j.configure(&config.debug),
            Self::Prepare(_) | Self::FetchItems(_) | Self::Sort(_) | Self::Mask(_) => {}
        }
    }

    pub(crate) fn run(
        &mut self,
        backend: &mut dyn GpuBackend,
        frame: &FrameInputs<'_>,
        varyings: &mut OutlineVaryings,
    ) -> OutlineResult<()> {
        match self {
            Self::Prepare(j) => {
                let (targets, reallocated) = j.run(backend, &frame.primary)?;
                varyings.targets = targets;
                varyings.stats.resources_reallocated |= reallocated;
                Ok(())
            }
            Self::FetchItems(j) => {
                j.run(frame.scene, varyings);
                Ok(())
            }
            Self::Sort(j) => j.run(frame, varyings),
            Self::Mask(j) => j.run(backend, frame, varyings),
            Self::Effect(j) => j.run(backend, frame, varyings),
            Self::Debug(j) => j.run(backend, frame, varyings),
        }
    }

    /// Free GPU objects owned by this job alone.
    pub(crate) fn release(self, backend: &mut dyn GpuBackend) {
        match self {
            Self::Prepare(j) => j.release(backend),
            Self::Effect(j) => j.release(backend),
            Self::Debug(j) => j.release(backend),
            Self::FetchItems(_) | Self::Sort(_) | Self::Mask(_) => {}
        }
    }
}
