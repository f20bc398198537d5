//! Screen-space selection outlines for a real-time 3D renderer.
//!
//! The effect is a fixed sequence of render jobs driven over an abstract [`GpuBackend`]:
//!
//! - Render the depth of each outline group's items into a shared mask depth buffer
//! - Composite an edge-detected outline of that mask onto the primary color target
//! - Optionally draw the raw mask depth for debugging
//!
//! Build an [`OutlineTask`], [`configure`](OutlineTask::configure) it with an
//! [`OutlineTaskConfig`], then call [`run`](OutlineTask::run) once per frame with the
//! frame's [`FrameInputs`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation;

pub(crate) mod gpu;
pub(crate) mod outline;
pub(crate) mod scene;

pub use crate::foundation::core::{FrameSize, IRect, Mat4, Rgb, Vec2, Vec3, Vec4};
pub use crate::foundation::error::{OutlineError, OutlineResult};

pub use crate::gpu::backend::{
    AlphaBlend, BufferHandle, CompareFunc, DepthTest, FramebufferDesc, FramebufferHandle,
    GpuBackend, PipelineDesc, PipelineHandle, PipelineState, PrimaryFramebuffer, TextureDesc,
    TextureFormat, TextureHandle,
};
pub use crate::gpu::batch::{Batch, BatchCommand, Primitive};
pub use crate::gpu::recording::{RecordingBackend, RecordingStats};

pub use crate::outline::config::{DebugOutlineConfig, OutlineConfig, OutlineTaskConfig};
pub use crate::outline::debug::{DEBUG_DEPTH_SLOT, DebugOutline};
pub use crate::outline::effect::{
    DrawOutline, FRAME_TRANSFORM_SLOT, OPACITY_EPSILON, OUTLINE_PARAMS_SLOT,
    OUTLINED_DEPTH_SLOT, OutlineEffectPipelines, OutlineParameters, SCENE_DEPTH_SLOT,
    blur_kernel_size, blur_pixel_width, is_filled, normalized_size,
};
pub use crate::outline::items::{
    FetchOutlineItems, SortOutlineShapes, gather_selection, sort_shapes,
};
pub use crate::outline::job::{FrameInputs, FrameStats, OutlineJob};
pub use crate::outline::mask::{DrawOutlineMask, compute_outline_rect, expand_rect};
pub use crate::outline::params::{MAX_OUTLINE_COUNT, SharedOutlineParameters};
pub use crate::outline::plumber::ShapePlumber;
pub use crate::outline::resources::{OutlineResources, OutlineTargets, PrepareOutline};
pub use crate::outline::shaders::{
    DEBUG_SOURCE_PLACEHOLDER, DEPTH_DEBUG_BODY, ShaderAssets, synthesize_debug_fragment,
};
pub use crate::outline::task::OutlineTask;

pub use crate::scene::bounds::{Aabb, ItemBound, ItemId, ShapeBounds, ShapeKey, item_count};
pub use crate::scene::frustum::ViewFrustum;
pub use crate::scene::store::{MemoryScene, OutlineScene};
