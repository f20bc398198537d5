use crate::{
    foundation::core::FrameSize,
    foundation::error::OutlineResult,
    gpu::batch::Batch,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Backend-issued identifier for a texture.
pub struct TextureHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Backend-issued identifier for a framebuffer.
pub struct FramebufferHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Backend-issued identifier for a compiled pipeline.
pub struct PipelineHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Backend-issued identifier for a uniform buffer.
pub struct BufferHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Texel formats the outline passes allocate.
pub enum TextureFormat {
    /// Single-channel 32-bit float depth.
    Depth32Float,
    /// 8-bit RGBA color.
    Rgba8Unorm,
}

impl TextureFormat {
    /// `true` for depth formats.
    pub fn is_depth(self) -> bool {
        matches!(self, Self::Depth32Float)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Render-buffer texture declaration.
pub struct TextureDesc {
    /// Debug label.
    pub label: &'static str,
    /// Texel dimensions; must not be empty.
    pub size: FrameSize,
    /// Texel format.
    pub format: TextureFormat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Framebuffer declaration: color attachments by slot plus an optional depth attachment.
///
/// Attachments are references; a framebuffer never owns the pixel storage of the textures
/// it points to.
pub struct FramebufferDesc {
    /// Debug label.
    pub label: &'static str,
    /// Color attachments, indexed by slot.
    pub color_attachments: Vec<TextureHandle>,
    /// Optional depth attachment.
    pub depth_attachment: Option<TextureHandle>,
}

/// The frame's primary render target, owned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimaryFramebuffer {
    /// The primary framebuffer itself.
    pub framebuffer: FramebufferHandle,
    /// Color attachment at slot 0.
    pub color: TextureHandle,
    /// Current size of the primary target.
    pub size: FrameSize,
}

/// Depth comparison used by the depth test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareFunc {
    /// Pass when the incoming depth is smaller.
    Less,
    /// Pass when the incoming depth is smaller or equal.
    LessEqual,
    /// Always pass.
    Always,
}

/// Depth test and depth write state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DepthTest {
    /// Whether the depth test runs.
    pub enabled: bool,
    /// Whether passing fragments write depth.
    pub write: bool,
    /// Comparison applied when enabled.
    pub func: CompareFunc,
}

impl DepthTest {
    /// No test, no writes.
    pub const DISABLED: Self = Self {
        enabled: false,
        write: false,
        func: CompareFunc::Always,
    };

    /// `LESS` test with depth writes.
    pub fn less_write() -> Self {
        Self {
            enabled: true,
            write: true,
            func: CompareFunc::Less,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Standard `src_alpha, 1 - src_alpha` additive blending.
pub struct AlphaBlend;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Fixed-function state attached to a pipeline.
pub struct PipelineState {
    /// Depth state.
    pub depth: DepthTest,
    /// Whether color channels are written.
    pub color_write: bool,
    /// Blending; `None` replaces the destination.
    pub blend: Option<AlphaBlend>,
    /// Whether the bound scissor rect clips fragments.
    pub scissor: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Shader program + state used to create a pipeline.
pub struct PipelineDesc {
    /// Debug label.
    pub label: &'static str,
    /// Vertex stage source.
    pub vertex: String,
    /// Fragment stage source.
    pub fragment: String,
    /// Named resource bindings: `(shader name, slot)`.
    pub bindings: Vec<(&'static str, u32)>,
    /// Fixed-function state.
    pub state: PipelineState,
}

/// GPU abstraction the outline jobs drive.
///
/// Implementations own the real device objects. All creation calls return opaque handles;
/// the recorded [`Batch`] refers to them and is executed in submission order.
pub trait GpuBackend {
    /// Allocate a render-buffer texture.
    fn create_texture(&mut self, desc: &TextureDesc) -> OutlineResult<TextureHandle>;

    /// Create a framebuffer referencing existing textures.
    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> OutlineResult<FramebufferHandle>;

    /// Compile a pipeline.
    fn create_pipeline(&mut self, desc: &PipelineDesc) -> OutlineResult<PipelineHandle>;

    /// Allocate a zeroed uniform buffer of `size` bytes.
    fn create_uniform_buffer(
        &mut self,
        label: &'static str,
        size: usize,
    ) -> OutlineResult<BufferHandle>;

    /// Overwrite the whole contents of a uniform buffer.
    fn write_buffer(&mut self, buffer: BufferHandle, bytes: &[u8]) -> OutlineResult<()>;

    /// Free a texture. Unknown handles are ignored.
    fn release_texture(&mut self, texture: TextureHandle);

    /// Free a framebuffer without touching its attachments.
    fn release_framebuffer(&mut self, framebuffer: FramebufferHandle);

    /// Free a pipeline.
    fn release_pipeline(&mut self, pipeline: PipelineHandle);

    /// Free a uniform buffer.
    fn release_buffer(&mut self, buffer: BufferHandle);

    /// Execute a recorded command batch.
    fn submit(&mut self, batch: Batch) -> OutlineResult<()>;
}
