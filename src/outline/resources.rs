use crate::{
    foundation::core::FrameSize,
    foundation::error::{OutlineError, OutlineResult},
    gpu::backend::{
        FramebufferDesc, FramebufferHandle, GpuBackend, PrimaryFramebuffer, TextureDesc,
        TextureFormat, TextureHandle,
    },
};

/// Resource handles published to the jobs downstream of [`PrepareOutline`] for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutlineTargets {
    /// Depth-only framebuffer the mask passes render into.
    pub depth_framebuffer: FramebufferHandle,
    /// Depth attachment of `depth_framebuffer`.
    pub depth_texture: TextureHandle,
    /// Primary color attachment without depth; the composite target.
    pub color_framebuffer: FramebufferHandle,
    /// Size the buffers were allocated at.
    pub frame_size: FrameSize,
}

#[derive(Clone, Copy, Debug)]
struct DepthTarget {
    framebuffer: FramebufferHandle,
    texture: TextureHandle,
}

/// Auxiliary framebuffers sized to the primary framebuffer.
///
/// Both buffers are recreated together whenever the primary size changes; a buffer that
/// is missing at an unchanged size is recreated alone. Replaced objects are released
/// through the backend.
#[derive(Debug, Default)]
pub struct OutlineResources {
    frame_size: FrameSize,
    depth: Option<DepthTarget>,
    color: Option<FramebufferHandle>,
}

impl OutlineResources {
    /// No buffers allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the buffers in line with `primary`. Returns `true` when anything was
    /// (re)allocated.
    pub fn update(
        &mut self,
        backend: &mut dyn GpuBackend,
        primary: &PrimaryFramebuffer,
    ) -> OutlineResult<bool> {
        let new_size = primary.size;

        if self.frame_size != new_size {
            self.frame_size = new_size;
            self.release(backend);
            if new_size.is_empty() {
                tracing::debug!("primary framebuffer is empty, outline buffers released");
                return Ok(false);
            }
            self.allocate_depth_buffer(backend)?;
            self.allocate_color_buffer(backend, primary)?;
            tracing::debug!(
                width = new_size.width,
                height = new_size.height,
                "outline buffers reallocated"
            );
            return Ok(true);
        }

        if new_size.is_empty() {
            return Ok(false);
        }
        let mut allocated = false;
        if self.depth.is_none() {
            self.allocate_depth_buffer(backend)?;
            allocated = true;
        }
        if self.color.is_none() {
            self.allocate_color_buffer(backend, primary)?;
            allocated = true;
        }
        Ok(allocated)
    }

    fn allocate_depth_buffer(&mut self, backend: &mut dyn GpuBackend) -> OutlineResult<()> {
        let texture = backend.create_texture(&TextureDesc {
            label: "outlineDepthTexture",
            size: self.frame_size,
            format: TextureFormat::Depth32Float,
        })?;
        let framebuffer = match backend.create_framebuffer(&FramebufferDesc {
            label: "outlineDepth",
            color_attachments: Vec::new(),
            depth_attachment: Some(texture),
        }) {
            Ok(fb) => fb,
            Err(e) => {
                backend.release_texture(texture);
                return Err(e);
            }
        };
        self.depth = Some(DepthTarget {
            framebuffer,
            texture,
        });
        Ok(())
    }

    fn allocate_color_buffer(
        &mut self,
        backend: &mut dyn GpuBackend,
        primary: &PrimaryFramebuffer,
    ) -> OutlineResult<()> {
        let framebuffer = backend.create_framebuffer(&FramebufferDesc {
            label: "primaryWithoutDepth",
            color_attachments: vec![primary.color],
            depth_attachment: None,
        })?;
        self.color = Some(framebuffer);
        Ok(())
    }

    /// Size of the current buffers.
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    /// Mask depth framebuffer.
    pub fn depth_framebuffer(&self) -> OutlineResult<FramebufferHandle> {
        self.depth
            .map(|d| d.framebuffer)
            .ok_or_else(|| OutlineError::missing_resource("outline depth framebuffer"))
    }

    /// Mask depth texture.
    pub fn depth_texture(&self) -> OutlineResult<TextureHandle> {
        self.depth
            .map(|d| d.texture)
            .ok_or_else(|| OutlineError::missing_resource("outline depth texture"))
    }

    /// Color framebuffer over the primary color target.
    pub fn color_framebuffer(&self) -> OutlineResult<FramebufferHandle> {
        self.color
            .ok_or_else(|| OutlineError::missing_resource("outline color framebuffer"))
    }

    /// All handles at once.
    pub fn targets(&self) -> OutlineResult<OutlineTargets> {
        Ok(OutlineTargets {
            depth_framebuffer: self.depth_framebuffer()?,
            depth_texture: self.depth_texture()?,
            color_framebuffer: self.color_framebuffer()?,
            frame_size: self.frame_size,
        })
    }

    /// Free every owned GPU object. The color framebuffer only references the primary
    /// color texture, so that texture is left alone.
    pub fn release(&mut self, backend: &mut dyn GpuBackend) {
        if let Some(d) = self.depth.take() {
            backend.release_framebuffer(d.framebuffer);
            backend.release_texture(d.texture);
        }
        if let Some(c) = self.color.take() {
            backend.release_framebuffer(c);
        }
    }
}

/// Entry job: keeps [`OutlineResources`] current and publishes their handles.
#[derive(Debug)]
pub struct PrepareOutline {
    name: String,
    resources: OutlineResources,
}

impl PrepareOutline {
    /// Job with no buffers allocated yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: OutlineResources::new(),
        }
    }

    /// Job name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Managed buffers.
    pub fn resources(&self) -> &OutlineResources {
        &self.resources
    }

    /// Returns the published targets (absent for an empty primary framebuffer) and
    /// whether buffers were reallocated.
    pub fn run(
        &mut self,
        backend: &mut dyn GpuBackend,
        primary: &PrimaryFramebuffer,
    ) -> OutlineResult<(Option<OutlineTargets>, bool)> {
        let reallocated = self.resources.update(backend, primary)?;
        let targets = if primary.size.is_empty() {
            None
        } else {
            Some(self.resources.targets()?)
        };
        Ok((targets, reallocated))
    }

    /// Free the managed buffers.
    pub fn release(mut self, backend: &mut dyn GpuBackend) {
        self.resources.release(backend);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/resources.rs"]
mod tests;
