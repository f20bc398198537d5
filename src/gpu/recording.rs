use std::collections::BTreeMap;

use crate::{
    foundation::core::FrameSize,
    foundation::error::{OutlineError, OutlineResult},
    gpu::backend::{
        BufferHandle, FramebufferDesc, FramebufferHandle, GpuBackend, PipelineDesc,
        PipelineHandle, PrimaryFramebuffer, TextureDesc, TextureFormat, TextureHandle,
    },
    gpu::batch::{Batch, BatchCommand},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Object counters kept by [`RecordingBackend`].
pub struct RecordingStats {
    /// Textures created.
    pub textures_created: u32,
    /// Framebuffers created.
    pub framebuffers_created: u32,
    /// Pipelines created.
    pub pipelines_created: u32,
    /// Uniform buffers created.
    pub buffers_created: u32,
    /// Successful buffer writes.
    pub buffer_writes: u32,
    /// Objects released, of any kind.
    pub released: u32,
}

/// Headless [`GpuBackend`] that records every request instead of touching a device.
///
/// Submitted batches are validated against the live object tables, so a batch that
/// refers to a released or never-created handle is rejected.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    textures: BTreeMap<TextureHandle, TextureDesc>,
    framebuffers: BTreeMap<FramebufferHandle, FramebufferDesc>,
    pipelines: BTreeMap<PipelineHandle, PipelineDesc>,
    buffers: BTreeMap<BufferHandle, Vec<u8>>,
    submitted: Vec<Batch>,
    stats: RecordingStats,
}

impl RecordingBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Create a color texture and a framebuffer around it, standing in for the caller's
    /// main render target.
    pub fn create_primary(&mut self, size: FrameSize) -> OutlineResult<PrimaryFramebuffer> {
        let color = self.create_texture(&TextureDesc {
            label: "primaryColor",
            size,
            format: TextureFormat::Rgba8Unorm,
        })?;
        let framebuffer = self.create_framebuffer(&FramebufferDesc {
            label: "primary",
            color_attachments: vec![color],
            depth_attachment: None,
        })?;
        Ok(PrimaryFramebuffer {
            framebuffer,
            color,
            size,
        })
    }

    /// Counters since creation.
    pub fn stats(&self) -> RecordingStats {
        self.stats
    }

    /// Descriptor of a live texture.
    pub fn texture(&self, handle: TextureHandle) -> Option<&TextureDesc> {
        self.textures.get(&handle)
    }

    /// Descriptor of a live framebuffer.
    pub fn framebuffer(&self, handle: FramebufferHandle) -> Option<&FramebufferDesc> {
        self.framebuffers.get(&handle)
    }

    /// Descriptor of a live pipeline.
    pub fn pipeline(&self, handle: PipelineHandle) -> Option<&PipelineDesc> {
        self.pipelines.get(&handle)
    }

    /// Current bytes of a live uniform buffer.
    pub fn buffer_contents(&self, handle: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&handle).map(Vec::as_slice)
    }

    /// Number of objects created and not yet released.
    pub fn live_objects(&self) -> usize {
        self.textures.len() + self.framebuffers.len() + self.pipelines.len() + self.buffers.len()
    }

    /// Batches submitted so far, in order.
    pub fn submitted(&self) -> &[Batch] {
        &self.submitted
    }

    /// Drop recorded batches, keeping object tables.
    pub fn take_submitted(&mut self) -> Vec<Batch> {
        std::mem::take(&mut self.submitted)
    }

    /// Labels of the submitted batches.
    pub fn submitted_labels(&self) -> Vec<&str> {
        self.submitted.iter().map(Batch::label).collect()
    }

    fn check_texture(&self, handle: TextureHandle) -> OutlineResult<()> {
        if self.textures.contains_key(&handle) {
            Ok(())
        } else {
            Err(OutlineError::backend(format!("unknown texture {}", handle.0)))
        }
    }

    fn check_command(&self, command: &BatchCommand) -> OutlineResult<()> {
        match *command {
            BatchCommand::SetFramebuffer(fb) if !self.framebuffers.contains_key(&fb) => Err(
                OutlineError::backend(format!("unknown framebuffer {}", fb.0)),
            ),
            BatchCommand::SetPipeline(p) if !self.pipelines.contains_key(&p) => {
                Err(OutlineError::backend(format!("unknown pipeline {}", p.0)))
            }
            BatchCommand::SetUniformBuffer { buffer, .. }
                if !self.buffers.contains_key(&buffer) =>
            {
                Err(OutlineError::backend(format!("unknown buffer {}", buffer.0)))
            }
            BatchCommand::SetTexture {
                texture: Some(t), ..
            } => self.check_texture(t),
            _ => Ok(()),
        }
    }
}

impl GpuBackend for RecordingBackend {
    fn create_texture(&mut self, desc: &TextureDesc) -> OutlineResult<TextureHandle> {
        if desc.size.is_empty() {
            return Err(OutlineError::backend(format!(
                "texture '{}' has an empty size",
                desc.label
            )));
        }
        let handle = TextureHandle(self.alloc_id());
        self.textures.insert(handle, desc.clone());
        self.stats.textures_created += 1;
        Ok(handle)
    }

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> OutlineResult<FramebufferHandle> {
        for &t in &desc.color_attachments {
            self.check_texture(t)?;
        }
        if let Some(d) = desc.depth_attachment {
            self.check_texture(d)?;
        }
        let handle = FramebufferHandle(self.alloc_id());
        self.framebuffers.insert(handle, desc.clone());
        self.stats.framebuffers_created += 1;
        Ok(handle)
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc) -> OutlineResult<PipelineHandle> {
        let handle = PipelineHandle(self.alloc_id());
        self.pipelines.insert(handle, desc.clone());
        self.stats.pipelines_created += 1;
        Ok(handle)
    }

    fn create_uniform_buffer(
        &mut self,
        _label: &'static str,
        size: usize,
    ) -> OutlineResult<BufferHandle> {
        let handle = BufferHandle(self.alloc_id());
        self.buffers.insert(handle, vec![0; size]);
        self.stats.buffers_created += 1;
        Ok(handle)
    }

    fn write_buffer(&mut self, buffer: BufferHandle, bytes: &[u8]) -> OutlineResult<()> {
        let Some(contents) = self.buffers.get_mut(&buffer) else {
            return Err(OutlineError::backend(format!("unknown buffer {}", buffer.0)));
        };
        if contents.len() != bytes.len() {
            return Err(OutlineError::backend(format!(
                "buffer {} holds {} bytes, write has {}",
                buffer.0,
                contents.len(),
                bytes.len()
            )));
        }
        contents.copy_from_slice(bytes);
        self.stats.buffer_writes += 1;
        Ok(())
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture).is_some() {
            self.stats.released += 1;
        }
    }

    fn release_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        if self.framebuffers.remove(&framebuffer).is_some() {
            self.stats.released += 1;
        }
    }

    fn release_pipeline(&mut self, pipeline: PipelineHandle) {
        if self.pipelines.remove(&pipeline).is_some() {
            self.stats.released += 1;
        }
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        if self.buffers.remove(&buffer).is_some() {
            self.stats.released += 1;
        }
    }

    fn submit(&mut self, batch: Batch) -> OutlineResult<()> {
        for c in batch.commands() {
            self.check_command(c)?;
        }
        self.submitted.push(batch);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gpu/recording.rs"]
mod tests;
