use crate::{
    foundation::core::{IRect, Mat4, Vec2, Vec4},
    gpu::backend::{BufferHandle, FramebufferHandle, PipelineHandle, TextureHandle},
    scene::bounds::ItemId,
};

/// Primitive topology for non-indexed draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// Triangle strip.
    TriangleStrip,
}

#[derive(Clone, Debug, PartialEq)]
/// A single state change or draw recorded into a [`Batch`].
pub enum BatchCommand {
    /// Bind a render target.
    SetFramebuffer(FramebufferHandle),
    /// Set the viewport rect.
    SetViewport(IRect),
    /// Set the scissor rect.
    SetScissor(IRect),
    /// Clear only the depth attachment of the bound framebuffer, inside the scissor.
    ClearDepth(f32),
    /// Set the projection transform.
    SetProjection(Mat4),
    /// Set the view transform.
    SetView(Mat4),
    /// Set the model transform.
    SetModel(Mat4),
    /// Bind a pipeline.
    SetPipeline(PipelineHandle),
    /// Bind a uniform buffer to `slot`.
    SetUniformBuffer {
        /// Binding slot.
        slot: u32,
        /// Buffer to bind.
        buffer: BufferHandle,
    },
    /// Bind or unbind (`None`) a texture at `slot`.
    SetTexture {
        /// Binding slot.
        slot: u32,
        /// Texture to bind, or `None` to unbind.
        texture: Option<TextureHandle>,
    },
    /// Draw a scene item's geometry with the bound pipeline.
    DrawItem(ItemId),
    /// Draw `vertex_count` vertices with no vertex buffer.
    Draw {
        /// Topology.
        primitive: Primitive,
        /// Vertices to generate.
        vertex_count: u32,
    },
    /// Draw a screen quad in the current projection.
    DrawQuad {
        /// Lower-left corner.
        bottom_left: Vec2,
        /// Upper-right corner.
        top_right: Vec2,
        /// RGBA tint.
        color: Vec4,
    },
}

impl BatchCommand {
    /// `true` for commands that emit geometry.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::DrawItem(_) | Self::Draw { .. } | Self::DrawQuad { .. }
        )
    }
}

/// Ordered command list recorded by one job and submitted as a unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    label: String,
    commands: Vec<BatchCommand>,
}

impl Batch {
    /// Start an empty batch.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            commands: Vec::new(),
        }
    }

    /// Label, usually the name of the job that recorded it.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Recorded commands in order.
    pub fn commands(&self) -> &[BatchCommand] {
        &self.commands
    }

    /// `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of draw commands.
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// Append a raw command.
    pub fn push(&mut self, command: BatchCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Record [`BatchCommand::SetFramebuffer`].
    pub fn set_framebuffer(&mut self, framebuffer: FramebufferHandle) -> &mut Self {
        self.push(BatchCommand::SetFramebuffer(framebuffer))
    }

    /// Record [`BatchCommand::SetViewport`].
    pub fn set_viewport(&mut self, viewport: IRect) -> &mut Self {
        self.push(BatchCommand::SetViewport(viewport))
    }

    /// Record [`BatchCommand::SetScissor`].
    pub fn set_scissor(&mut self, rect: IRect) -> &mut Self {
        self.push(BatchCommand::SetScissor(rect))
    }

    /// Record [`BatchCommand::ClearDepth`].
    pub fn clear_depth(&mut self, depth: f32) -> &mut Self {
        self.push(BatchCommand::ClearDepth(depth))
    }

    /// Record [`BatchCommand::SetProjection`].
    pub fn set_projection(&mut self, projection: Mat4) -> &mut Self {
        self.push(BatchCommand::SetProjection(projection))
    }

    /// Record [`BatchCommand::SetView`].
    pub fn set_view(&mut self, view: Mat4) -> &mut Self {
        self.push(BatchCommand::SetView(view))
    }

    /// Record [`BatchCommand::SetModel`].
    pub fn set_model(&mut self, model: Mat4) -> &mut Self {
        self.push(BatchCommand::SetModel(model))
    }

    /// Record [`BatchCommand::SetPipeline`].
    pub fn set_pipeline(&mut self, pipeline: PipelineHandle) -> &mut Self {
        self.push(BatchCommand::SetPipeline(pipeline))
    }

    /// Record [`BatchCommand::SetUniformBuffer`].
    pub fn set_uniform_buffer(&mut self, slot: u32, buffer: BufferHandle) -> &mut Self {
        self.push(BatchCommand::SetUniformBuffer { slot, buffer })
    }

    /// Record [`BatchCommand::SetTexture`].
    pub fn set_texture(&mut self, slot: u32, texture: Option<TextureHandle>) -> &mut Self {
        self.push(BatchCommand::SetTexture { slot, texture })
    }

    /// Record [`BatchCommand::DrawItem`].
    pub fn draw_item(&mut self, item: ItemId) -> &mut Self {
        self.push(BatchCommand::DrawItem(item))
    }

    /// Record [`BatchCommand::Draw`].
    pub fn draw(&mut self, primitive: Primitive, vertex_count: u32) -> &mut Self {
        self.push(BatchCommand::Draw {
            primitive,
            vertex_count,
        })
    }

    /// Record [`BatchCommand::DrawQuad`].
    pub fn draw_quad(&mut self, bottom_left: Vec2, top_right: Vec2, color: Vec4) -> &mut Self {
        self.push(BatchCommand::DrawQuad {
            bottom_left,
            top_right,
            color,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gpu/batch.rs"]
mod tests;
