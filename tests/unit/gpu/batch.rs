use super::*;

#[test]
fn commands_are_kept_in_recording_order() {
    let mut b = Batch::new("test");
    b.set_scissor(IRect::new(1, 2, 3, 4))
        .set_framebuffer(FramebufferHandle(7))
        .clear_depth(1.0)
        .draw_item(ItemId(3));

    assert_eq!(b.label(), "test");
    assert_eq!(
        b.commands(),
        &[
            BatchCommand::SetScissor(IRect::new(1, 2, 3, 4)),
            BatchCommand::SetFramebuffer(FramebufferHandle(7)),
            BatchCommand::ClearDepth(1.0),
            BatchCommand::DrawItem(ItemId(3)),
        ]
    );
}

#[test]
fn draw_count_ignores_state_changes() {
    let mut b = Batch::new("count");
    assert!(b.is_empty());
    b.set_pipeline(PipelineHandle(0))
        .draw(Primitive::TriangleStrip, 4)
        .set_texture(0, None)
        .draw_quad(Vec2::splat(-1.0), Vec2::splat(1.0), Vec4::ONE);
    assert_eq!(b.draw_count(), 2);
}
