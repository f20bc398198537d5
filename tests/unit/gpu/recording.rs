use super::*;

#[test]
fn primary_framebuffer_attaches_color_at_slot_zero() {
    let mut gpu = RecordingBackend::new();
    let primary = gpu.create_primary(FrameSize::new(32, 16)).unwrap();
    let fb = gpu.framebuffer(primary.framebuffer).unwrap();
    assert_eq!(fb.color_attachments, vec![primary.color]);
    assert_eq!(fb.depth_attachment, None);
    assert_eq!(gpu.texture(primary.color).unwrap().size, FrameSize::new(32, 16));
}

#[test]
fn buffer_writes_must_match_allocation() {
    let mut gpu = RecordingBackend::new();
    let b = gpu.create_uniform_buffer("params", 8).unwrap();
    gpu.write_buffer(b, &[1; 8]).unwrap();
    assert_eq!(gpu.buffer_contents(b), Some(&[1u8; 8][..]));
    assert!(gpu.write_buffer(b, &[1; 4]).is_err());
    assert!(gpu.write_buffer(BufferHandle(999), &[1; 8]).is_err());
    assert_eq!(gpu.stats().buffer_writes, 1);
}

#[test]
fn submit_rejects_released_handles() {
    let mut gpu = RecordingBackend::new();
    let primary = gpu.create_primary(FrameSize::new(4, 4)).unwrap();

    let mut ok = Batch::new("ok");
    ok.set_framebuffer(primary.framebuffer);
    gpu.submit(ok).unwrap();

    gpu.release_framebuffer(primary.framebuffer);
    let mut stale = Batch::new("stale");
    stale.set_framebuffer(primary.framebuffer);
    assert!(gpu.submit(stale).is_err());
    assert_eq!(gpu.submitted_labels(), vec!["ok"]);
}

#[test]
fn live_objects_track_creation_and_release() {
    let mut gpu = RecordingBackend::new();
    let primary = gpu.create_primary(FrameSize::new(4, 4)).unwrap();
    assert_eq!(gpu.live_objects(), 2);
    gpu.release_framebuffer(primary.framebuffer);
    gpu.release_texture(primary.color);
    gpu.release_texture(primary.color);
    assert_eq!(gpu.live_objects(), 0);
    assert_eq!(gpu.stats().released, 2);
}

#[test]
fn empty_textures_are_rejected() {
    let mut gpu = RecordingBackend::new();
    let err = gpu
        .create_texture(&TextureDesc {
            label: "empty",
            size: FrameSize::ZERO,
            format: TextureFormat::Depth32Float,
        })
        .unwrap_err();
    assert!(err.to_string().contains("empty size"));
}
