use super::*;
use crate::gpu::recording::RecordingBackend;

fn primary(backend: &mut RecordingBackend, w: u32, h: u32) -> PrimaryFramebuffer {
    backend.create_primary(FrameSize::new(w, h)).unwrap()
}

#[test]
fn accessors_fail_before_first_allocation() {
    let res = OutlineResources::new();
    assert!(matches!(
        res.depth_framebuffer(),
        Err(OutlineError::MissingResource(_))
    ));
    assert!(res.depth_texture().is_err());
    assert!(res.color_framebuffer().is_err());
    assert!(res.targets().is_err());
}

#[test]
fn unchanged_size_keeps_handles() {
    let mut backend = RecordingBackend::new();
    let p = primary(&mut backend, 640, 480);
    let mut res = OutlineResources::new();

    assert!(res.update(&mut backend, &p).unwrap());
    let first = res.targets().unwrap();
    let created = backend.stats();

    assert!(!res.update(&mut backend, &p).unwrap());
    assert_eq!(res.targets().unwrap(), first);
    assert_eq!(backend.stats(), created);
}

#[test]
fn resize_reallocates_both_buffers_at_new_size() {
    let mut backend = RecordingBackend::new();
    let small = primary(&mut backend, 320, 200);
    let large = primary(&mut backend, 1024, 768);
    let mut res = OutlineResources::new();

    res.update(&mut backend, &small).unwrap();
    let before = res.targets().unwrap();
    res.update(&mut backend, &large).unwrap();
    let after = res.targets().unwrap();

    assert_ne!(before.depth_framebuffer, after.depth_framebuffer);
    assert_ne!(before.color_framebuffer, after.color_framebuffer);
    assert_eq!(after.frame_size, FrameSize::new(1024, 768));
    assert!(backend.framebuffer(before.depth_framebuffer).is_none());
    assert!(backend.texture(before.depth_texture).is_none());

    let depth = backend.texture(after.depth_texture).unwrap();
    assert_eq!(depth.size, FrameSize::new(1024, 768));
    assert!(depth.format.is_depth());

    let color = backend.framebuffer(after.color_framebuffer).unwrap();
    assert_eq!(color.label, "primaryWithoutDepth");
    assert_eq!(color.color_attachments, vec![large.color]);
    assert_eq!(color.depth_attachment, None);

    let depth_fb = backend.framebuffer(after.depth_framebuffer).unwrap();
    assert_eq!(depth_fb.label, "outlineDepth");
    assert_eq!(depth_fb.depth_attachment, Some(after.depth_texture));
}

#[test]
fn empty_primary_publishes_no_targets() {
    let mut backend = RecordingBackend::new();
    let p = primary(&mut backend, 64, 64);
    let mut job = PrepareOutline::new("PrepareOutline");
    let (targets, reallocated) = job.run(&mut backend, &p).unwrap();
    assert!(targets.is_some());
    assert!(reallocated);

    let minimized = PrimaryFramebuffer {
        size: FrameSize::ZERO,
        ..p
    };
    let live = backend.live_objects();
    let (targets, _) = job.run(&mut backend, &minimized).unwrap();
    assert!(targets.is_none());
    assert_eq!(backend.live_objects(), live - 3);

    let (targets, reallocated) = job.run(&mut backend, &p).unwrap();
    assert!(targets.is_some());
    assert!(reallocated);
}

#[test]
fn release_frees_owned_objects_only() {
    let mut backend = RecordingBackend::new();
    let p = primary(&mut backend, 32, 32);
    let live = backend.live_objects();
    let mut job = PrepareOutline::new("PrepareOutline");
    job.run(&mut backend, &p).unwrap();
    assert_eq!(backend.live_objects(), live + 3);
    job.release(&mut backend);
    assert_eq!(backend.live_objects(), live);
    assert!(backend.texture(p.color).is_some());
}
