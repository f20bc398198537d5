use super::*;
use crate::{
    foundation::core::{FrameSize, IRect},
    gpu::backend::BufferHandle,
    gpu::batch::BatchCommand,
    gpu::recording::RecordingBackend,
    outline::resources::PrepareOutline,
    outline::shaders::DEBUG_SOURCE_PLACEHOLDER,
    scene::frustum::ViewFrustum,
    scene::store::MemoryScene,
};

fn shaders() -> ShaderAssets {
    ShaderAssets {
        debug_fragment_template: "//SOURCE_PLACEHOLDER\nvoid main() {}".to_string(),
        ..ShaderAssets::default()
    }
}

fn run(
    job: &DebugOutline,
    backend: &mut RecordingBackend,
    varyings: &mut OutlineVaryings,
    frustum: Option<ViewFrustum>,
) -> OutlineResult<()> {
    let primary = backend.create_primary(FrameSize::new(256, 256)).unwrap();
    let scene = MemoryScene::new();
    let frame = FrameInputs {
        primary,
        scene_depth: None,
        frame_transform: BufferHandle(u32::MAX),
        view_frustum: frustum,
        viewport: primary.size.full_rect(),
        scene: &scene,
    };
    if varyings.targets.is_none() {
        varyings.targets = PrepareOutline::new("PrepareOutline")
            .run(backend, &primary)
            .unwrap()
            .0;
    }
    job.run(backend, &frame, varyings)
}

#[test]
fn build_substitutes_depth_body() {
    let mut backend = RecordingBackend::new();
    let job = DebugOutline::build("OutlineDebug", &mut backend, &shaders()).unwrap();
    let desc = backend.pipeline(job.pipeline()).unwrap();
    assert!(desc.fragment.contains("(1.0 - Zdb) * 100.0"));
    assert!(!desc.fragment.contains(DEBUG_SOURCE_PLACEHOLDER));
    assert!(!job.is_enabled());
}

#[test]
fn build_without_placeholder_fails_before_creating_pipelines() {
    let mut backend = RecordingBackend::new();
    let err = DebugOutline::build("OutlineDebug", &mut backend, &ShaderAssets::default())
        .unwrap_err();
    assert!(matches!(err, OutlineError::ShaderTemplate(_)));
    assert_eq!(backend.stats().pipelines_created, 0);
}

#[test]
fn enabled_debug_draws_quad_over_first_group() {
    let mut backend = RecordingBackend::new();
    let mut job = DebugOutline::build("OutlineDebug", &mut backend, &shaders()).unwrap();
    job.configure(&DebugOutlineConfig { view_mask: true });

    let mut varyings = OutlineVaryings::default();
    varyings.rects[0] = IRect::new(4, 4, 16, 16);
    let frustum = ViewFrustum::new(Mat4::IDENTITY, Mat4::IDENTITY);
    run(&job, &mut backend, &mut varyings, Some(frustum)).unwrap();

    let depth = varyings.targets.unwrap().depth_texture;
    let batch = &backend.submitted()[0];
    assert_eq!(
        batch.commands(),
        &[
            BatchCommand::SetViewport(IRect::new(0, 0, 256, 256)),
            BatchCommand::SetScissor(IRect::new(4, 4, 16, 16)),
            BatchCommand::SetProjection(Mat4::IDENTITY),
            BatchCommand::SetView(Mat4::IDENTITY),
            BatchCommand::SetModel(Mat4::IDENTITY),
            BatchCommand::SetPipeline(job.pipeline()),
            BatchCommand::SetTexture {
                slot: DEBUG_DEPTH_SLOT,
                texture: Some(depth),
            },
            BatchCommand::DrawQuad {
                bottom_left: Vec2::new(-1.0, -1.0),
                top_right: Vec2::new(1.0, 1.0),
                color: Vec4::ONE,
            },
            BatchCommand::SetTexture {
                slot: DEBUG_DEPTH_SLOT,
                texture: None,
            },
        ]
    );
    assert_eq!(varyings.stats.debug_draws, 1);
}

#[test]
fn disabled_or_empty_rect_draws_nothing() {
    let mut backend = RecordingBackend::new();
    let mut job = DebugOutline::build("OutlineDebug", &mut backend, &shaders()).unwrap();
    let mut varyings = OutlineVaryings::default();
    varyings.rects[0] = IRect::new(4, 4, 16, 16);
    run(&job, &mut backend, &mut varyings, None).unwrap();
    assert!(backend.submitted().is_empty());

    job.configure(&DebugOutlineConfig { view_mask: true });
    varyings.rects[0] = IRect::ZERO;
    run(&job, &mut backend, &mut varyings, None).unwrap();
    assert!(backend.submitted().is_empty());
}

#[test]
fn enabled_without_frustum_is_a_precondition_error() {
    let mut backend = RecordingBackend::new();
    let mut job = DebugOutline::build("OutlineDebug", &mut backend, &shaders()).unwrap();
    job.configure(&DebugOutlineConfig { view_mask: true });
    let mut varyings = OutlineVaryings::default();
    varyings.rects[0] = IRect::new(0, 0, 8, 8);
    let err = run(&job, &mut backend, &mut varyings, None).unwrap_err();
    assert!(matches!(err, OutlineError::Precondition(_)));
}
