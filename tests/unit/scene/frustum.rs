use super::*;

fn ortho_1024() -> ViewFrustum {
    ViewFrustum::new(
        Mat4::IDENTITY,
        Mat4::orthographic_rh_gl(-512.0, 512.0, -512.0, 512.0, 0.5, 100.0),
    )
}

fn perspective() -> ViewFrustum {
    ViewFrustum::new(
        Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
        Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0),
    )
}

#[test]
fn ortho_box_projects_exactly() {
    let f = ortho_1024();
    let aabb = Aabb::from_corners(Vec3::new(-256.0, -128.0, -10.0), Vec3::new(0.0, 256.0, -5.0));
    let r = f.projected_rect(&aabb).unwrap();
    assert_eq!(r, Rect::new(-0.5, -0.25, 0.0, 0.5));
}

#[test]
fn box_outside_one_plane_is_rejected() {
    let f = ortho_1024();
    let right = Aabb::from_corners(Vec3::new(600.0, 0.0, -10.0), Vec3::new(700.0, 10.0, -5.0));
    assert_eq!(f.projected_rect(&right), None);

    let too_far = Aabb::from_corners(Vec3::new(0.0, 0.0, -300.0), Vec3::new(10.0, 10.0, -200.0));
    assert_eq!(f.projected_rect(&too_far), None);
}

#[test]
fn oversized_box_clips_to_ndc_square() {
    let f = ortho_1024();
    let huge = Aabb::from_corners(Vec3::new(-5000.0, -5000.0, -50.0), Vec3::new(5000.0, 5000.0, -1.0));
    assert_eq!(f.projected_rect(&huge), Some(Rect::new(-1.0, -1.0, 1.0, 1.0)));
}

#[test]
fn box_behind_eye_is_rejected() {
    let f = perspective();
    let behind = Aabb::from_corners(Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, 1.0, 4.0));
    assert_eq!(f.projected_rect(&behind), None);
}

#[test]
fn box_straddling_eye_plane_stays_visible() {
    let f = perspective();
    let around = Aabb::from_corners(Vec3::new(-0.5, -0.5, -3.0), Vec3::new(0.5, 0.5, 3.0));
    let r = f.projected_rect(&around).unwrap();
    assert!(r.x0 >= -1.0 && r.x1 <= 1.0);
    assert!(r.y0 >= -1.0 && r.y1 <= 1.0);
    assert!(r.width() > 0.0 && r.height() > 0.0);
}

#[test]
fn view_depth_grows_along_forward_axis() {
    let f = perspective();
    assert!((f.view_depth(Vec3::new(0.0, 0.0, -4.0)) - 4.0).abs() < 1e-5);
    assert!(f.view_depth(Vec3::new(0.0, 0.0, -1.0)) < f.view_depth(Vec3::new(0.0, 0.0, -2.0)));
}
