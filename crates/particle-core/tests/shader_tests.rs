// Checks on the bundled WGSL sources that the GPU side relies on.

use particle_core::{LINES_WGSL, PARTICLES_WGSL};

fn scene_fields(src: &str) -> Vec<&str> {
    let start = src.find("struct Scene {").expect("Scene block") + "struct Scene {".len();
    let end = start + src[start..].find("};").expect("Scene block end");
    src[start..end]
        .lines()
        .filter_map(|l| l.trim().split(':').next())
        .filter(|name| !name.is_empty())
        .collect()
}

fn vertex_body<'a>(src: &'a str, entry: &str) -> &'a str {
    let start = src.find(&format!("fn {entry}(")).expect("entry point");
    let end = start + src[start..].find("\n}\n").expect("entry point end");
    &src[start..end]
}

#[test]
fn both_shaders_declare_the_same_scene_block() {
    let points = scene_fields(PARTICLES_WGSL);
    assert_eq!(points, scene_fields(LINES_WGSL));
    assert_eq!(points.len(), 14);
    assert_eq!(&points[..3], &["view", "proj", "model"]);
}

#[test]
fn lines_are_not_rotated_with_the_cloud() {
    assert!(!vertex_body(LINES_WGSL, "vs_lines").contains("scene.model"));
    assert!(vertex_body(PARTICLES_WGSL, "vs_points").contains("scene.model"));
}

#[test]
fn sprite_size_is_capped_and_uses_the_uniform_attenuation() {
    let body = vertex_body(PARTICLES_WGSL, "vs_points");
    assert!(body.contains("scene.max_point_px"));
    assert!(body.contains("scene.point_attenuation"));
    assert!(!body.contains("300.0"));
}
