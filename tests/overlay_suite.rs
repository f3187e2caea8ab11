use std::path::Path;

use organogram_connectors::{
    Config, ConnectorEngine, Scene, Theme, organogram_topology, render_overlay_svg,
};

fn load_scene(rel: &str) -> Scene {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    assert!(path.exists(), "fixture missing: {}", rel);
    Scene::load(&path).expect("scene parse failed")
}

/// Builds an engine for the scene and drives the cooperative loop until it
/// goes idle, with visibility reported at `visible_at`.
fn settle(scene: &Scene, visible_at: Option<f64>) -> ConnectorEngine {
    let config = Config::default();
    let topology = scene
        .topology
        .clone()
        .unwrap_or_else(|| organogram_topology(&config.connector));
    let mut engine = ConnectorEngine::new(scene.build_registry(), topology, config.connector);
    let mut now = 0.0;
    let mut visible_pending = visible_at;
    engine.set_ready(now);
    loop {
        if let Some(at) = visible_pending
            && at <= now
        {
            engine.set_visible(now);
            visible_pending = None;
        }
        match engine.next_deadline() {
            Some(deadline) => {
                now = match visible_pending {
                    Some(at) if at < deadline => at,
                    _ => deadline,
                };
                engine.poll(scene, now);
            }
            None => match visible_pending {
                // Idle with visibility still to come: jump the clock there.
                Some(at) => now = now.max(at),
                None => break,
            },
        }
    }
    engine
}

fn assert_valid_overlay(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    assert!(svg.contains("fill=\"none\""), "{fixture}: overlay must not fill");
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new scene shapes must be added intentionally.
    let fixtures = [
        "organogram/basic.json",
        "organogram/narrow.json",
        "organogram/degenerate.json",
        "custom/pair.json",
    ];

    for rel in fixtures {
        let scene = load_scene(rel);
        let engine = settle(&scene, Some(0.0));
        let svg = render_overlay_svg(&engine, &Theme::slate());
        assert_valid_overlay(&svg, rel);
        for path in engine.paths() {
            assert_eq!(path.offset, 0.0, "{rel}: {} not fully drawn", path.id);
        }
    }
}

#[test]
fn basic_scene_reproduces_the_reference_geometry() {
    let scene = load_scene("organogram/basic.json");
    let engine = settle(&scene, None);
    let top_curve = engine
        .paths()
        .iter()
        .find(|p| p.id == "top-curve")
        .expect("top-curve missing");
    assert_eq!(top_curve.d, "M125,100 C125,260 325,260 325,100");

    let drop = engine
        .paths()
        .iter()
        .find(|p| p.id == "top-to-manager")
        .expect("top-to-manager missing");
    assert_eq!(drop.d, "M225,220 V300");
    assert_eq!(drop.length, 80.0);
}

#[test]
fn hidden_engine_exports_fully_undrawn_strokes() {
    let scene = load_scene("organogram/basic.json");
    let engine = settle(&scene, None);
    let svg = render_overlay_svg(&engine, &Theme::slate());
    assert_valid_overlay(&svg, "organogram/basic.json");
    for path in engine.paths() {
        assert!(path.length > 0.0);
        assert_eq!(path.offset, path.length);
    }
}

#[test]
fn late_visibility_still_completes_the_reveal() {
    let scene = load_scene("organogram/basic.json");
    let engine = settle(&scene, Some(2_000.0));
    for path in engine.paths() {
        assert_eq!(path.offset, 0.0);
    }
}

#[test]
fn degenerate_scene_settles_with_zero_length_strokes() {
    let scene = load_scene("organogram/degenerate.json");
    let engine = settle(&scene, Some(0.0));
    assert_eq!(engine.paths().len(), 6);
    for path in engine.paths() {
        assert_eq!(path.length, 0.0);
        assert_eq!(path.offset, 0.0);
    }
}

#[test]
fn custom_topology_overrides_the_built_in_organogram() {
    let scene = load_scene("custom/pair.json");
    let engine = settle(&scene, Some(0.0));
    assert_eq!(engine.paths().len(), 1);
    assert_eq!(engine.paths()[0].id, "spine");
    assert_eq!(engine.paths()[0].d, "M200,60 V200");
    assert_eq!(engine.paths()[0].length, 140.0);
}

#[test]
fn narrow_scene_keeps_paths_inside_the_container() {
    let scene = load_scene("organogram/narrow.json");
    let engine = settle(&scene, None);
    assert_eq!(engine.container_size(), Some((480.0, 600.0)));
    // Anchors sit inside the container, so every path starts there too.
    for path in engine.paths() {
        let x: f32 = path.d[1..]
            .split(',')
            .next()
            .and_then(|s| s.parse().ok())
            .expect("path must start with M{x},{y}");
        assert!(x >= 0.0 && x <= 480.0, "{}: start x {x} out of range", path.id);
    }
}
