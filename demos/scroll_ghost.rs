//! Scroll Ghost Demo
//!
//! Runs the director headless over a simulated page visit: the page scrolls
//! from top to bottom over ten seconds while the pointer circles the
//! viewport. Section, root rotation and light levels are logged once per
//! simulated second.
//!
//! Usage:
//!   RUST_LOG=info cargo run --example scroll_ghost -- [studio|clean|cinematic|minimal]

use std::f32::consts::TAU;

use anyhow::{Context, bail};
use glam::Vec3;
use log::info;

use wraith::animation::{AnimationDirector, DirectorConfig, PointerEvents, PointerMove};
use wraith::scene::{BoundingBox, Camera, Color, LightRig, Model, Skeleton, Stage};
use wraith::scene::{StandardMaterial, Transform};

const FPS: u32 = 60;
const SECONDS: u32 = 10;
const VIEWPORT: (f32, f32) = (1280.0, 720.0);

fn ghost_model() -> Model {
    let mut skeleton = Skeleton::new();
    let root = skeleton.add_bone("Root", Transform::new(), None);
    let mut parent = root;
    for name in ["Bone1", "Bone2", "Bone3"] {
        parent = skeleton.add_bone(name, Transform::from_position(Vec3::Y * -0.6), Some(parent));
    }

    Model::new(
        "ghost",
        skeleton,
        vec![StandardMaterial::new("ghost_body", Color::from_hex(0xe5e7eb))],
        BoundingBox::new(Vec3::new(-1.2, -3.0, -1.0), Vec3::new(1.2, 3.0, 1.0)),
    )
}

fn preset(name: &str) -> anyhow::Result<DirectorConfig> {
    Ok(match name {
        "studio" => DirectorConfig::studio(),
        "clean" => DirectorConfig::clean(),
        "cinematic" => DirectorConfig::cinematic(),
        "minimal" => DirectorConfig::minimal(),
        other => bail!("unknown preset '{other}'"),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "cinematic".to_string());
    let config = preset(&name).with_context(|| format!("loading preset {name}"))?;

    // Snapshots survive a trip through the "copy values" JSON.
    let config = DirectorConfig::from_json(&config.to_json()?)?;

    let mut camera = Camera::new_perspective(45.0, VIEWPORT.0 / VIEWPORT.1, 0.1, 100.0);
    camera.look_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);

    let mut stage = Stage::new(LightRig::showcase());
    stage.set_model(ghost_model());

    let mut director = AnimationDirector::new();
    let events = PointerEvents::new();
    let _subscription = events.subscribe(director.pointer());

    let dt = 1.0 / FPS as f32;
    let frames = FPS * SECONDS;

    for frame in 0..frames {
        let t = frame as f32 * dt;
        let scroll = frame as f32 / (frames - 1) as f32;

        let angle = t * TAU / 4.0;
        events.dispatch(PointerMove {
            client_x: VIEWPORT.0 * (0.5 + 0.4 * angle.cos()),
            client_y: VIEWPORT.1 * (0.5 + 0.4 * angle.sin()),
            viewport_width: VIEWPORT.0,
            viewport_height: VIEWPORT.1,
        });

        if let Some(report) = director.tick(dt, scroll, &camera, &config, &mut stage) {
            info!(
                "bound root={:?} wiggle={:?}",
                report.root_bone, report.wiggle_bones
            );
        }

        if frame % FPS == 0 {
            let state = director.state();
            let section = &config.sections.sections()[state.section_index];
            let primary = stage.lights.get("primary").map_or(0.0, |l| l.intensity);
            info!(
                "t={t:>4.1}s scroll={scroll:.2} section={:<9} rot=({:+.3}, {:+.3}, {:+.3}) aim={:.2?} primary={primary:.2}",
                section.name,
                state.applied_rotation.x,
                state.applied_rotation.y,
                state.applied_rotation.z,
                state.aim_target,
            );
        }
    }

    let model = stage.model.as_ref().context("model vanished")?;
    info!(
        "final: position={:.2?} scale={:.2} emissive=#{:06x}",
        model.root.position,
        model.root.scale.x,
        model.materials[0].emissive.to_hex()
    );

    Ok(())
}
