//! Section Blending Tests
//!
//! Tests for:
//! - Canonical timeline endpoints and mid-band interpolation
//! - Idempotence, coverage and continuity of evaluation
//! - Boundary resolution and progress clamping
//! - SectionTable validation (gaps, overlaps, bounds, light sets)
//! - Emissive color blending in HSL
//! - Time-driven section effects layered on the blended state

use glam::Vec3;

use wraith::animation::sections::{Section, SectionBlender, SectionTable, VisualState};
use wraith::errors::WraithError;
use wraith::scene::Color;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn state(x: f32, scale: f32, light: f32) -> VisualState {
    VisualState {
        position: Vec3::new(x, 0.0, 0.0),
        scale,
        ..VisualState::default()
    }
    .with_light("key", light)
}

fn two_band(split: f32, second_start: f32) -> Vec<Section> {
    vec![
        Section::new("A", 0.0, split, state(0.0, 1.0, 1.0), state(1.0, 2.0, 2.0)),
        Section::new("B", second_start, 1.0, state(1.0, 2.0, 2.0), state(3.0, 1.0, 0.0)),
    ]
}

// ============================================================================
// Canonical timeline
// ============================================================================

#[test]
fn canonical_start_is_hero_start() {
    let table = SectionTable::canonical();
    let hero = &table.sections()[0];

    assert_eq!(hero.name, "Hero");
    assert_eq!(table.evaluate(0.0), hero.from);
}

#[test]
fn canonical_end_is_finale_end() {
    let table = SectionTable::canonical();
    let finale = table.sections().last().unwrap();

    assert_eq!(finale.name, "Finale");
    assert_eq!(table.evaluate(1.0), finale.to);
}

#[test]
fn canonical_midpoint_of_features() {
    let table = SectionTable::canonical();
    let features = &table.sections()[1];
    let v = table.evaluate(0.3);

    let expected_pos = features.from.position.lerp(features.to.position, 0.5);
    assert!(vec3_approx(v.position, expected_pos), "{:?}", v.position);
    assert!(vec3_approx(v.position, Vec3::new(2.5, 0.0, 1.0)));
    assert!(approx(v.scale, 3.6));
    assert!(approx(v.rotation.y, 0.2));
    assert!(approx(v.emissive_intensity, 0.6));
    for (name, &value) in &v.lights {
        let from = features.from.lights[name];
        let to = features.to.lights[name];
        assert!(approx(value, (from + to) * 0.5), "light {name}");
    }
}

#[test]
fn canonical_bands_resolve_in_order() {
    let table = SectionTable::canonical();
    let names: Vec<_> = [0.1, 0.3, 0.5, 0.7, 0.9]
        .iter()
        .map(|&p| table.section_at(p).name.to_string())
        .collect();

    assert_eq!(names, ["Hero", "Features", "Showcase", "Premium", "Finale"]);
}

#[test]
fn canonical_finale_glows_white() {
    let table = SectionTable::canonical();
    let v = table.evaluate(1.0);

    assert_eq!(v.emissive.to_hex(), 0xffffff);
    assert!(approx(v.emissive_intensity, 1.3));
    assert!(approx(v.scale, 5.0));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn evaluate_is_idempotent() {
    let blender = SectionBlender::default();

    for i in 0..=200 {
        let p = i as f32 / 200.0;
        assert_eq!(blender.evaluate(p), blender.evaluate(p), "progress {p}");
    }
}

#[test]
fn evaluate_covers_unit_range() {
    let table = SectionTable::canonical();

    for i in 0..=1000 {
        let p = i as f32 / 1000.0;
        let idx = table.index_at(p);
        let s = &table.sections()[idx];
        assert!(
            (p >= s.start && p < s.end) || (idx == table.len() - 1 && p <= s.end),
            "progress {p} resolved to {} [{}, {})",
            s.name,
            s.start,
            s.end
        );
    }
}

#[test]
fn evaluate_is_continuous_at_boundaries() {
    let table = SectionTable::canonical();
    let eps = 1e-4;

    for boundary in [0.2_f32, 0.4, 0.6, 0.8] {
        let below = table.evaluate(boundary - eps);
        let above = table.evaluate(boundary + eps);

        assert!(below.position.distance(above.position) < 0.05, "position at {boundary}");
        assert!((below.scale - above.scale).abs() < 0.05, "scale at {boundary}");
        assert!(
            (below.emissive_intensity - above.emissive_intensity).abs() < 0.05,
            "emissive at {boundary}"
        );
        assert!(
            below.emissive.to_vec3().distance(above.emissive.to_vec3()) < 0.05,
            "color at {boundary}"
        );
        for (name, value) in &below.lights {
            assert!((value - above.lights[name]).abs() < 0.05, "light {name} at {boundary}");
        }
    }
}

#[test]
fn boundary_resolves_to_entering_band() {
    let table = SectionTable::canonical();

    assert_eq!(table.index_at(0.2), 1);
    assert_eq!(table.evaluate(0.2), table.sections()[1].from);
    assert_eq!(table.index_at(0.8), 4);
}

#[test]
fn progress_is_clamped() {
    let table = SectionTable::canonical();

    assert_eq!(table.evaluate(-3.0), table.evaluate(0.0));
    assert_eq!(table.evaluate(7.5), table.evaluate(1.0));
    assert_eq!(table.index_at(f32::INFINITY), table.len() - 1);
}

#[test]
fn uniform_table_is_constant() {
    let s = state(2.0, 3.0, 1.5);
    let table = SectionTable::uniform(s.clone());

    assert_eq!(table.evaluate(0.0), s);
    assert_eq!(table.evaluate(0.5), s);
    assert_eq!(table.evaluate(1.0), s);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn table_rejects_empty() {
    assert!(matches!(SectionTable::new(Vec::new()), Err(WraithError::EmptySections)));
}

#[test]
fn table_rejects_gap() {
    let err = SectionTable::new(two_band(0.4, 0.5)).unwrap_err();
    assert!(matches!(err, WraithError::InvalidSections { ref section, .. } if section == "B"));
    assert!(err.to_string().contains("gap"), "{err}");
}

#[test]
fn table_rejects_overlap() {
    let err = SectionTable::new(two_band(0.6, 0.5)).unwrap_err();
    assert!(err.to_string().contains("overlaps"), "{err}");
}

#[test]
fn table_rejects_partial_coverage() {
    let mut sections = two_band(0.5, 0.5);
    sections[1].end = 0.9;
    assert!(SectionTable::new(sections).is_err());

    let mut sections = two_band(0.5, 0.5);
    sections[0].start = 0.1;
    assert!(SectionTable::new(sections).is_err());
}

#[test]
fn table_rejects_inverted_and_non_finite_ranges() {
    let sections = vec![
        Section::constant("A", 0.0, 0.6, VisualState::default()),
        Section::constant("B", 0.6, 0.4, VisualState::default()),
        Section::constant("C", 0.4, 1.0, VisualState::default()),
    ];
    assert!(SectionTable::new(sections).is_err());

    let sections = vec![
        Section::constant("A", 0.0, f32::NAN, VisualState::default()),
        Section::constant("B", 0.5, 1.0, VisualState::default()),
    ];
    assert!(SectionTable::new(sections).is_err());
}

#[test]
fn table_rejects_mismatched_lights() {
    let sections = vec![Section::new(
        "A",
        0.0,
        1.0,
        VisualState::default().with_light("key", 1.0),
        VisualState::default().with_light("fill", 1.0),
    )];
    let err = SectionTable::new(sections).unwrap_err();
    assert!(err.to_string().contains("different lights"), "{err}");
}

#[test]
fn table_accepts_valid_two_band() {
    let table = SectionTable::new(two_band(0.5, 0.5)).unwrap();
    let v = table.evaluate(0.75);

    assert!(approx(v.position.x, 2.0));
    assert!(approx(v.scale, 1.5));
    assert!(approx(v.lights["key"], 1.0));
}

#[test]
fn zero_width_band_is_skipped() {
    let sections = vec![
        Section::constant("A", 0.0, 0.5, state(0.0, 1.0, 1.0)),
        Section::constant("Blink", 0.5, 0.5, state(9.0, 9.0, 9.0)),
        Section::constant("C", 0.5, 1.0, state(0.0, 1.0, 1.0)),
    ];
    let table = SectionTable::new(sections).unwrap();

    assert_eq!(table.section_at(0.5).name, "C");
    assert!(table.evaluate(0.5).position.x.abs() < EPSILON);
}

#[test]
fn table_round_trips_through_json() {
    let table = SectionTable::canonical();
    let json = serde_json::to_string(&table).unwrap();
    let back: SectionTable = serde_json::from_str(&json).unwrap();

    assert_eq!(back.len(), table.len());
    assert_eq!(back.evaluate(0.0), table.evaluate(0.0));
}

#[test]
fn table_json_is_validated() {
    let json = serde_json::to_string(&two_band(0.4, 0.5)).unwrap();
    assert!(serde_json::from_str::<SectionTable>(&json).is_err());
}

// ============================================================================
// Color blending
// ============================================================================

#[test]
fn hsl_blend_takes_short_arc() {
    // red (h = 0) to magenta (h = 5/6): short way passes through h = 11/12
    let red = Color::new(1.0, 0.0, 0.0);
    let magenta = Color::new(1.0, 0.0, 1.0);
    let mid = red.blend_hsl(magenta, 0.5);

    assert!(mid.r > 0.9, "{mid:?}");
    assert!(mid.g < 0.1, "{mid:?}");
    assert!(mid.b > 0.4 && mid.b < 0.6, "{mid:?}");
}

#[test]
fn hsl_blend_endpoints_are_exact() {
    let a = Color::from_hex(0x7c3aed);
    let b = Color::from_hex(0xec4899);

    assert_eq!(a.blend_hsl(b, 0.0), a);
    assert_eq!(a.blend_hsl(b, 1.0), b);
}

// ============================================================================
// Section effects
// ============================================================================

fn spread(values: &[f32]) -> f32 {
    let max = values.iter().copied().fold(f32::MIN, f32::max);
    let min = values.iter().copied().fold(f32::MAX, f32::min);
    max - min
}

#[test]
fn hero_lights_flicker_over_time() {
    let table = SectionTable::canonical();
    let primary: Vec<f32> = (0..30)
        .map(|i| table.evaluate_at(0.1, f64::from(i) * 0.1).lights["primary"])
        .collect();

    assert!(spread(&primary) > 1.0, "{primary:?}");
}

#[test]
fn bands_without_effects_hold_still() {
    let table = SectionTable::canonical();

    for progress in [0.3, 0.9, 1.0] {
        let blended = table.evaluate(progress);
        for i in 0..30 {
            let time = f64::from(i) * 0.37;
            assert_eq!(table.evaluate_at(progress, time), blended, "progress {progress}");
        }
    }
}

#[test]
fn hero_glow_cycles_through_violet() {
    let table = SectionTable::canonical();

    for i in 0..50 {
        let hue = table.evaluate_at(0.05, f64::from(i) * 0.5).emissive.to_hsl().h;
        assert!(hue >= 0.69 || hue < 0.01, "hue {hue} at sample {i}");
    }
}

#[test]
fn premium_glow_sweeps_with_time() {
    let table = SectionTable::canonical();
    let a = table.evaluate_at(0.7, 0.0).emissive;
    let b = table.evaluate_at(0.7, 1.5).emissive;

    assert!(a.to_vec3().distance(b.to_vec3()) > 0.05, "{a:?} vs {b:?}");
}

#[test]
fn effects_survive_json() {
    let table = SectionTable::canonical();
    let json = serde_json::to_string(&table).unwrap();
    let back: SectionTable = serde_json::from_str(&json).unwrap();

    assert_eq!(back, table);
    assert_eq!(back.evaluate_at(0.65, 2.0), table.evaluate_at(0.65, 2.0));
}
