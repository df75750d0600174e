//! Secondary Motion Tests
//!
//! Tests for:
//! - SpringParams validation and the single-knob constructor
//! - SpringBone integration: response, return to rest, long-run stability
//! - SpringBone degenerate inputs (missing bone, bad dt)
//! - WiggleRig binding, stepping and rebinding, driver exclusion

use glam::{Quat, Vec3};

use wraith::animation::spring::{SpringBone, SpringParams};
use wraith::animation::wiggle::WiggleRig;
use wraith::errors::WraithError;
use wraith::scene::{BoneHandle, Skeleton, Transform};

const DT: f32 = 1.0 / 60.0;

fn rig_skeleton() -> (Skeleton, BoneHandle) {
    let mut skeleton = Skeleton::new();
    let root = skeleton.add_bone("Root", Transform::new(), None);
    let b1 = skeleton.add_bone("Bone1", Transform::new(), Some(root));
    let b2 = skeleton.add_bone("Bone2", Transform::new(), Some(b1));
    skeleton.add_bone("Bone3", Transform::new(), Some(b2));
    (skeleton, root)
}

fn rotation_of(skeleton: &Skeleton, name: &str) -> Vec3 {
    let handle = skeleton.find(name).expect("bone exists");
    skeleton.bone(handle).unwrap().transform.rotation_euler()
}

// ============================================================================
// SpringParams
// ============================================================================

#[test]
fn params_accept_unit_range() {
    assert!(SpringParams::new(1.0, 1.0, 1.0).is_ok());
    assert!(SpringParams::new(0.01, 0.01, 0.01).is_ok());
}

#[test]
fn params_reject_out_of_range() {
    for (s, d, r) in [
        (0.0, 0.5, 0.5),
        (0.5, 1.5, 0.5),
        (0.5, 0.5, -0.1),
        (f32::NAN, 0.5, 0.5),
    ] {
        let err = SpringParams::new(s, d, r).unwrap_err();
        assert!(matches!(err, WraithError::InvalidSpring { .. }), "{err}");
    }
}

#[test]
fn params_sanitized_clamps_into_range() {
    let p = SpringParams {
        stiffness: f32::NAN,
        damping: 4.0,
        return_force: -1.0,
    }
    .sanitized();

    assert!(p.validate().is_ok(), "{p:?}");
    assert_eq!(p.stiffness, SpringParams::default().stiffness);
    assert_eq!(p.damping, 1.0);
    assert!(p.return_force > 0.0);
    assert_eq!(SpringParams::default().sanitized(), SpringParams::default());
}

#[test]
fn params_from_velocity() {
    let p = SpringParams::from_velocity(0.4).unwrap();
    assert_eq!(p.stiffness, 0.4);
    assert_eq!(p.damping, 0.15);
    assert!((p.return_force - 0.2).abs() < 1e-6);
}

// ============================================================================
// SpringBone
// ============================================================================

#[test]
fn spring_lags_then_returns_to_rest() {
    let (mut skeleton, _) = rig_skeleton();
    let bone = skeleton.find("Bone1").unwrap();
    let mut spring = SpringBone::from_rest(&skeleton, bone, SpringParams::default()).unwrap();

    spring.step(DT, Vec3::new(0.0, 0.3, 0.0), &mut skeleton);
    assert!(spring.offset().y > 0.0, "spring should follow the drive");
    assert!(rotation_of(&skeleton, "Bone1").y > 0.0);

    for _ in 0..2000 {
        spring.step(DT, Vec3::ZERO, &mut skeleton);
    }
    assert!(spring.offset().length() < 1e-3, "offset {:?}", spring.offset());
    assert!(spring.velocity().length() < 1e-3);
}

#[test]
fn spring_stays_bounded_under_sinusoidal_drive() {
    let corners = [0.05_f32, 0.5, 1.0];

    for &stiffness in &corners {
        for &damping in &corners {
            for &return_force in &corners {
                let (mut skeleton, _) = rig_skeleton();
                let bone = skeleton.find("Bone2").unwrap();
                let params = SpringParams::new(stiffness, damping, return_force).unwrap();
                let mut spring = SpringBone::from_rest(&skeleton, bone, params).unwrap();

                let mut previous = 0.0_f32;
                for i in 1..=10_000 {
                    let t = i as f32 * DT;
                    let driver = (t * 3.0).sin() * 0.8;
                    spring.step(DT, Vec3::splat(driver - previous), &mut skeleton);
                    previous = driver;

                    assert!(
                        spring.offset().is_finite() && spring.offset().abs().max_element() < 10.0,
                        "diverged at step {i} with {params:?}: {:?}",
                        spring.offset()
                    );
                }
            }
        }
    }
}

#[test]
fn spring_long_frame_is_clamped() {
    let (mut skeleton, _) = rig_skeleton();
    let bone = skeleton.find("Bone1").unwrap();
    let params = SpringParams::new(1.0, 0.01, 1.0).unwrap();
    let mut spring = SpringBone::from_rest(&skeleton, bone, params).unwrap();

    spring.step(5.0, Vec3::X, &mut skeleton);
    assert!(spring.offset().is_finite());
    assert!(spring.offset().x.abs() < 5.0);
}

#[test]
fn spring_missing_bone_is_noop() {
    let (mut skeleton, _) = rig_skeleton();
    let mut spring = SpringBone::new(BoneHandle::default(), Vec3::ZERO, SpringParams::default());

    spring.step(DT, Vec3::ONE, &mut skeleton);
    assert_eq!(spring.offset(), Vec3::ZERO);
    assert_eq!(spring.velocity(), Vec3::ZERO);
}

#[test]
fn spring_ignores_invalid_dt() {
    let (mut skeleton, _) = rig_skeleton();
    let bone = skeleton.find("Bone1").unwrap();
    let mut spring = SpringBone::from_rest(&skeleton, bone, SpringParams::default()).unwrap();

    for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        spring.step(dt, Vec3::ONE, &mut skeleton);
    }
    assert_eq!(spring.offset(), Vec3::ZERO);
}

#[test]
fn spring_base_is_rest_rotation() {
    let mut skeleton = Skeleton::new();
    let mut transform = Transform::new();
    transform.rotation = Quat::from_rotation_z(0.5);
    let bone = skeleton.add_bone("Tail", transform, None);

    let spring = SpringBone::from_rest(&skeleton, bone, SpringParams::default()).unwrap();
    assert!((spring.base_rotation().z - 0.5).abs() < 1e-5);
}

// ============================================================================
// WiggleRig
// ============================================================================

#[test]
fn rig_binds_only_present_bones() {
    let (skeleton, _) = rig_skeleton();
    let mut rig = WiggleRig::new();

    let bound = rig.bind(
        &skeleton,
        &["Bone1", "Bone2", "Antenna", "Bone3", "Tail"],
        SpringParams::default(),
    );

    assert_eq!(bound.as_slice(), ["Bone1", "Bone2", "Bone3"]);
    assert_eq!(rig.len(), 3);
}

#[test]
fn rig_first_step_has_no_kick() {
    let (mut skeleton, _) = rig_skeleton();
    let mut rig = WiggleRig::new();
    rig.bind(&skeleton, &["Bone1"], SpringParams::default());

    rig.step(DT, Vec3::new(1.0, 1.0, 1.0), &mut skeleton);
    assert_eq!(rig.springs()[0].offset(), Vec3::ZERO);

    rig.step(DT, Vec3::new(1.2, 1.0, 1.0), &mut skeleton);
    assert!(rig.springs()[0].offset().x > 0.0);
}

#[test]
fn rig_rebind_discards_spring_state() {
    let (mut skeleton, _) = rig_skeleton();
    let mut rig = WiggleRig::new();
    rig.bind(&skeleton, &["Bone1", "Bone2"], SpringParams::default());

    for i in 0..30 {
        rig.step(DT, Vec3::splat(i as f32 * 0.05), &mut skeleton);
    }
    assert!(rig.springs().iter().any(|s| s.offset() != Vec3::ZERO));

    let params = SpringParams::from_velocity(0.8).unwrap();
    let bound = rig.rebind(&skeleton, params);

    assert_eq!(bound.len(), 2);
    assert_eq!(rig.params(), params);
    for spring in rig.springs() {
        assert_eq!(spring.offset(), Vec3::ZERO);
        assert_eq!(spring.velocity(), Vec3::ZERO);
        assert_eq!(spring.params(), params);
    }
}

#[test]
fn rig_on_empty_skeleton_is_empty() {
    let mut skeleton = Skeleton::new();
    let mut rig = WiggleRig::new();
    let bound = rig.bind(&skeleton, &["Bone1"], SpringParams::default());

    assert!(bound.is_empty());
    assert!(rig.is_empty());
    rig.step(DT, Vec3::ONE, &mut skeleton);
}

#[test]
fn rig_never_springs_its_driver() {
    let (skeleton, _) = rig_skeleton();
    let driver = skeleton.find("Bone1");
    let mut rig = WiggleRig::new();

    let bound = rig.bind_around(
        &skeleton,
        &["Bone1", "Bone2", "Bone3"],
        SpringParams::default(),
        driver,
    );
    assert_eq!(bound.as_slice(), ["Bone2", "Bone3"]);

    let bound = rig.rebind(&skeleton, SpringParams::from_velocity(0.8).unwrap());
    assert_eq!(bound.as_slice(), ["Bone2", "Bone3"]);
}

#[test]
fn rig_clamps_invalid_params() {
    let (skeleton, _) = rig_skeleton();
    let mut rig = WiggleRig::new();
    let params = SpringParams {
        damping: f32::NAN,
        ..SpringParams::default()
    };

    rig.bind(&skeleton, &["Bone1"], params);

    assert!(rig.params().validate().is_ok());
    assert!(rig.matches(params));
    assert!(!rig.matches(SpringParams::from_velocity(0.9).unwrap()));
}
