use approx::assert_abs_diff_eq;
use axis_interp_core::{AnimationTime, InterpolationAxis, Pose, RotationStrategy, Vector3, Vector4};
use axis_interp_test_fixtures::scenarios;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Scenario {
    description: String,
    start: Pose,
    end: Pose,
    strategy: RotationStrategy,
    animation_length_ms: f64,
    samples: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
    t_ms: f64,
    position: Option<Vector3>,
    rotation_euler: Option<Vector3>,
    rotation_quaternion: Option<Vector4>,
}

fn same_rotation(a: Vector4, b: Vector4) -> f64 {
    (a - b).length().min((a + b).length())
}

fn run_scenario(name: &str) {
    let scenario: Scenario = scenarios::load(name).unwrap();
    let length = AnimationTime::from_millis(scenario.animation_length_ms).unwrap();
    let mut axis = InterpolationAxis::new(scenario.start, scenario.end, scenario.strategy, length).unwrap();

    for sample in &scenario.samples {
        let t = AnimationTime::from_millis(sample.t_ms).unwrap();
        let pose = *axis.tick(t);
        assert_eq!(pose, axis.pose_at(t), "{name}: tick and pose_at disagree");

        if let Some(expected) = sample.position {
            assert_abs_diff_eq!(
                nalgebra::Vector3::from(pose.position()),
                nalgebra::Vector3::from(expected),
                epsilon = 1e-9
            );
        }
        if let Some(expected) = sample.rotation_euler {
            assert_abs_diff_eq!(
                nalgebra::Vector3::from(pose.rotation_euler()),
                nalgebra::Vector3::from(expected),
                epsilon = 1e-9
            );
        }
        if let Some(expected) = sample.rotation_quaternion {
            let diff = same_rotation(pose.rotation_quaternion(), expected);
            assert!(
                diff < 1e-6,
                "{name} ({}) at {} ms: {:?} vs {:?}",
                scenario.description,
                sample.t_ms,
                pose.rotation_quaternion(),
                expected
            );
        }
    }
}

#[test]
fn every_scenario_passes() {
    let keys = scenarios::keys().unwrap();
    assert!(!keys.is_empty());
    for key in keys {
        run_scenario(&key);
    }
}

#[test]
fn position_midpoint() {
    run_scenario("position-midpoint");
}

#[test]
fn slerp_quarter_turn_z() {
    run_scenario("slerp-quarter-turn-z");
}

#[test]
fn antipodal_identity() {
    run_scenario("antipodal-identity");
}

#[test]
fn euler_no_wrap() {
    run_scenario("euler-no-wrap");
}
