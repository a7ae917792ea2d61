//! Integration tests: full rig runs from project definitions.

use std::path::Path;

use rf_core::{DirectionConvention, TurningDirection};
use rf_project::{BodyDef, CommandDef, MotorDef, MotorParamsDef, Project, SimDef};
use rf_sim::{SimError, SimOptions, run_rig};

fn motor(n: u32, direction: TurningDirection) -> MotorDef {
    MotorDef {
        motor_number: n,
        joint_name: Some(format!("rotor_{n}_joint")),
        link_name: Some(format!("rotor_{n}")),
        turning_direction: Some(direction),
        joint_axis: [0.0, 0.0, 1.0],
        params: MotorParamsDef::default(),
    }
}

fn project(motors: Vec<MotorDef>, speeds: Vec<f64>) -> Project {
    Project {
        version: 1,
        name: "test rig".to_string(),
        namespace: None,
        direction_convention: DirectionConvention::CwNegative,
        sim: SimDef {
            dt_s: 0.001,
            t_end_s: 0.5,
            record_every: 10,
        },
        body: BodyDef::default(),
        motors,
        commands: vec![CommandDef {
            channel: "command/motor_speed".to_string(),
            at_s: 0.0,
            speeds,
        }],
    }
}

#[test]
fn hover_demo_settles_on_second_command() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/projects/quad_hover.yaml");
    let project = rf_project::load_yaml(&path).expect("demo project loads");
    let record = run_rig(&project, &SimOptions::from_def(&project.sim)).unwrap();

    assert_eq!(record.steps, 1000);
    assert!(record.aliasing_ticks.is_empty());

    let last = record.last().unwrap();
    assert_eq!(last.len(), 4);
    let k = MotorParamsDef::default().motor_constant;
    for sample in last {
        assert!((sample.reference_speed - 300.0).abs() < 1e-3);
        assert!((sample.thrust_n - k * 300.0 * 300.0).abs() < 1e-4);
    }

    // Opposite spin directions cancel their reaction torques.
    let yaw: f64 = last.iter().map(|s| s.reaction_torque_nm).sum();
    assert!(yaw.abs() < 1e-6);
    assert!(last[0].reaction_torque_nm < 0.0);
    assert!(last[1].reaction_torque_nm > 0.0);
}

#[test]
fn spin_up_is_monotone_and_reaches_target() {
    let p = project(vec![motor(0, TurningDirection::Ccw)], vec![600.0]);
    let opts = SimOptions {
        record_every: 1,
        ..SimOptions::from_def(&p.sim)
    };
    let record = run_rig(&p, &opts).unwrap();

    let series = record.motor_series(0);
    assert_eq!(series.len(), 500);
    let mut prev = 0.0;
    for (_, s) in &series {
        assert!(s.reference_speed >= prev);
        assert!(s.reference_speed <= 600.0);
        prev = s.reference_speed;
    }
    assert!((prev - 600.0).abs() < 1e-6);
}

#[test]
fn joint_command_reaches_rotor_next_tick() {
    let p = project(vec![motor(0, TurningDirection::Cw)], vec![400.0]);
    let opts = SimOptions {
        record_every: 1,
        t_end: 0.01,
        ..SimOptions::from_def(&p.sim)
    };
    let record = run_rig(&p, &opts).unwrap();
    let series = record.motor_series(0);

    // First tick sees a resting joint.
    assert_eq!(series[0].1.real_speed, 0.0);
    assert_eq!(series[0].1.thrust_n, 0.0);
    for pair in series.windows(2) {
        let (prev, next) = (pair[0].1, pair[1].1);
        // CW joint is commanded negative; de-scaling restores the sign.
        assert!(prev.joint_velocity_command < 0.0);
        assert!((next.real_speed - prev.joint_velocity_command * 10.0).abs() < 1e-9);
        assert!((next.real_speed + prev.reference_speed).abs() < 1e-9);
    }
}

#[test]
fn command_clamped_to_max_rot_velocity() {
    let p = project(vec![motor(0, TurningDirection::Ccw)], vec![2000.0]);
    let record = run_rig(&p, &SimOptions::from_def(&p.sim)).unwrap();
    let last = &record.last().unwrap()[0];
    assert_eq!(last.command, 2000.0);
    assert!((last.reference_speed - 838.0).abs() < 1e-6);
}

#[test]
fn forward_flight_drag_opposes_lateral_motion() {
    let mut p = project(
        vec![motor(0, TurningDirection::Ccw), motor(1, TurningDirection::Cw)],
        vec![500.0, 500.0],
    );
    p.body.linear_velocity = [5.0, 0.0, -2.0];
    let record = run_rig(&p, &SimOptions::from_def(&p.sim)).unwrap();

    for sample in record.last().unwrap() {
        assert!(sample.drag_n[0] < 0.0);
        assert_eq!(sample.drag_n[1], 0.0);
        assert_eq!(sample.drag_n[2], 0.0);
        assert!(sample.rolling_moment_nm[0] < 0.0);
        let expected = -500.0 * MotorParamsDef::default().rotor_drag_coefficient * 5.0;
        assert!((sample.drag_n[0] - expected).abs() < 1e-6);
    }
}

#[test]
fn climbing_along_axis_has_no_drag() {
    let mut p = project(vec![motor(0, TurningDirection::Ccw)], vec![500.0]);
    p.body.linear_velocity = [0.0, 0.0, 3.0];
    let record = run_rig(&p, &SimOptions::from_def(&p.sim)).unwrap();
    for (_, s) in record.motor_series(0) {
        assert_eq!(s.drag_n, [0.0, 0.0, 0.0]);
        assert_eq!(s.rolling_moment_nm, [0.0, 0.0, 0.0]);
    }
}

#[test]
fn coarse_ticks_report_aliasing_without_aborting() {
    let mut m = motor(3, TurningDirection::Ccw);
    m.params.rotor_velocity_slowdown_sim = 1.0;
    let mut p = project(vec![m], vec![0.0, 0.0, 0.0, 838.0]);
    p.sim.dt_s = 0.01;
    p.sim.t_end_s = 0.5;

    let record = run_rig(&p, &SimOptions::from_def(&p.sim)).unwrap();
    assert_eq!(record.steps, 50);
    // 838 rad/s is 133 Hz against a 50 Hz Nyquist limit once spun up.
    let flagged = record.aliasing_ticks.get(&3).copied().unwrap_or(0);
    assert!(flagged > 0);
    assert!(flagged < record.steps);
    assert!(record.last().unwrap()[0].aliasing);
}

#[test]
fn missing_link_aborts_setup() {
    let mut m = motor(1, TurningDirection::Cw);
    m.link_name = None;
    let p = project(vec![motor(0, TurningDirection::Ccw), m], vec![500.0, 500.0]);

    match run_rig(&p, &SimOptions::from_def(&p.sim)) {
        Err(SimError::ConfigurationMissing { motor_number, .. }) => assert_eq!(motor_number, 1),
        other => panic!("expected ConfigurationMissing, got {other:?}"),
    }
}

#[test]
fn missing_direction_aborts_setup() {
    let mut m = motor(0, TurningDirection::Cw);
    m.turning_direction = None;
    let p = project(vec![m], vec![500.0]);
    assert!(matches!(
        run_rig(&p, &SimOptions::from_def(&p.sim)),
        Err(SimError::ConfigurationMissing { .. })
    ));
}

#[test]
fn direction_convention_flips_yaw_torque() {
    let mut p = project(vec![motor(0, TurningDirection::Ccw)], vec![500.0]);
    let a = run_rig(&p, &SimOptions::from_def(&p.sim)).unwrap();
    p.direction_convention = DirectionConvention::CwPositive;
    let b = run_rig(&p, &SimOptions::from_def(&p.sim)).unwrap();

    let ta = a.last().unwrap()[0].reaction_torque_nm;
    let tb = b.last().unwrap()[0].reaction_torque_nm;
    assert!(ta != 0.0);
    assert!((ta + tb).abs() < 1e-12);
    assert!((a.last().unwrap()[0].thrust_n - b.last().unwrap()[0].thrust_n).abs() < 1e-12);
}
