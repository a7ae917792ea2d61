//! The motor model driven through trait objects of a fabricated host.

use nalgebra::Vector3;
use rf_core::{DirectionConvention, MotorId, TurningDirection};
use rf_sim::{MotorModel, MotorParams, RotorJoint, RotorLink};

#[derive(Default)]
struct RecordingJoint {
    omega: f64,
    commands: Vec<f64>,
}

impl RotorJoint for RecordingJoint {
    fn angular_velocity(&self) -> f64 {
        self.omega
    }

    fn global_axis(&self) -> Vector3<f64> {
        Vector3::z()
    }

    fn set_velocity(&mut self, omega: f64) {
        self.commands.push(omega);
    }
}

struct RecordingLink {
    velocity: Vector3<f64>,
    relative_forces: Vec<Vector3<f64>>,
    world_forces: Vec<Vector3<f64>>,
    relative_torques: Vec<Vector3<f64>>,
}

impl RecordingLink {
    fn moving(velocity: Vector3<f64>) -> Self {
        Self {
            velocity,
            relative_forces: vec![],
            world_forces: vec![],
            relative_torques: vec![],
        }
    }
}

impl RotorLink for RecordingLink {
    fn world_linear_velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    fn add_relative_force(&mut self, force: Vector3<f64>) {
        self.relative_forces.push(force);
    }

    fn add_force(&mut self, force: Vector3<f64>) {
        self.world_forces.push(force);
    }

    fn add_relative_torque(&mut self, torque: Vector3<f64>) {
        self.relative_torques.push(torque);
    }
}

#[test]
fn each_output_is_applied_once_per_tick() {
    let mut model = MotorModel::new(
        MotorId::from_number(2).unwrap(),
        TurningDirection::Ccw,
        DirectionConvention::CwNegative,
        MotorParams::default(),
    )
    .unwrap();

    let mut joint = RecordingJoint {
        omega: 50.0,
        ..Default::default()
    };
    let mut link = RecordingLink::moving(Vector3::new(1.0, 2.0, 0.0));

    let joint_dyn: &mut dyn RotorJoint = &mut joint;
    let link_dyn: &mut dyn RotorLink = &mut link;
    let out = model.tick(0.001, 500.0, joint_dyn, link_dyn);

    assert_eq!(joint.commands, vec![out.joint_velocity_command]);
    assert_eq!(link.relative_forces, vec![out.thrust]);
    assert_eq!(link.world_forces, vec![out.drag]);
    assert_eq!(
        link.relative_torques,
        vec![out.reaction_torque, out.rolling_moment]
    );

    // 50 rad/s joint at slowdown 10.
    assert!((out.real_speed - 500.0).abs() < 1e-12);
    assert!(out.drag.x < 0.0 && out.drag.y < 0.0);
}

#[test]
fn shared_params_drive_independent_motors() {
    let params = std::sync::Arc::new(MotorParams::default());
    let mut a = MotorModel::new(
        MotorId::from_number(0).unwrap(),
        TurningDirection::Ccw,
        DirectionConvention::CwNegative,
        params.clone(),
    )
    .unwrap();
    let mut b = MotorModel::new(
        MotorId::from_number(1).unwrap(),
        TurningDirection::Cw,
        DirectionConvention::CwNegative,
        params,
    )
    .unwrap();

    let mut ja = RecordingJoint::default();
    let mut jb = RecordingJoint::default();
    let mut la = RecordingLink::moving(Vector3::zeros());
    let mut lb = RecordingLink::moving(Vector3::zeros());

    for i in 1..=100 {
        let t = i as f64 * 0.001;
        a.tick(t, 700.0, &mut ja, &mut la);
        b.tick(t, 200.0, &mut jb, &mut lb);
    }

    assert!(a.reference_speed() > b.reference_speed());
    assert!(*ja.commands.last().unwrap() > 0.0);
    assert!(*jb.commands.last().unwrap() < 0.0);
}
