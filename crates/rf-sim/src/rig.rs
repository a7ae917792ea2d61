//! In-memory test bench standing in for a physics engine.
//!
//! Joints are velocity-controlled: a velocity set during a tick becomes the
//! joint's angular velocity when the rig steps. Links move with a prescribed
//! body velocity and accumulate the wrench applied to them during one tick.

use std::collections::HashMap;

use nalgebra::Vector3;
use rf_project::Project;

use crate::host::{HostModel, RotorJoint, RotorLink};

#[derive(Clone, Debug, PartialEq)]
pub struct RigJoint {
    pub axis: Vector3<f64>,
    pub angular_velocity: f64,
    pending_velocity: Option<f64>,
}

impl RigJoint {
    pub fn new(axis: Vector3<f64>) -> Self {
        Self {
            axis,
            angular_velocity: 0.0,
            pending_velocity: None,
        }
    }

    pub fn pending_velocity(&self) -> Option<f64> {
        self.pending_velocity
    }
}

impl RotorJoint for RigJoint {
    fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    fn global_axis(&self) -> Vector3<f64> {
        self.axis
    }

    fn set_velocity(&mut self, omega: f64) {
        self.pending_velocity = Some(omega);
    }
}

/// Sum of what was applied to a link during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedWrench {
    pub relative_force: Vector3<f64>,
    pub world_force: Vector3<f64>,
    pub relative_torque: Vector3<f64>,
}

impl Default for AppliedWrench {
    fn default() -> Self {
        Self {
            relative_force: Vector3::zeros(),
            world_force: Vector3::zeros(),
            relative_torque: Vector3::zeros(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RigLink {
    pub linear_velocity: Vector3<f64>,
    pub wrench: AppliedWrench,
}

impl RigLink {
    pub fn new(linear_velocity: Vector3<f64>) -> Self {
        Self {
            linear_velocity,
            wrench: AppliedWrench::default(),
        }
    }
}

impl RotorLink for RigLink {
    fn world_linear_velocity(&self) -> Vector3<f64> {
        self.linear_velocity
    }

    fn add_relative_force(&mut self, force: Vector3<f64>) {
        self.wrench.relative_force += force;
    }

    fn add_force(&mut self, force: Vector3<f64>) {
        self.wrench.world_force += force;
    }

    fn add_relative_torque(&mut self, torque: Vector3<f64>) {
        self.wrench.relative_torque += torque;
    }
}

#[derive(Clone, Debug, Default)]
pub struct BenchRig {
    joints: HashMap<String, RigJoint>,
    links: HashMap<String, RigLink>,
}

impl BenchRig {
    /// One joint and one link per configured motor, all links moving with
    /// the project's body velocity.
    pub fn from_project(project: &Project) -> Self {
        let body = Vector3::from(project.body.linear_velocity);
        let mut rig = Self::default();
        for motor in &project.motors {
            if let Some(joint) = &motor.joint_name {
                rig.insert_joint(joint, RigJoint::new(Vector3::from(motor.joint_axis)));
            }
            if let Some(link) = &motor.link_name {
                rig.insert_link(link, RigLink::new(body));
            }
        }
        rig
    }

    pub fn insert_joint(&mut self, name: &str, joint: RigJoint) {
        self.joints.insert(name.to_string(), joint);
    }

    pub fn insert_link(&mut self, name: &str, link: RigLink) {
        self.links.insert(name.to_string(), link);
    }

    pub fn joint(&self, name: &str) -> Option<&RigJoint> {
        self.joints.get(name)
    }

    pub fn link(&self, name: &str) -> Option<&RigLink> {
        self.links.get(name)
    }

    /// Mutable joint and link for one motor's tick.
    pub fn pair_mut(&mut self, joint: &str, link: &str) -> Option<(&mut RigJoint, &mut RigLink)> {
        let joint = self.joints.get_mut(joint)?;
        let link = self.links.get_mut(link)?;
        Some((joint, link))
    }

    /// Start a tick: forget the wrench accumulated during the previous one.
    pub fn begin_tick(&mut self) {
        for link in self.links.values_mut() {
            link.wrench = AppliedWrench::default();
        }
    }

    /// Physics step: commanded joint velocities take effect.
    pub fn step_physics(&mut self) {
        for joint in self.joints.values_mut() {
            if let Some(omega) = joint.pending_velocity.take() {
                joint.angular_velocity = omega;
            }
        }
    }
}

impl HostModel for BenchRig {
    fn has_joint(&self, name: &str) -> bool {
        self.joints.contains_key(name)
    }

    fn has_link(&self, name: &str) -> bool {
        self.links.contains_key(name)
    }
}
