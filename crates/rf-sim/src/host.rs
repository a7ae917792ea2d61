//! Narrow views of the host physics engine used by the motor model.
//!
//! The motor never holds engine handles. The host passes its joint and link
//! through these traits for the duration of one tick, which keeps the model
//! testable against fabricated stand-ins.

use nalgebra::Vector3;

/// Revolute joint the rotor spins on.
pub trait RotorJoint {
    /// Current joint angular velocity (rad/s, simulated, i.e. slowed down).
    fn angular_velocity(&self) -> f64;

    /// Joint rotation axis in world frame.
    fn global_axis(&self) -> Vector3<f64>;

    /// Command the joint angular velocity for the next physics step.
    fn set_velocity(&mut self, omega: f64);
}

/// Rotor link that receives the aerodynamic wrench.
pub trait RotorLink {
    /// Link linear velocity in world frame (m/s).
    fn world_linear_velocity(&self) -> Vector3<f64>;

    /// Add a force expressed in the link frame.
    fn add_relative_force(&mut self, force: Vector3<f64>);

    /// Add a force expressed in world frame, applied at the link origin.
    fn add_force(&mut self, force: Vector3<f64>);

    /// Add a torque expressed in the link frame.
    fn add_relative_torque(&mut self, torque: Vector3<f64>);
}

/// Setup-time name lookup into the host model.
pub trait HostModel {
    fn has_joint(&self, name: &str) -> bool;
    fn has_link(&self, name: &str) -> bool;
}
