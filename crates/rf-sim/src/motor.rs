//! Rotor motor model: per-tick speed response and aerodynamic wrench.
//!
//! Each host tick the model
//!
//! 1. derives the elapsed time from the previous tick's simulation time,
//! 2. warns when the rotor spins faster than the tick rate can resolve,
//! 3. undoes the simulation slowdown on the joint speed,
//! 4. computes thrust `k_f * w^2` along the rotor z axis,
//! 5. computes induced drag `-|w| * k_d * v_perp` in world frame,
//! 6. computes reaction torque `-s * thrust * k_m` about the rotor z axis,
//! 7. computes rolling moment `-|w| * k_r * v_perp`,
//! 8. advances the response filter toward the command and derives the new
//!    joint velocity command `s * w_ref / slowdown`,
//!
//! where `v_perp` is the body velocity with its component along the joint
//! axis removed and `s` is the sign of the turning direction.
//!
//! Drag and rolling moment follow Martin & Salaün, "The True Role of
//! Accelerometer Feedback in Quadrotor Control" (ICRA 2010).

use std::sync::Arc;

use nalgebra::Vector3;
use rf_controls::{ResponseFilter, SampleConfig};
use rf_core::numeric::{ensure_non_negative, ensure_positive};
use rf_core::{DirectionConvention, MotorId, TurningDirection};
use rf_project::MotorParamsDef;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SimResult;
use crate::host::{RotorJoint, RotorLink};

/// Validated rotor parameters. Read-only once built; share with `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct MotorParams {
    /// Thrust per squared rotor speed (N s^2 / rad^2)
    pub motor_constant: f64,
    /// Reaction torque per unit thrust (m)
    pub moment_constant: f64,
    pub rotor_drag_coefficient: f64,
    pub rolling_moment_coefficient: f64,
    /// Upper clamp on the commanded speed (rad/s)
    pub max_rot_velocity: f64,
    pub time_constant_up: f64,
    pub time_constant_down: f64,
    /// Real rotor speed = joint speed * slowdown
    pub rotor_velocity_slowdown_sim: f64,
    pub command_channel: String,
}

impl MotorParams {
    pub fn from_def(def: &MotorParamsDef) -> SimResult<Self> {
        Ok(Self {
            motor_constant: ensure_non_negative(def.motor_constant, "motor_constant")?,
            moment_constant: ensure_non_negative(def.moment_constant, "moment_constant")?,
            rotor_drag_coefficient: ensure_non_negative(
                def.rotor_drag_coefficient,
                "rotor_drag_coefficient",
            )?,
            rolling_moment_coefficient: ensure_non_negative(
                def.rolling_moment_coefficient,
                "rolling_moment_coefficient",
            )?,
            max_rot_velocity: ensure_non_negative(def.max_rot_velocity, "max_rot_velocity")?,
            time_constant_up: ensure_positive(def.time_constant_up_s, "time_constant_up")?,
            time_constant_down: ensure_positive(def.time_constant_down_s, "time_constant_down")?,
            rotor_velocity_slowdown_sim: ensure_positive(
                def.rotor_velocity_slowdown_sim,
                "rotor_velocity_slowdown_sim",
            )?,
            command_channel: def.command_channel.clone(),
        })
    }
}

impl Default for MotorParams {
    fn default() -> Self {
        let def = MotorParamsDef::default();
        Self {
            motor_constant: def.motor_constant,
            moment_constant: def.moment_constant,
            rotor_drag_coefficient: def.rotor_drag_coefficient,
            rolling_moment_coefficient: def.rolling_moment_coefficient,
            max_rot_velocity: def.max_rot_velocity,
            time_constant_up: def.time_constant_up_s,
            time_constant_down: def.time_constant_down_s,
            rotor_velocity_slowdown_sim: def.rotor_velocity_slowdown_sim,
            command_channel: def.command_channel,
        }
    }
}

/// Mutable per-motor state carried between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct RotorState {
    filter: ResponseFilter,
    prev_sim_time: f64,
}

impl RotorState {
    /// Lag-filtered rotor speed the motor is currently driven at (rad/s).
    pub fn reference_speed(&self) -> f64 {
        self.filter.output()
    }

    /// Simulation time of the previous tick (s).
    pub fn prev_sim_time(&self) -> f64 {
        self.prev_sim_time
    }
}

/// Host readings for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotorKinematics {
    /// Joint angular velocity as simulated (rad/s).
    pub joint_velocity: f64,
    /// Joint rotation axis, world frame.
    pub joint_axis: Vector3<f64>,
    /// Link linear velocity, world frame (m/s).
    pub body_velocity: Vector3<f64>,
}

/// The rotor spins faster than the tick rate can resolve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AliasingRisk {
    pub motor_number: u32,
    pub rotor_hz: f64,
    pub nyquist_hz: f64,
}

/// Everything one tick produces. Not retained by the model.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutputs {
    /// Elapsed time used for this tick (s).
    pub dt: f64,
    /// De-scaled rotor speed (rad/s).
    pub real_speed: f64,
    /// Thrust, link frame (N).
    pub thrust: Vector3<f64>,
    /// Induced drag, world frame at the link origin (N).
    pub drag: Vector3<f64>,
    /// Reaction torque, link frame (N m).
    pub reaction_torque: Vector3<f64>,
    /// Rolling moment, link frame (N m).
    pub rolling_moment: Vector3<f64>,
    /// Filtered reference speed after this tick (rad/s).
    pub reference_speed: f64,
    /// Joint velocity to command for the next physics step (rad/s, simulated).
    pub joint_velocity_command: f64,
    pub aliasing: Option<AliasingRisk>,
}

impl TickOutputs {
    /// Push this tick's contributions into the host, once each.
    pub fn apply<J, L>(&self, joint: &mut J, link: &mut L)
    where
        J: RotorJoint + ?Sized,
        L: RotorLink + ?Sized,
    {
        link.add_relative_force(self.thrust);
        link.add_force(self.drag);
        link.add_relative_torque(self.reaction_torque);
        link.add_relative_torque(self.rolling_moment);
        joint.set_velocity(self.joint_velocity_command);
    }
}

/// Thrust magnitude for a de-scaled rotor speed. Even in `real_speed`.
pub fn thrust_force(motor_constant: f64, real_speed: f64) -> f64 {
    motor_constant * real_speed * real_speed
}

/// Component of `velocity` perpendicular to `axis`.
///
/// The axis is normalized first; a degenerate axis leaves the velocity as is.
pub fn perpendicular_velocity(velocity: &Vector3<f64>, axis: &Vector3<f64>) -> Vector3<f64> {
    match axis.try_normalize(f64::EPSILON) {
        Some(unit) => velocity - unit * velocity.dot(&unit),
        None => *velocity,
    }
}

/// One rotor actuator.
#[derive(Clone, Debug)]
pub struct MotorModel {
    id: MotorId,
    direction: TurningDirection,
    sign: f64,
    params: Arc<MotorParams>,
    state: RotorState,
}

impl MotorModel {
    /// Create a motor at rest, with its clock at `t = 0`.
    pub fn new(
        id: MotorId,
        direction: TurningDirection,
        convention: DirectionConvention,
        params: impl Into<Arc<MotorParams>>,
    ) -> SimResult<Self> {
        let params = params.into();
        let filter = ResponseFilter::new(params.time_constant_up, params.time_constant_down, 0.0)?;
        Ok(Self {
            id,
            direction,
            sign: convention.sign(direction),
            params,
            state: RotorState {
                filter,
                prev_sim_time: 0.0,
            },
        })
    }

    pub fn id(&self) -> MotorId {
        self.id
    }

    pub fn direction(&self) -> TurningDirection {
        self.direction
    }

    /// Sign applied to reaction torque and joint velocity command.
    pub fn sign(&self) -> f64 {
        self.sign
    }

    pub fn params(&self) -> &MotorParams {
        &self.params
    }

    pub fn state(&self) -> &RotorState {
        &self.state
    }

    pub fn reference_speed(&self) -> f64 {
        self.state.reference_speed()
    }

    /// Read the host, run one update, write the results back.
    pub fn tick<J, L>(
        &mut self,
        sim_time: f64,
        command: f64,
        joint: &mut J,
        link: &mut L,
    ) -> TickOutputs
    where
        J: RotorJoint + ?Sized,
        L: RotorLink + ?Sized,
    {
        let kinematics = RotorKinematics {
            joint_velocity: joint.angular_velocity(),
            joint_axis: joint.global_axis(),
            body_velocity: link.world_linear_velocity(),
        };
        let out = self.update(sim_time, command, &kinematics);
        out.apply(joint, link);
        out
    }

    /// One tick of the model, without touching the host.
    pub fn update(
        &mut self,
        sim_time: f64,
        command: f64,
        kinematics: &RotorKinematics,
    ) -> TickOutputs {
        let dt = sim_time - self.state.prev_sim_time;
        self.state.prev_sim_time = sim_time;

        // Uses this tick's dt; must stay after the clock update.
        let aliasing = self.check_aliasing(kinematics.joint_velocity, dt);

        let p = &*self.params;
        let real_speed = kinematics.joint_velocity * p.rotor_velocity_slowdown_sim;

        let thrust_n = thrust_force(p.motor_constant, real_speed);
        let thrust = Vector3::new(0.0, 0.0, thrust_n);

        let v_perp = perpendicular_velocity(&kinematics.body_velocity, &kinematics.joint_axis);
        let drag = -real_speed.abs() * p.rotor_drag_coefficient * v_perp;

        let reaction_torque = Vector3::new(0.0, 0.0, -self.sign * thrust_n * p.moment_constant);
        let rolling_moment = -real_speed.abs() * p.rolling_moment_coefficient * v_perp;

        // A non-finite command would otherwise clamp to full speed.
        let target = if command.is_finite() {
            command.min(p.max_rot_velocity)
        } else {
            warn!(
                motor = self.id.number(),
                command,
                "Ignoring non-finite speed command on motor [{}]; holding the current reference.",
                self.id
            );
            self.state.filter.output()
        };
        let reference_speed = self.state.filter.advance(target, dt);
        let joint_velocity_command = self.sign * reference_speed / p.rotor_velocity_slowdown_sim;

        TickOutputs {
            dt,
            real_speed,
            thrust,
            drag,
            reaction_torque,
            rolling_moment,
            reference_speed,
            joint_velocity_command,
            aliasing,
        }
    }

    /// Host rewound simulation time: restart the clock and the speed response.
    pub fn reset(&mut self, sim_time: f64, reference_speed: f64) {
        self.state.prev_sim_time = sim_time;
        self.state.filter.reset(reference_speed);
    }

    fn check_aliasing(&self, joint_velocity: f64, dt: f64) -> Option<AliasingRisk> {
        let sample = SampleConfig::from_period(dt)?;
        if !sample.aliases(joint_velocity) {
            return None;
        }

        let risk = AliasingRisk {
            motor_number: self.id.number(),
            rotor_hz: joint_velocity.abs() / std::f64::consts::TAU,
            nyquist_hz: 0.5 / dt,
        };
        warn!(
            motor = self.id.number(),
            rotor_hz = risk.rotor_hz,
            nyquist_hz = risk.nyquist_hz,
            "Aliasing on motor [{}] might occur. Consider making smaller simulation time steps or raising the rotor_velocity_slowdown_sim param.",
            self.id
        );
        Some(risk)
    }
}
