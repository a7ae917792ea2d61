//! Project schema definitions.

use rf_core::{DirectionConvention, TurningDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub direction_convention: DirectionConvention,
    #[serde(default)]
    pub sim: SimDef,
    #[serde(default)]
    pub body: BodyDef,
    #[serde(default)]
    pub motors: Vec<MotorDef>,
    #[serde(default)]
    pub commands: Vec<CommandDef>,
}

impl Project {
    pub fn motor(&self, motor_number: u32) -> Option<&MotorDef> {
        self.motors.iter().find(|m| m.motor_number == motor_number)
    }
}

/// Fixed-step run settings for the bench rig.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimDef {
    pub dt_s: f64,
    pub t_end_s: f64,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
}

impl Default for SimDef {
    fn default() -> Self {
        Self {
            dt_s: 1e-3,
            t_end_s: 1.0,
            record_every: default_record_every(),
        }
    }
}

fn default_record_every() -> usize {
    10
}

/// Prescribed motion of the rigid body the rotors are mounted on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodyDef {
    /// World-frame linear velocity (m/s).
    #[serde(default)]
    pub linear_velocity: [f64; 3],
}

/// One motor binding.
///
/// The joint, link and turning direction are optional in the file so that a
/// missing entry is reported as missing configuration instead of a parse error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorDef {
    #[serde(default)]
    pub motor_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turning_direction: Option<TurningDirection>,
    /// Rotation axis of the rotor joint in world frame.
    #[serde(default = "default_joint_axis")]
    pub joint_axis: [f64; 3],
    #[serde(default)]
    pub params: MotorParamsDef,
}

fn default_joint_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

/// Rotor parameters. Every field falls back to the values of a small
/// quadrotor rotor when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotorParamsDef {
    /// Thrust per squared rotor speed (N s^2 / rad^2).
    pub motor_constant: f64,
    /// Reaction torque per unit thrust (m).
    pub moment_constant: f64,
    /// Induced drag per rotor speed per lateral airspeed (N s^2 / (rad m)).
    pub rotor_drag_coefficient: f64,
    /// Rolling moment per rotor speed per lateral airspeed.
    pub rolling_moment_coefficient: f64,
    /// Commands above this speed are clamped (rad/s).
    pub max_rot_velocity: f64,
    pub time_constant_up_s: f64,
    pub time_constant_down_s: f64,
    /// Real rotor speed = simulated joint speed * this factor.
    pub rotor_velocity_slowdown_sim: f64,
    /// Channel the motor reads its speed command from.
    pub command_channel: String,
}

impl Default for MotorParamsDef {
    fn default() -> Self {
        Self {
            motor_constant: 8.54858e-6,
            moment_constant: 0.016,
            rotor_drag_coefficient: 1.0e-4,
            rolling_moment_coefficient: 1.0e-6,
            max_rot_velocity: 838.0,
            time_constant_up_s: 1.0 / 80.0,
            time_constant_down_s: 1.0 / 40.0,
            rotor_velocity_slowdown_sim: 10.0,
            command_channel: default_command_channel(),
        }
    }
}

pub fn default_command_channel() -> String {
    "command/motor_speed".to_string()
}

/// Motor speed command published on `channel` at `at_s`, held until the next
/// command on the same channel. `speeds[n]` is the speed of motor number `n`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandDef {
    #[serde(default = "default_command_channel")]
    pub channel: String,
    pub at_s: f64,
    pub speeds: Vec<f64>,
}
