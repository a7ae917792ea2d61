//! Rotor motor simulation for multirotor vehicles.
//!
//! Provides:
//! - Per-tick motor model: lagged speed response, thrust, rotor drag,
//!   reaction torque and rolling moment
//! - Narrow host traits so the model runs against any physics engine
//! - Setup-time binding of configured motors to host joints and links
//! - Motor speed command schedule
//! - In-memory bench rig and fixed-step runner

pub mod binding;
pub mod command;
pub mod error;
pub mod host;
pub mod motor;
pub mod rig;
pub mod sim;

// Re-exports for public API
pub use binding::{BoundMotor, bind_all, bind_motor};
pub use command::CommandSchedule;
pub use error::{SimError, SimResult};
pub use host::{HostModel, RotorJoint, RotorLink};
pub use motor::{
    AliasingRisk, MotorModel, MotorParams, RotorKinematics, RotorState, TickOutputs,
    perpendicular_velocity, thrust_force,
};
pub use rig::{AppliedWrench, BenchRig, RigJoint, RigLink};
pub use sim::{MotorSample, SimOptions, SimRecord, run_bound, run_rig};
