//! Fixed-step rig runner and result recording.

use std::collections::BTreeMap;

use rf_project::{Project, SimDef};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::binding::{BoundMotor, bind_all};
use crate::command::CommandSchedule;
use crate::error::{SimError, SimResult};
use crate::motor::TickOutputs;
use crate::rig::BenchRig;

/// Options for rig runs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed tick period (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of ticks (safety limit)
    pub max_steps: usize,
    /// Record every N-th tick (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 1_000_000,
            record_every: 10,
        }
    }
}

impl SimOptions {
    pub fn from_def(def: &SimDef) -> Self {
        Self {
            dt: def.dt_s,
            t_end: def.t_end_s,
            record_every: def.record_every,
            ..Self::default()
        }
    }
}

/// One motor's tick, flattened for export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorSample {
    pub motor_number: u32,
    /// Commanded speed before clamping (rad/s)
    pub command: f64,
    /// Filtered reference speed (rad/s)
    pub reference_speed: f64,
    /// De-scaled rotor speed seen this tick (rad/s)
    pub real_speed: f64,
    pub joint_velocity_command: f64,
    pub thrust_n: f64,
    pub reaction_torque_nm: f64,
    pub drag_n: [f64; 3],
    pub rolling_moment_nm: [f64; 3],
    pub aliasing: bool,
}

impl MotorSample {
    fn from_tick(motor_number: u32, command: f64, out: &TickOutputs) -> Self {
        Self {
            motor_number,
            command,
            reference_speed: out.reference_speed,
            real_speed: out.real_speed,
            joint_velocity_command: out.joint_velocity_command,
            thrust_n: out.thrust.z,
            reaction_torque_nm: out.reaction_torque.z,
            drag_n: out.drag.into(),
            rolling_moment_nm: out.rolling_moment.into(),
            aliasing: out.aliasing.is_some(),
        }
    }
}

/// Record of a rig run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// Per time point, one sample per motor in configuration order
    pub samples: Vec<Vec<MotorSample>>,
    /// Ticks flagged for aliasing, by motor number (all ticks, not only recorded ones)
    pub aliasing_ticks: BTreeMap<u32, usize>,
    /// Number of ticks run
    pub steps: usize,
}

impl SimRecord {
    /// Time series of one motor.
    pub fn motor_series(&self, motor_number: u32) -> Vec<(f64, &MotorSample)> {
        self.t
            .iter()
            .zip(&self.samples)
            .filter_map(|(t, row)| {
                row.iter()
                    .find(|s| s.motor_number == motor_number)
                    .map(|s| (*t, s))
            })
            .collect()
    }

    pub fn last(&self) -> Option<&[MotorSample]> {
        self.samples.last().map(Vec::as_slice)
    }
}

/// Bind the project's motors to a fresh [`BenchRig`] and run it.
pub fn run_rig(project: &Project, opts: &SimOptions) -> SimResult<SimRecord> {
    let mut rig = BenchRig::from_project(project);
    let motors = bind_all(&project.motors, project.direction_convention, &rig)?;
    let schedule = CommandSchedule::from_defs(&project.commands);
    info!(
        project = %project.name,
        motors = motors.len(),
        dt = opts.dt,
        t_end = opts.t_end,
        "starting rig run"
    );
    run_bound(&mut rig, motors, &schedule, opts)
}

/// Tick already-bound motors on `rig` until `t_end`.
///
/// Each tick, every motor is updated at the tick's simulation time and then
/// the rig steps its physics, so a joint velocity command is seen by the
/// motor on the following tick.
pub fn run_bound(
    rig: &mut BenchRig,
    mut motors: Vec<BoundMotor>,
    schedule: &CommandSchedule,
    opts: &SimOptions,
) -> SimResult<SimRecord> {
    if opts.dt <= 0.0 || !opts.dt.is_finite() {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if opts.t_end < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let mut record = SimRecord::default();
    let mut step = 0;
    let mut t = 0.0;

    // Stop half a step early so rounding in t does not add a tick.
    let running = |t: f64, step: usize| t < opts.t_end - 0.5 * opts.dt && step < opts.max_steps;
    while running(t, step) {
        step += 1;
        t = step as f64 * opts.dt;

        rig.begin_tick();
        let mut row = Vec::with_capacity(motors.len());
        for bound in &mut motors {
            let (joint, link) =
                rig.pair_mut(&bound.joint, &bound.link)
                    .ok_or_else(|| SimError::ConfigurationMissing {
                        motor_number: bound.model.id().number(),
                        what: format!(
                            "joint \"{}\" or link \"{}\" vanished from the rig",
                            bound.joint, bound.link
                        ),
                    })?;
            let id = bound.model.id();
            let command = schedule.speed_at(&bound.model.params().command_channel, t, id);
            let out = bound.model.tick(t, command, joint, link);
            if out.aliasing.is_some() {
                *record.aliasing_ticks.entry(id.number()).or_default() += 1;
            }
            row.push(MotorSample::from_tick(id.number(), command, &out));
        }
        rig.step_physics();

        // Always record the final tick.
        if step % opts.record_every == 0 || !running(t, step) {
            record.t.push(t);
            record.samples.push(row);
        }
    }

    record.steps = step;
    debug!(steps = step, recorded = record.t.len(), "rig run finished");
    Ok(record)
}
