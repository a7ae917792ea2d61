//! Project validation logic.

use crate::schema::{BodyDef, CommandDef, MotorDef, MotorParamsDef, Project, SimDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing configuration: {field} for motor {motor_number}")]
    ConfigurationMissing {
        field: &'static str,
        motor_number: u32,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_sim(&project.sim)?;
    validate_body(&project.body)?;

    let mut motor_numbers = HashSet::new();
    let mut joint_names = HashSet::new();
    for motor in &project.motors {
        if !motor_numbers.insert(motor.motor_number) {
            return Err(ValidationError::DuplicateId {
                id: motor.motor_number.to_string(),
                context: "motor numbers".to_string(),
            });
        }
        validate_motor(motor)?;
        if let Some(joint) = &motor.joint_name
            && !joint_names.insert(joint.as_str())
        {
            return Err(ValidationError::DuplicateId {
                id: joint.clone(),
                context: "motor joints".to_string(),
            });
        }
    }

    for (idx, command) in project.commands.iter().enumerate() {
        validate_command(idx, command)?;
    }

    Ok(())
}

fn validate_sim(sim: &SimDef) -> Result<(), ValidationError> {
    positive(sim.dt_s, "sim dt_s")?;
    if !sim.t_end_s.is_finite() || sim.t_end_s < 0.0 {
        return Err(invalid("sim t_end_s", sim.t_end_s, "must be non-negative and finite"));
    }
    if sim.record_every == 0 {
        return Err(invalid("sim record_every", 0, "must be at least 1"));
    }
    Ok(())
}

fn validate_body(body: &BodyDef) -> Result<(), ValidationError> {
    if body.linear_velocity.iter().any(|v| !v.is_finite()) {
        return Err(invalid(
            "body linear_velocity",
            format!("{:?}", body.linear_velocity),
            "components must be finite",
        ));
    }
    Ok(())
}

fn validate_motor(motor: &MotorDef) -> Result<(), ValidationError> {
    let missing = |field| ValidationError::ConfigurationMissing {
        field,
        motor_number: motor.motor_number,
    };

    if motor.motor_number == u32::MAX {
        return Err(invalid(
            "motor_number",
            motor.motor_number,
            "must be below u32::MAX",
        ));
    }

    match &motor.joint_name {
        Some(name) if !name.trim().is_empty() => {}
        _ => return Err(missing("joint_name")),
    }
    match &motor.link_name {
        Some(name) if !name.trim().is_empty() => {}
        _ => return Err(missing("link_name")),
    }
    if motor.turning_direction.is_none() {
        return Err(missing("turning_direction"));
    }

    let axis = motor.joint_axis;
    let norm = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
    if !norm.is_finite() || norm < 1e-9 {
        return Err(invalid(
            format!("motor {} joint_axis", motor.motor_number),
            format!("{axis:?}"),
            "must be a finite non-zero vector",
        ));
    }

    validate_params(motor.motor_number, &motor.params)
}

fn validate_params(motor_number: u32, params: &MotorParamsDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("motor {motor_number} {name}");

    for (name, value) in [
        ("motor_constant", params.motor_constant),
        ("moment_constant", params.moment_constant),
        ("rotor_drag_coefficient", params.rotor_drag_coefficient),
        ("rolling_moment_coefficient", params.rolling_moment_coefficient),
        ("max_rot_velocity", params.max_rot_velocity),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(field(name), value, "must be non-negative and finite"));
        }
    }

    positive(params.time_constant_up_s, &field("time_constant_up_s"))?;
    positive(params.time_constant_down_s, &field("time_constant_down_s"))?;
    positive(
        params.rotor_velocity_slowdown_sim,
        &field("rotor_velocity_slowdown_sim"),
    )?;

    if params.command_channel.trim().is_empty() {
        return Err(invalid(field("command_channel"), "\"\"", "must not be empty"));
    }
    Ok(())
}

fn validate_command(idx: usize, command: &CommandDef) -> Result<(), ValidationError> {
    if command.channel.trim().is_empty() {
        return Err(invalid(
            format!("command #{idx} channel"),
            "\"\"",
            "must not be empty",
        ));
    }
    if !command.at_s.is_finite() || command.at_s < 0.0 {
        return Err(invalid(
            format!("command #{idx} at_s"),
            command.at_s,
            "must be non-negative and finite",
        ));
    }
    if let Some(bad) = command.speeds.iter().find(|v| !v.is_finite()) {
        return Err(invalid(
            format!("command #{idx} speeds"),
            bad,
            "must be finite",
        ));
    }
    Ok(())
}

fn positive(value: f64, field: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn invalid(
    field: impl Into<String>,
    value: impl ToString,
    reason: &str,
) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
