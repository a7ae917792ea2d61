//! Setup: resolve a configured motor against the host model.

use std::sync::Arc;

use rf_core::{DirectionConvention, MotorId};
use rf_project::MotorDef;
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::host::HostModel;
use crate::motor::{MotorModel, MotorParams};

/// A motor model together with the host names it drives.
#[derive(Clone, Debug)]
pub struct BoundMotor {
    pub model: MotorModel,
    pub joint: String,
    pub link: String,
}

/// Resolve joint, link and turning direction for `def` and build its model.
///
/// # Errors
///
/// [`SimError::ConfigurationMissing`] when any of the three is absent or the
/// joint/link name does not exist in `host`. No motor is built in that case.
pub fn bind_motor<H: HostModel + ?Sized>(
    def: &MotorDef,
    convention: DirectionConvention,
    host: &H,
) -> SimResult<BoundMotor> {
    let motor_number = def.motor_number;
    let missing = |what: String| SimError::ConfigurationMissing { motor_number, what };

    let joint = def
        .joint_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| missing("please specify a joint_name, where the rotor is attached".into()))?;
    if !host.has_joint(joint) {
        return Err(missing(format!("couldn't find specified joint \"{joint}\"")));
    }

    let link = def
        .link_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| missing("please specify a link_name of the rotor".into()))?;
    if !host.has_link(link) {
        return Err(missing(format!("couldn't find specified link \"{link}\"")));
    }

    let direction = def
        .turning_direction
        .ok_or_else(|| missing("please specify a turning direction ('cw' or 'ccw')".into()))?;

    let params = Arc::new(MotorParams::from_def(&def.params)?);
    debug!(motor = motor_number, ?params, "motor parameters");

    let model = MotorModel::new(
        MotorId::from_number(motor_number)?,
        direction,
        convention,
        params,
    )?;
    info!(
        motor = motor_number,
        joint,
        link,
        %direction,
        "motor model bound"
    );

    Ok(BoundMotor {
        model,
        joint: joint.to_string(),
        link: link.to_string(),
    })
}

/// Bind every motor of a project; the first failure aborts setup.
pub fn bind_all<H: HostModel + ?Sized>(
    motors: &[MotorDef],
    convention: DirectionConvention,
    host: &H,
) -> SimResult<Vec<BoundMotor>> {
    motors
        .iter()
        .map(|def| bind_motor(def, convention, host))
        .collect()
}
