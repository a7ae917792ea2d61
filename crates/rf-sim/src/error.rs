//! Error types for motor setup and rig simulation.

use thiserror::Error;

/// Errors encountered while binding motors or running the rig.
#[derive(Error, Debug)]
pub enum SimError {
    /// A joint, link or turning direction is absent or does not resolve in
    /// the host. Setup aborts before any tick runs.
    #[error("Missing configuration for motor {motor_number}: {what}")]
    ConfigurationMissing { motor_number: u32, what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Rejected motor parameter or motor number.
    #[error(transparent)]
    Core(#[from] rf_core::RfError),

    #[error(transparent)]
    Control(#[from] rf_controls::ControlError),
}

pub type SimResult<T> = Result<T, SimError>;
