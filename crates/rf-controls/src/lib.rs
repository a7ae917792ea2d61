//! Signal-side dynamics for rotor actuators.
//!
//! This crate holds the pieces of a motor model that only deal with scalar
//! signals and sampling, independent of any rigid-body host:
//! - [`ResponseFilter`]: asymmetric first-order lag between the commanded
//!   rotor speed and the speed the motor actually reaches
//! - [`SampleConfig`]: tick-period bookkeeping and the Nyquist test used to
//!   flag rotor speeds the simulation step cannot resolve

pub mod error;
pub mod response;
pub mod sampled;

pub use error::{ControlError, ControlResult};
pub use response::ResponseFilter;
pub use sampled::SampleConfig;
