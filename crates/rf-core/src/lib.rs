//! rf-core: shared foundation for rotorflow.
//!
//! Contains:
//! - units (uom SI types for rotor quantities + constructors)
//! - numeric (float guards for parameter validation)
//! - ids (motor identifiers)
//! - direction (rotor spin direction + sign convention)
//! - error (shared error types)

pub mod direction;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use direction::{DirectionConvention, TurningDirection};
pub use error::{RfError, RfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
