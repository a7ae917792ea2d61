use core::fmt;
use core::num::NonZeroU32;

use crate::error::{RfError, RfResult};

/// Identifier of one motor on a vehicle.
///
/// Motor numbers are 0-based in configuration and in command arrays; the
/// stored value is `number + 1` so that `Option<MotorId>` stays 4 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MotorId(NonZeroU32);

impl MotorId {
    /// `u32::MAX` has no slot left and is rejected.
    pub fn from_number(number: u32) -> RfResult<Self> {
        number
            .checked_add(1)
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(RfError::InvalidArg {
                what: "motor number must be below u32::MAX",
            })
    }

    /// 0-based motor number, also the slot in a motor-speed command array.
    pub fn number(self) -> u32 {
        self.0.get() - 1
    }

    pub fn slot(self) -> usize {
        self.number() as usize
    }
}

impl fmt::Debug for MotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MotorId({})", self.number())
    }
}

impl fmt::Display for MotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
