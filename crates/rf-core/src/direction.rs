//! Rotor spin direction and its mapping to a sign.

/// Spin direction of a rotor, fixed when the motor is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TurningDirection {
    Cw,
    Ccw,
}

impl core::fmt::Display for TurningDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TurningDirection::Cw => f.write_str("cw"),
            TurningDirection::Ccw => f.write_str("ccw"),
        }
    }
}

/// Which physical handedness counts as the negative spin sign.
///
/// The sign multiplies the reaction torque and the joint velocity command.
/// It is configuration rather than a constant because vehicle descriptions
/// disagree on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DirectionConvention {
    /// CW = -1, CCW = +1
    #[default]
    CwNegative,
    /// CW = +1, CCW = -1
    CwPositive,
}

impl DirectionConvention {
    pub fn sign(self, direction: TurningDirection) -> f64 {
        match (self, direction) {
            (DirectionConvention::CwNegative, TurningDirection::Cw)
            | (DirectionConvention::CwPositive, TurningDirection::Ccw) => -1.0,
            (DirectionConvention::CwNegative, TurningDirection::Ccw)
            | (DirectionConvention::CwPositive, TurningDirection::Cw) => 1.0,
        }
    }
}
