//! Sampling limits of a fixed-cadence simulation.
//!
//! The host samples the rotor joint once per tick. A rotor spinning faster
//! than half the tick rate aliases: the sampled joint angle no longer tells
//! which way, or how fast, the rotor really turned between ticks.

use rf_core::units::{Frequency, nyquist_frequency, s, spin_frequency};
use serde::{Deserialize, Serialize};

/// Sample configuration derived from the elapsed time between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Sample period in seconds.
    pub dt: f64,
}

impl SampleConfig {
    /// Sample configuration for a tick period, or `None` if the period is
    /// not a positive finite number (first tick, time reset).
    pub fn from_period(dt: f64) -> Option<Self> {
        (dt.is_finite() && dt > 0.0).then_some(Self { dt })
    }

    /// Highest representable rotation frequency, `1 / (2 dt)`.
    pub fn nyquist(&self) -> Frequency {
        nyquist_frequency(s(self.dt))
    }

    /// True when a rotor spinning at `omega_rad_s` is under-sampled,
    /// i.e. `|omega| / (2 pi) > 1 / (2 dt)`.
    ///
    /// The magnitude is compared, so a rotor spinning at a negative joint
    /// velocity (CW under the default convention) is checked too. A signed
    /// comparison would never flag it. Exactly at the Nyquist frequency the
    /// rotor is not flagged.
    pub fn aliases(&self, omega_rad_s: f64) -> bool {
        spin_frequency(omega_rad_s.abs()) > self.nyquist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;
    use uom::si::frequency::hertz;

    #[test]
    fn sample_config_from_period() {
        let config = SampleConfig::from_period(0.001).unwrap();
        assert_eq!(config.dt, 0.001);
        assert!((config.nyquist().get::<hertz>() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_periods_have_no_config() {
        assert!(SampleConfig::from_period(0.0).is_none());
        assert!(SampleConfig::from_period(-0.001).is_none());
        assert!(SampleConfig::from_period(f64::NAN).is_none());
        assert!(SampleConfig::from_period(f64::INFINITY).is_none());
    }

    #[test]
    fn aliasing_boundary_at_one_kilohertz() {
        let config = SampleConfig::from_period(0.001).unwrap();
        // 600 Hz rotor against a 500 Hz Nyquist limit.
        assert!(config.aliases(600.0 * TAU));
        assert!(config.aliases(-600.0 * TAU));
        assert!(!config.aliases(400.0 * TAU));
        assert!(config.aliases(501.0 * TAU));
        assert!(!config.aliases(499.0 * TAU));
    }

    #[test]
    fn exactly_nyquist_is_not_aliasing() {
        let config = SampleConfig::from_period(0.001).unwrap();
        // The inequality is strict: 500 Hz at 1 kHz ticks is still resolved.
        assert!(!config.aliases(500.0 * TAU));
        assert!(!config.aliases(-500.0 * TAU));
    }
}
