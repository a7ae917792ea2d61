//! Asymmetric first-order response of a rotor to a speed command.
//!
//! A propeller motor does not reach a commanded speed instantly. Its response
//! is modelled as a first-order lag whose time constant depends on direction:
//! spinning up is limited by the motor torque, spinning down by aerodynamic
//! braking, so the two legs use separate constants.

use crate::error::ControlResult;
use rf_core::numeric::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// First-order lag with independent rise and fall time constants.
///
/// Discrete update over an elapsed time `dt`:
///
/// ```text
/// tau    = tau_up    if target > output
///        = tau_down  otherwise
/// output = output + (target - output) * (1 - exp(-dt / tau))
/// ```
///
/// The output is only ever advanced incrementally, one step per call, so a
/// trajectory depends on the cadence of calls and not just on elapsed time.
///
/// # Example
///
/// ```
/// use rf_controls::ResponseFilter;
///
/// let mut filter = ResponseFilter::new(1.0 / 80.0, 1.0 / 40.0, 0.0).unwrap();
/// for _ in 0..1000 {
///     filter.advance(500.0, 0.001);
/// }
/// assert!((filter.output() - 500.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseFilter {
    /// Time constant while accelerating (seconds), must be positive
    pub tau_up: f64,
    /// Time constant while decelerating (seconds), must be positive
    pub tau_down: f64,
    output: f64,
}

impl ResponseFilter {
    /// Create a filter starting at `initial`.
    ///
    /// # Errors
    ///
    /// Returns error if either time constant is not a positive finite number,
    /// or if `initial` is not finite.
    pub fn new(tau_up: f64, tau_down: f64, initial: f64) -> ControlResult<Self> {
        let tau_up = ensure_positive(tau_up, "time_constant_up")?;
        let tau_down = ensure_positive(tau_down, "time_constant_down")?;
        let output = ensure_finite(initial, "initial filter output")?;
        Ok(Self {
            tau_up,
            tau_down,
            output,
        })
    }

    /// Current filter output.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Time constant that applies when moving from the current output toward `target`.
    pub fn time_constant_for(&self, target: f64) -> f64 {
        if target > self.output {
            self.tau_up
        } else {
            self.tau_down
        }
    }

    /// Advance the filter toward `target` over `dt` seconds and return the new output.
    ///
    /// A non-positive or non-finite `dt` (first tick, simulation reset) leaves
    /// the output untouched.
    pub fn advance(&mut self, target: f64, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return self.output;
        }

        let tau = self.time_constant_for(target);
        let gain = 1.0 - (-dt / tau).exp();
        let next = self.output + (target - self.output) * gain;

        // Rounding must not carry the output past the target.
        self.output = if target >= self.output {
            next.min(target)
        } else {
            next.max(target)
        };
        self.output
    }

    /// Re-seed the output, e.g. after the host rewinds simulation time.
    pub fn reset(&mut self, value: f64) {
        self.output = value;
    }
}
