// rf-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, Frequency as UomFrequency, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Frequency = UomFrequency;
pub type Time = UomTime;

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Rotor speed in revolutions per minute.
#[inline]
pub fn as_rpm(omega: AngularVelocity) -> f64 {
    use uom::si::angular_velocity::revolution_per_minute;
    omega.get::<revolution_per_minute>()
}

/// Rotation frequency in Hz of a spin rate given in rad/s.
#[inline]
pub fn spin_frequency(omega_rad_s: f64) -> Frequency {
    hz(omega_rad_s / core::f64::consts::TAU)
}

/// Highest frequency a sampler with period `dt` can represent.
#[inline]
pub fn nyquist_frequency(dt: Time) -> Frequency {
    use uom::si::time::second;
    hz(1.0 / (2.0 * dt.get::<second>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::frequency::hertz;

    #[test]
    fn one_revolution_per_second_is_sixty_rpm() {
        assert!((as_rpm(rad_per_s(core::f64::consts::TAU)) - 60.0).abs() < 1e-9);
        assert!((as_rpm(rad_per_s(838.0)) - 8002.3).abs() < 0.1);
    }

    #[test]
    fn nyquist_of_kilohertz_tick() {
        let f = nyquist_frequency(s(0.001));
        assert!((f.get::<hertz>() - 500.0).abs() < 1e-9);
        let spin = spin_frequency(core::f64::consts::TAU * 600.0);
        assert!(spin > f);
    }
}
