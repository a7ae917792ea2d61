//! Motor speed command schedule.
//!
//! Commands arrive on named channels. Each command carries one speed per
//! motor number and is held until the next command on the same channel.

use std::collections::HashMap;

use rf_core::MotorId;
use rf_project::CommandDef;

#[derive(Clone, Debug, Default)]
pub struct CommandSchedule {
    /// Per channel, commands sorted by time.
    channels: HashMap<String, Vec<(f64, Vec<f64>)>>,
}

impl CommandSchedule {
    pub fn from_defs(defs: &[CommandDef]) -> Self {
        let mut schedule = Self::default();
        for def in defs {
            schedule.push(&def.channel, def.at_s, def.speeds.clone());
        }
        schedule
    }

    /// Add a command. Commands with equal times keep insertion order; the
    /// later one wins.
    pub fn push(&mut self, channel: &str, at_s: f64, speeds: Vec<f64>) {
        let entries = self.channels.entry(channel.to_string()).or_default();
        let idx = entries.partition_point(|(t, _)| *t <= at_s);
        entries.insert(idx, (at_s, speeds));
    }

    /// Speed commanded to `motor` on `channel` at time `t` (rad/s).
    ///
    /// Zero before the first command, on unknown channels, and for motors
    /// the command array does not cover.
    pub fn speed_at(&self, channel: &str, t: f64, motor: MotorId) -> f64 {
        let Some(entries) = self.channels.get(channel) else {
            return 0.0;
        };
        let idx = entries.partition_point(|(at, _)| *at <= t);
        if idx == 0 {
            return 0.0;
        }
        entries[idx - 1].1.get(motor.slot()).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CH: &str = "command/motor_speed";

    fn m(n: u32) -> MotorId {
        MotorId::from_number(n).unwrap()
    }

    #[test]
    fn holds_latest_command() {
        let mut s = CommandSchedule::default();
        s.push(CH, 0.5, vec![300.0, 310.0]);
        s.push(CH, 0.0, vec![545.0, 546.0]);

        assert_eq!(s.speed_at(CH, 0.0, m(0)), 545.0);
        assert_eq!(s.speed_at(CH, 0.49, m(1)), 546.0);
        assert_eq!(s.speed_at(CH, 0.5, m(0)), 300.0);
        assert_eq!(s.speed_at(CH, 10.0, m(1)), 310.0);
    }

    #[test]
    fn zero_before_first_command() {
        let mut s = CommandSchedule::default();
        s.push(CH, 0.1, vec![500.0]);
        assert_eq!(s.speed_at(CH, 0.05, m(0)), 0.0);
    }

    #[test]
    fn unknown_channel_or_motor_is_zero() {
        let s = CommandSchedule::from_defs(&[CommandDef {
            channel: CH.to_string(),
            at_s: 0.0,
            speeds: vec![500.0],
        }]);
        assert_eq!(s.speed_at("other", 1.0, m(0)), 0.0);
        assert_eq!(s.speed_at(CH, 1.0, m(3)), 0.0);
    }

    #[test]
    fn later_push_wins_at_equal_time() {
        let mut s = CommandSchedule::default();
        s.push(CH, 0.2, vec![100.0]);
        s.push(CH, 0.2, vec![200.0]);
        assert_eq!(s.speed_at(CH, 0.2, m(0)), 200.0);
    }
}
