use std::fmt;

use crate::{ControlState, FlightMode};

/// One HTTP GET to the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Arm,
    Disarm,
    SetMode(FlightMode),
    Calibrate,
    Control(ControlState),
    Telemetry,
}

impl Command {
    /// Endpoint path including the query string
    pub fn path(&self) -> String {
        match self {
            Command::Arm => "/arm".to_string(),
            Command::Disarm => "/disarm".to_string(),
            Command::SetMode(mode) => format!("/setMode?m={}", mode.id()),
            Command::Calibrate => "/calibrate".to_string(),
            Command::Control(c) => format!(
                "/ctrl?t={}&y={}&p={}&r={}",
                c.throttle, c.yaw, c.pitch, c.roll
            ),
            Command::Telemetry => "/telemetry".to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Command::Arm.path(), "/arm");
        assert_eq!(Command::Disarm.path(), "/disarm");
        assert_eq!(Command::Calibrate.path(), "/calibrate");
        assert_eq!(Command::Telemetry.path(), "/telemetry");
        assert_eq!(Command::SetMode(FlightMode::Hybrid).path(), "/setMode?m=2");
    }

    #[test]
    fn test_control_query() {
        let command = Command::Control(ControlState::new(128, -7, 50, -50));
        assert_eq!(command.to_string(), "/ctrl?t=128&y=-7&p=50&r=-50");
    }
}
