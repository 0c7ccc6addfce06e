mod command;
mod control;
mod error;
mod mode;
mod panel;
mod sticks;
mod telemetry;

pub use command::Command;
pub use control::ControlState;
pub use error::RemoteError;
pub use mode::FlightMode;
pub use panel::{ArmButton, ButtonStyle, Calibration, Notice, Panel, Rgb, CALIBRATION_PROMPT};
pub use sticks::{Side, Stick};
pub use telemetry::Telemetry;
