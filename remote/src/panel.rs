// Display model of the ground station controls.
//
// Every user action updates the panel optimistically and returns the command
// to send; the vehicle's answer is never awaited except for calibration.

use std::collections::VecDeque;

use crate::{Command, FlightMode, Telemetry};

pub const CALIBRATION_PROMPT: &str =
    "Keep the vehicle on a flat, level surface. Start calibration?";

const CALIBRATING_TEXT: &str = "CALIBRATING...";
const ARM_LABEL: &str = "ARMAR";
const DISARM_LABEL: &str = "DESARMAR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

const ARMED_COLOR: Rgb = Rgb::new(0x28, 0xa7, 0x45);
const DISARMED_COLOR: Rgb = Rgb::new(0xff, 0x4d, 0x4d);
const SELECTED_STYLE: ButtonStyle = ButtonStyle {
    fill: Rgb::new(0x00, 0x7b, 0xff),
    border: Rgb::new(0x00, 0xd4, 0xff),
};
const IDLE_STYLE: ButtonStyle = ButtonStyle {
    fill: Rgb::new(0x33, 0x33, 0x33),
    border: Rgb::new(0x55, 0x55, 0x55),
};

/// Label and colour of the arm toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmButton {
    pub label: &'static str,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub fill: Rgb,
    pub border: Rgb,
}

/// Message the user has to acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CalibrationComplete,
    CalibrationFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::CalibrationComplete => "Calibration complete and saved!",
            Notice::CalibrationFailed => "Calibration failed. Check the connection.",
        }
    }
}

/// A calibration request in flight, carrying the text to restore on success
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calibration {
    previous_text: String,
}

#[derive(Debug, Clone)]
pub struct Panel {
    armed: bool,
    mode: Option<FlightMode>,
    mode_text: String,
    pitch_text: String,
    roll_text: String,
    notices: VecDeque<Notice>,
}

impl Default for Panel {
    fn default() -> Self {
        Panel {
            armed: false,
            mode: None,
            mode_text: String::new(),
            pitch_text: "0.0".to_string(),
            roll_text: "0.0".to_string(),
            notices: VecDeque::new(),
        }
    }
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    pub fn mode_text(&self) -> &str {
        &self.mode_text
    }

    pub fn pitch_text(&self) -> &str {
        &self.pitch_text
    }

    pub fn roll_text(&self) -> &str {
        &self.roll_text
    }

    pub fn arm_button(&self) -> ArmButton {
        if self.armed {
            ArmButton {
                label: DISARM_LABEL,
                color: ARMED_COLOR,
            }
        } else {
            ArmButton {
                label: ARM_LABEL,
                color: DISARMED_COLOR,
            }
        }
    }

    pub fn mode_button_style(&self, mode: FlightMode) -> ButtonStyle {
        if self.mode == Some(mode) {
            SELECTED_STYLE
        } else {
            IDLE_STYLE
        }
    }

    pub fn toggle_arm(&mut self) -> Command {
        self.armed = !self.armed;
        if self.armed {
            Command::Arm
        } else {
            Command::Disarm
        }
    }

    pub fn select_mode(&mut self, mode: FlightMode) -> Command {
        self.mode = Some(mode);
        self.mode_text = mode.label().to_string();
        Command::SetMode(mode)
    }

    /// Call once the user confirmed the calibration prompt
    pub fn begin_calibration(&mut self) -> (Command, Calibration) {
        let calibration = Calibration {
            previous_text: std::mem::replace(&mut self.mode_text, CALIBRATING_TEXT.to_string()),
        };
        (Command::Calibrate, calibration)
    }

    /// On failure the calibrating text stays up until something else replaces it.
    pub fn finish_calibration(&mut self, calibration: Calibration, succeeded: bool) -> Notice {
        let notice = if succeeded {
            self.mode_text = calibration.previous_text;
            Notice::CalibrationComplete
        } else {
            Notice::CalibrationFailed
        };
        self.notices.push_back(notice);
        notice
    }

    /// Returns true when the report forced a local disarm
    pub fn apply_telemetry(&mut self, telemetry: &Telemetry) -> bool {
        self.pitch_text = format_one_decimal(telemetry.pitch);
        self.roll_text = format_one_decimal(telemetry.roll);

        if !telemetry.armed && self.armed {
            self.armed = false;
            return true;
        }
        false
    }

    /// Oldest notice not yet shown
    pub fn notice(&self) -> Option<Notice> {
        self.notices.front().copied()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }
}

/// One-decimal readout where exact ties round away from zero and small
/// negatives keep their sign (`0.25` -> `0.3`, `-0.04` -> `-0.0`).
fn format_one_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude.is_infinite() {
        return format!("{sign}Infinity");
    }

    // A value sits exactly halfway between two tenths only when its
    // fractional part is .25 or .75, i.e. four times it is an odd integer.
    let quarters = magnitude * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (magnitude * 10.0 + 0.5).floor() as u64;
        format!("{sign}{}.{}", tenths / 10, tenths % 10)
    } else {
        format!("{sign}{:.1}", magnitude)
    }
}
