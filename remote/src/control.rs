use joystick::AxisRange;

pub const THROTTLE_RANGE: AxisRange = AxisRange::new(0.0, 255.0);
pub const ATTITUDE_RANGE: AxisRange = AxisRange::new(-50.0, 50.0);

/// Stick axes as pushed to the vehicle on every control tick
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub throttle: u8,
    pub yaw: i8,
    pub pitch: i8,
    pub roll: i8,
}

impl ControlState {
    pub fn new(throttle: u8, yaw: i8, pitch: i8, roll: i8) -> Self {
        assert!(yaw >= -50 && yaw <= 50);
        assert!(pitch >= -50 && pitch <= 50);
        assert!(roll >= -50 && roll <= 50);
        ControlState {
            throttle,
            yaw,
            pitch,
            roll,
        }
    }

    pub fn set_throttle(&mut self, value: i32) {
        self.throttle = value.clamp(0, 255) as u8;
    }

    pub fn set_yaw(&mut self, value: i32) {
        self.yaw = Self::attitude(value);
    }

    pub fn set_pitch(&mut self, value: i32) {
        self.pitch = Self::attitude(value);
    }

    pub fn set_roll(&mut self, value: i32) {
        self.roll = Self::attitude(value);
    }

    fn attitude(value: i32) -> i8 {
        value.clamp(-50, 50) as i8
    }
}
