use joystick::{Joystick, JoystickZone, Point, Release};

use crate::control::{ATTITUDE_RANGE, THROTTLE_RANGE};
use crate::ControlState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Throttle (vertical) and yaw (horizontal)
    Left,
    /// Pitch (vertical) and roll (horizontal)
    Right,
}

/// A joystick bound to its pair of control axes
#[derive(Debug, Clone)]
pub struct Stick {
    side: Side,
    joystick: Joystick,
}

impl Stick {
    pub fn new(side: Side, zone: JoystickZone) -> Self {
        let joystick = match side {
            Side::Left => Joystick::new(zone, ATTITUDE_RANGE, THROTTLE_RANGE, Release::HoldVertical),
            Side::Right => Joystick::new(zone, ATTITUDE_RANGE, ATTITUDE_RANGE, Release::Center),
        };
        Stick { side, joystick }
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn touch(&mut self, point: Point, controls: &mut ControlState) {
        let axes = self.joystick.touch(point);
        match self.side {
            Side::Left => {
                controls.set_throttle(axes.vertical);
                controls.set_yaw(axes.horizontal);
            }
            Side::Right => {
                controls.set_pitch(axes.vertical);
                controls.set_roll(axes.horizontal);
            }
        }
    }

    pub fn release(&mut self, controls: &mut ControlState) {
        self.joystick.release();
        match self.side {
            // throttle is held where the finger left it
            Side::Left => controls.yaw = 0,
            Side::Right => {
                controls.pitch = 0;
                controls.roll = 0;
            }
        }
    }
}
