mod joystick;
mod map;

pub use joystick::{Axes, AxisRange, Joystick, JoystickZone, Point, Release};
pub use map::{clamp_to_disk, map_value, round_half_up};
