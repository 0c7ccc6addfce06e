use crate::map::{clamp_to_disk, map_value, round_half_up};

/// A point in screen coordinates (y grows downwards)
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Geometry of a stick zone, captured once when the zone is first laid out.
///
/// The center sits in the middle of the zone and the travel radius is half the
/// zone width. Later resizes are not picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickZone {
    origin: Point,
    center: Point,
    radius: f32,
}

impl JoystickZone {
    pub fn from_rect(left: f32, top: f32, width: f32, height: f32) -> Self {
        JoystickZone {
            origin: Point::new(left, top),
            center: Point::new(width / 2.0, height / 2.0),
            radius: width / 2.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Center of the zone in screen coordinates
    pub fn center(&self) -> Point {
        Point::new(self.origin.x + self.center.x, self.origin.y + self.center.y)
    }

    /// Offset of a screen point from the zone center
    pub fn offset_of(&self, point: Point) -> Point {
        Point::new(
            point.x - self.origin.x - self.center.x,
            point.y - self.origin.y - self.center.y,
        )
    }
}

/// Output range of one stick axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub const fn new(min: f32, max: f32) -> Self {
        AxisRange { min, max }
    }
}

/// What a stick does when the finger lifts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Both axes spring back to zero.
    Center,
    /// The horizontal axis springs back to zero, the vertical one stays put
    /// like a throttle detent.
    HoldVertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StickState {
    Idle,
    Dragging,
}

/// Mapped stick output
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axes {
    pub horizontal: i32,
    pub vertical: i32,
}

/// Touch tracker for one stick zone.
///
/// Touches are clamped to the zone's disk and mapped onto the two axis ranges.
/// The vertical axis is inverted: moving up increases the output.
#[derive(Debug, Clone)]
pub struct Joystick {
    zone: JoystickZone,
    horizontal: AxisRange,
    vertical: AxisRange,
    release: Release,

    state: StickState,
    axes: Axes,
    indicator: Point,
}

impl Joystick {
    pub fn new(
        zone: JoystickZone,
        horizontal: AxisRange,
        vertical: AxisRange,
        release: Release,
    ) -> Self {
        Joystick {
            zone,
            horizontal,
            vertical,
            release,
            state: StickState::Idle,
            axes: Axes::default(),
            indicator: Point::default(),
        }
    }

    /// Handle a touch-start or touch-move at `point` (screen coordinates)
    pub fn touch(&mut self, point: Point) -> Axes {
        let radius = self.zone.radius;
        let offset = self.zone.offset_of(point);
        let (x, y) = clamp_to_disk(offset.x, offset.y, radius);

        self.indicator = Point::new(x, y);
        self.axes = Axes {
            horizontal: round_half_up(map_value(
                x,
                -radius,
                radius,
                self.horizontal.min,
                self.horizontal.max,
            )) as i32,
            vertical: round_half_up(map_value(
                y,
                radius,
                -radius,
                self.vertical.min,
                self.vertical.max,
            )) as i32,
        };
        self.state = StickState::Dragging;
        self.axes
    }

    /// Handle a touch-end
    pub fn release(&mut self) -> Axes {
        self.state = StickState::Idle;
        match self.release {
            Release::Center => {
                self.axes = Axes::default();
                self.indicator = Point::default();
            }
            Release::HoldVertical => {
                let radius = self.zone.radius;
                self.axes.horizontal = 0;
                // keep the knob at the height matching the held value
                let y = map_value(
                    self.axes.vertical as f32,
                    self.vertical.min,
                    self.vertical.max,
                    radius,
                    -radius,
                );
                self.indicator = Point::new(0.0, y);
            }
        }
        self.axes
    }

    pub fn zone(&self) -> &JoystickZone {
        &self.zone
    }

    pub fn is_dragging(&self) -> bool {
        self.state == StickState::Dragging
    }

    /// Knob offset from the zone center, in screen units
    pub fn indicator(&self) -> Point {
        self.indicator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THROTTLE: AxisRange = AxisRange::new(0.0, 255.0);
    const ATTITUDE: AxisRange = AxisRange::new(-50.0, 50.0);

    // 200x200 zone at (50, 80): center (150, 180), radius 100
    fn zone() -> JoystickZone {
        JoystickZone::from_rect(50.0, 80.0, 200.0, 200.0)
    }

    fn throttle_stick() -> Joystick {
        Joystick::new(zone(), ATTITUDE, THROTTLE, Release::HoldVertical)
    }

    fn attitude_stick() -> Joystick {
        Joystick::new(zone(), ATTITUDE, ATTITUDE, Release::Center)
    }

    #[test]
    fn test_zone_geometry() {
        let zone = zone();
        assert_eq!(zone.radius(), 100.0);
        assert_eq!(zone.center(), Point::new(150.0, 180.0));
        assert_eq!(zone.offset_of(Point::new(160.0, 170.0)), Point::new(10.0, -10.0));
    }

    #[test]
    fn test_center_touch() {
        let mut stick = throttle_stick();
        let axes = stick.touch(Point::new(150.0, 180.0));
        assert_eq!(axes.vertical, 128);
        assert_eq!(axes.horizontal, 0);
        assert!(stick.is_dragging());
    }

    #[test]
    fn test_full_deflection() {
        let mut stick = throttle_stick();
        // straight up, past the edge
        let axes = stick.touch(Point::new(150.0, 0.0));
        assert_eq!(axes, Axes { horizontal: 0, vertical: 255 });
        assert!((stick.indicator().y + 100.0).abs() < 1e-3);

        // straight down
        let axes = stick.touch(Point::new(150.0, 280.0));
        assert_eq!(axes.vertical, 0);

        let mut stick = attitude_stick();
        assert_eq!(stick.touch(Point::new(250.0, 180.0)).horizontal, 50);
        assert_eq!(stick.touch(Point::new(50.0, 180.0)).horizontal, -50);
        assert_eq!(stick.touch(Point::new(150.0, 80.0)).vertical, 50);
    }

    #[test]
    fn test_touch_outside_is_clamped_to_disk() {
        let mut stick = attitude_stick();
        // offset (300, 400) -> clamped to (60, 80)
        let axes = stick.touch(Point::new(450.0, 580.0));
        let indicator = stick.indicator();
        assert!((indicator.x - 60.0).abs() < 1e-3);
        assert!((indicator.y - 80.0).abs() < 1e-3);
        assert_eq!(axes.horizontal, 30);
        assert_eq!(axes.vertical, -40);
    }

    #[test]
    fn test_release_holds_throttle() {
        let mut stick = throttle_stick();
        let held = stick.touch(Point::new(200.0, 130.0));
        assert_ne!(held.horizontal, 0);

        let axes = stick.release();
        assert!(!stick.is_dragging());
        assert_eq!(axes.horizontal, 0);
        assert_eq!(axes.vertical, held.vertical);

        let expected_y = map_value(held.vertical as f32, 0.0, 255.0, 100.0, -100.0);
        assert_eq!(stick.indicator(), Point::new(0.0, expected_y));
    }

    #[test]
    fn test_release_without_touch_parks_throttle_low() {
        let mut stick = throttle_stick();
        let axes = stick.release();
        assert_eq!(stick.indicator(), Point::new(0.0, 100.0));
        assert_eq!(axes, Axes::default());
    }

    #[test]
    fn test_release_centers_attitude() {
        let mut stick = attitude_stick();
        stick.touch(Point::new(220.0, 100.0));
        let axes = stick.release();
        assert_eq!(axes, Axes::default());
        assert_eq!(stick.indicator(), Point::default());
    }
}
