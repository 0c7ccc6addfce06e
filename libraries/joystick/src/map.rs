// Range mapping and clamping helpers shared by the stick trackers

/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// No clamping is applied, callers clamp before mapping. The input bounds must
/// differ, otherwise the result is not finite.
pub fn map_value(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Rounds to the nearest integer with ties going towards positive infinity.
///
/// `-2.5` rounds to `-2` and `127.5` to `128`.
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Restricts `(x, y)` to the disk of the given radius.
///
/// Points outside the disk are scaled uniformly so they land on the boundary
/// circle, keeping their direction.
pub fn clamp_to_disk(x: f32, y: f32, radius: f32) -> (f32, f32) {
    let dist = (x * x + y * y).sqrt();
    if dist > radius {
        let scale = radius / dist;
        (x * scale, y * scale)
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_value_endpoints() {
        assert_eq!(map_value(-100.0, -100.0, 100.0, -50.0, 50.0), -50.0);
        assert_eq!(map_value(100.0, -100.0, 100.0, -50.0, 50.0), 50.0);

        // Reversed input range, as used for the vertical stick axis
        assert_eq!(map_value(100.0, 100.0, -100.0, 0.0, 255.0), 0.0);
        assert_eq!(map_value(-100.0, 100.0, -100.0, 0.0, 255.0), 255.0);
    }

    #[test]
    fn test_map_value_is_affine() {
        let f = |v: f32| map_value(v, 10.0, 30.0, -1.0, 3.0);
        // Midpoint maps to midpoint
        assert!((f(20.0) - 1.0).abs() < 1e-6);
        // Equal input steps give equal output steps
        let step_a = f(12.0) - f(11.0);
        let step_b = f(27.0) - f(26.0);
        assert!((step_a - step_b).abs() < 1e-5);
        // No clamping outside the input range
        assert!((f(40.0) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(127.5), 128.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49), 0.0);
    }

    #[test]
    fn test_clamp_to_disk_outside() {
        let radius = 100.0;
        for &(x, y) in &[(300.0, 400.0), (-250.0, 10.0), (0.0, -101.0), (-80.0, -90.0)] {
            let (cx, cy) = clamp_to_disk(x, y, radius);
            let norm = (cx * cx + cy * cy).sqrt();
            assert!((norm - radius).abs() < 1e-3, "norm {} for ({}, {})", norm, x, y);

            // Same direction: the cross product vanishes and the dot product is positive
            assert!((cx * y - cy * x).abs() < 1e-2);
            assert!(cx * x + cy * y > 0.0);
        }
    }

    #[test]
    fn test_clamp_to_disk_inside_is_untouched() {
        assert_eq!(clamp_to_disk(30.0, -40.0, 50.0), (30.0, -40.0));
        assert_eq!(clamp_to_disk(0.0, 0.0, 50.0), (0.0, 0.0));
    }
}
