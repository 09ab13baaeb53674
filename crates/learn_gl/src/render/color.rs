//! Time-varying uniform color

/// Green intensity at `elapsed_secs`, following `sin(t) / 2 + 0.5`
///
/// Always within `[0, 1]`; 0.5 at t = 0, peaking at t = π/2.
pub fn pulse_green(elapsed_secs: f64) -> f32 {
    (elapsed_secs.sin() / 2.0 + 0.5).clamp(0.0, 1.0) as f32
}

/// RGBA color assigned to the color uniform each frame
pub fn pulse_color(elapsed_secs: f64) -> [f32; 4] {
    [0.0, pulse_green(elapsed_secs), 0.0, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_phase_points() {
        assert_relative_eq!(pulse_green(0.0), 0.5);
        assert_relative_eq!(pulse_green(FRAC_PI_2), 1.0);
        assert_relative_eq!(pulse_green(PI), 0.5, epsilon = 1e-6);
        assert_relative_eq!(pulse_green(3.0 * FRAC_PI_2), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_stays_in_unit_range() {
        for step in 0..10_000 {
            let green = pulse_green(f64::from(step) * 0.013);
            assert!((0.0..=1.0).contains(&green), "green {green} out of range");
        }
    }

    #[test]
    fn test_varies_continuously() {
        // |d/dt (sin t / 2)| <= 1/2, so a 10ms step moves green by at most 5e-3
        let dt = 0.01;
        for step in 0..2_000 {
            let t = f64::from(step) * dt;
            let delta = (pulse_green(t + dt) - pulse_green(t)).abs();
            assert!(delta <= 0.005 + 1e-6, "jump of {delta} at t={t}");
        }
    }

    #[test]
    fn test_only_green_channel_moves() {
        let color = pulse_color(1.234);
        assert_eq!(color[0], 0.0);
        assert_eq!(color[2], 0.0);
        assert_eq!(color[3], 1.0);
        assert_relative_eq!(color[1], pulse_green(1.234));
    }
}
