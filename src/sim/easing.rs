//! Easing curves used by the scene animations
//!
//! Every curve clamps `t` to [0, 1] first, so callers can pass raw
//! phase-time ratios.

/// Linear interpolation (unclamped `t`)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Piecewise-parabolic bounce settling at 1.0
pub fn ease_out_bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    let mut t = t.clamp(0.0, 1.0);
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        t -= 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        t -= 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        t -= 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for f in [ease_out_quad, ease_out_cubic, ease_out_bounce] {
            assert!(f(0.0).abs() < 1e-6);
            assert!((f(1.0) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(ease_out_quad(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), ease_out_cubic(1.0));
        assert_eq!(ease_out_bounce(2.0), ease_out_bounce(1.0));
    }

    #[test]
    fn test_ease_out_is_ahead_of_linear() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(ease_out_quad(t) >= t);
            assert!(ease_out_cubic(t) >= ease_out_quad(t));
        }
    }

    #[test]
    fn test_bounce_first_contact() {
        // First contact at t = 1/2.75, then a dip to 0.75 before settling
        assert!((ease_out_bounce(1.0 / 2.75) - 1.0).abs() < 1e-4);
        assert!((ease_out_bounce(1.5 / 2.75) - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(lerp(2.0, 4.0, 1.5), 5.0);
    }
}
