//! Integer helpers used by canvas planning and channel mapping

/// Smallest multiple of `n` reached by ceiling `x`, snapping down to a
/// multiple of `n`, then stepping up once if that fell below `x`.
///
/// Returns `None` when `n` is zero, `x` is not finite, or the result does
/// not fit in a `u64`.
pub fn next_multiple(x: f64, n: u64) -> Option<u64> {
    if n == 0 || !x.is_finite() || x >= u64::MAX as f64 {
        return None;
    }
    let c = x.ceil().max(0.0) as u64;
    let mut y = c - c % n;
    if (y as f64) < x {
        y = y.checked_add(n)?;
    }
    Some(y)
}

/// Euclidean greatest common divisor.
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Least common multiple; `0` if either operand is `0`.
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a * b / gcd(a, b)
}

/// Maps `x` from `[x_min, x_max]` onto `[y_min, y_max]`.
#[inline]
pub fn linear_map(x: f64, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> f64 {
    (x - x_min) * (y_max - y_min) / (x_max - x_min) + y_min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_multiple_exact() {
        assert_eq!(next_multiple(8.0, 1), Some(8));
        assert_eq!(next_multiple(16.0, 16), Some(16));
        assert_eq!(next_multiple(32.0, 16), Some(32));
    }

    #[test]
    fn test_next_multiple_rounds_up() {
        assert_eq!(next_multiple(15.2, 16), Some(16));
        assert_eq!(next_multiple(17.0, 16), Some(32));
        assert_eq!(next_multiple(0.5, 4), Some(4));
        assert_eq!(next_multiple(67.08, 1), Some(68));
    }

    #[test]
    fn test_next_multiple_just_below_multiple() {
        // ceil lands exactly on the multiple, no correction needed
        assert_eq!(next_multiple(47.999, 16), Some(48));
        // ceil lands one past the multiple, snap-down falls below x, step up
        assert_eq!(next_multiple(48.001, 16), Some(64));
    }

    #[test]
    fn test_next_multiple_is_multiple_and_not_below() {
        for n in 1..=12u64 {
            for tenths in 1..400u64 {
                let x = tenths as f64 / 10.0;
                let y = next_multiple(x, n).unwrap();
                assert_eq!(y % n, 0);
                assert!(y as f64 >= x);
                assert!((y as f64) < x + n as f64);
            }
        }
    }

    #[test]
    fn test_next_multiple_out_of_range() {
        assert_eq!(next_multiple(1e20, 1), None);
        assert_eq!(next_multiple(u64::MAX as f64, 16), None);
        assert_eq!(next_multiple(f64::INFINITY, 1), None);
        assert_eq!(next_multiple(f64::NAN, 1), None);
        assert_eq!(next_multiple(4.0, 0), None);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(17, 5), 1);
    }

    #[test]
    fn test_lcm_with_zero() {
        for v in [0u64, 1, 3, 16, 1000] {
            assert_eq!(lcm(v, 0), 0);
            assert_eq!(lcm(0, v), 0);
        }
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(16, 3), 48);
        assert_eq!(lcm(16, 4), 16);
        assert_eq!(lcm(1, 1), 1);
    }

    #[test]
    fn test_linear_map() {
        assert_eq!(linear_map(0.0, 0.0, 3.0, 0.0, 255.0), 0.0);
        assert_eq!(linear_map(3.0, 0.0, 3.0, 0.0, 255.0), 255.0);
        assert_eq!(linear_map(2.0, 0.0, 3.0, 0.0, 255.0) as u8, 170);
        assert_eq!(linear_map(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
    }
}
