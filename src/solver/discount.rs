//! Split-period present-value discounting
//!
//! The defining numerical convention of the whole system: compound interest
//! over whole periods, simple interest over the fractional remainder.

/// Rates below this magnitude discount as the identity, avoiding a divide
/// by a factor indistinguishable from zero
pub const RATE_EPSILON: f64 = 1e-10;

/// Discount `amount` back over `offset` periods at per-period rate `rate`.
///
/// With `st = floor(offset)` and `ft = offset - st`, the discount divisor is
/// `(1+R)^st * (1 + R*ft)`. This is not equivalent to continuous compounding
/// `(1+R)^offset`; the fractional tail accrues simple interest.
pub fn split_period_discount(amount: f64, offset: f64, rate: f64) -> f64 {
    if rate.abs() < RATE_EPSILON {
        return amount;
    }
    let whole = offset.floor();
    let fraction = offset - whole;
    amount / ((1.0 + rate).powi(whole as i32) * (1.0 + rate * fraction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_integer_offset_reduces_to_compound_discounting() {
        // ft = 0 leaves the simple-interest factor at exactly 1
        let rate = 0.0123_f64;
        for k in 0..24 {
            let expected = 100.0 / (1.0 + rate).powi(k);
            assert_eq!(split_period_discount(100.0, k as f64, rate), expected);
        }
    }

    #[test]
    fn test_fractional_tail_uses_simple_interest() {
        let discounted = split_period_discount(100.0, 1.5, 0.10);
        assert_abs_diff_eq!(discounted, 100.0 / (1.10 * 1.05), epsilon = 1e-12);

        // Simple interest on the tail discounts more than compounding would
        let compound = 100.0 / 1.10_f64.powf(1.5);
        assert!(discounted < compound);
    }

    #[test]
    fn test_near_zero_rate_is_identity() {
        assert_eq!(split_period_discount(250.0, 7.3, 0.0), 250.0);
        assert_eq!(split_period_discount(250.0, 7.3, 5e-11), 250.0);
        assert_eq!(split_period_discount(250.0, 7.3, -5e-11), 250.0);
        // Just past the guard the divisor engages
        assert!(split_period_discount(250.0, 7.3, 1e-9) < 250.0);
    }
}
