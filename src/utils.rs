pub fn gcd_signed(mut a: i64, mut b: i64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps when i64::MIN % -1 and that still yields 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

pub fn gcd_signed_i128(mut a: i128, mut b: i128) -> u128 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps when i128::MIN % -1 and that still yields 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

/// Round `x` to `precision` decimal digits. A result of `-0.0` is returned as `0.0`.
pub fn round_to_precision(x: f64, precision: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }

    let scale = 10f64.powi(precision.min(300) as i32);
    let r = (x * scale).round() / scale;
    // (x * scale) may overflow for huge inputs, in which case x has no fractional part left
    let r = if r.is_finite() { r } else { x };
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod test {
    use super::{gcd_signed, gcd_signed_i128, round_to_precision};

    #[test]
    fn gcd() {
        assert_eq!(gcd_signed(-12, 18), 6);
        assert_eq!(gcd_signed(i64::MIN, -1), 1);
        assert_eq!(gcd_signed_i128(0, -7), 7);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to_precision(1.23456789, 3), 1.235);
        assert_eq!(round_to_precision(-0.00000001, 7), 0.0);
        assert!(round_to_precision(-0.00000001, 7).is_sign_positive());
        assert_eq!(round_to_precision(2.0000000004, 7), 2.0);
    }
}
