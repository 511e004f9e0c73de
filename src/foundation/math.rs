/// Greatest common divisor of `|a|` and `|b|` (`gcd(0, 0) == 0`).
pub(crate) fn gcd_i128(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `floor(value * num / den)` computed in 128 bits, saturated to `i64`.
///
/// `den` must be positive.
pub(crate) fn mul_div_floor(value: i64, num: i64, den: i64) -> i64 {
    let wide = (i128::from(value) * i128::from(num)).div_euclid(i128::from(den));
    saturate_i64(wide)
}

pub(crate) fn saturate_i64(v: i128) -> i64 {
    v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
