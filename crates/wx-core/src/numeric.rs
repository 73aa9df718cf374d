use crate::{WxError, WxResult};

/// Floating point type used for decoded values
pub type Real = f64;

const E10: [Real; 17] = [
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
    10_000_000_000.0,
    100_000_000_000.0,
    1_000_000_000_000.0,
    10_000_000_000_000.0,
    100_000_000_000_000.0,
    1_000_000_000_000_000.0,
    10_000_000_000_000_000.0,
];

/// Exact power of ten, or `None` past the table.
pub fn pow10(exp: u32) -> Option<Real> {
    E10.get(exp as usize).copied()
}

/// Convert a real value to its scaled integer form: `round(value * 10^scale)`.
///
/// Rounds half away from zero. Returns `None` for non-finite input, for
/// scales past the power table, or when the result does not fit in `i64`.
pub fn scale_real(value: Real, scale: i32) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let factor = pow10(scale.unsigned_abs())?;
    let scaled = if scale >= 0 {
        value * factor
    } else {
        value / factor
    };
    let rounded = scaled.round();
    if rounded < i64::MIN as Real || rounded >= i64::MAX as Real {
        return None;
    }
    Some(rounded as i64)
}

/// Convert a scaled integer back to its real value: `raw / 10^scale`.
pub fn unscale_int(raw: i64, scale: i32) -> Real {
    let exp = scale.unsigned_abs();
    let factor = pow10(exp).unwrap_or_else(|| 10_f64.powf(exp as Real));
    // Division yields the correctly rounded double of the decimal value.
    if scale >= 0 {
        raw as Real / factor
    } else {
        raw as Real * factor
    }
}

/// Parse an integer literal with an optional sign.
///
/// Width checks are left to the caller, so literals past `i32` still parse.
pub fn parse_int(text: &str) -> WxResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| WxError::parse(text, "integer"))
}

/// Parse a finite real number.
pub fn parse_real(text: &str) -> WxResult<Real> {
    match text.trim().parse::<Real>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(WxError::parse(text, "real number")),
    }
}

/// Tolerances for comparing decoded reals
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Absolute tolerance of one unit in the last scaled digit.
    pub fn for_scale(scale: i32) -> Self {
        Self {
            abs: unscale_int(1, scale),
            rel: 0.0,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}
