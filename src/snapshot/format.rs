use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

const USD_ZERO: &str = "$0.00";
pub const MISSING: &str = "--";

/// `$1,234.50` style. Rounds half away from zero on the shortest decimal
/// form of the input, so `1.005` becomes `$1.01`.
pub fn format_usd(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return USD_ZERO.to_string();
    };
    let shortest = Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64_retain(value));
    let (negative, digits) = rounded(value, shortest, 2);
    let sign = if negative { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// Price cell: `$0.555`, or `--` when absent.
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", format_fixed(v, 3)),
        None => MISSING.to_string(),
    }
}

/// Size cell: `12.00`, or `--` when absent.
pub fn format_size(value: Option<f64>) -> String {
    match value {
        Some(v) => format_fixed(v, 2),
        None => MISSING.to_string(),
    }
}

/// Fixed-point on the exact binary value, ties away from zero.
pub fn format_fixed(value: f64, dp: u32) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let (_, digits) = rounded(value, Decimal::from_f64_retain(value), dp);
    // Like toFixed, the sign follows the input, so -0.0001 gives -0.00.
    if value < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Returns whether the rounded value is negative, and its unsigned digits with
/// exactly `dp` decimals.
fn rounded(value: f64, decimal: Option<Decimal>, dp: u32) -> (bool, String) {
    if let Some(d) = decimal {
        let mut r = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        let negative = r.is_sign_negative() && !r.is_zero();
        r.set_sign_positive(true);
        r.rescale(dp);
        // rescale caps the scale once the mantissa would overflow 96 bits.
        if r.scale() == dp {
            return (negative, r.to_string());
        }
    }
    // Beyond Decimal's precision; std formatting is exact enough at that magnitude.
    let digits = format!("{:.*}", dp as usize, value.abs());
    let negative = value < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    (negative, digits)
}

fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
