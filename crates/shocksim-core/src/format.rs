//! Number formatting used at every display boundary.
//!
//! Calculations never round; these helpers are the only place precision is
//! dropped. Negative zero is printed as positive zero so that a zero shock
//! reads `+0.00` rather than `-0.00`.

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Signed, two decimals: `+0.99`, `-1.97`.
#[must_use]
pub fn signed_2(value: f64) -> String {
    format!("{:+.2}", normalize_zero(value))
}

/// Signed, four decimals: `-0.0987`.
#[must_use]
pub fn signed_4(value: f64) -> String {
    format!("{:+.4}", normalize_zero(value))
}

/// Unsigned, two decimals: `0.69`.
#[must_use]
pub fn fixed_2(value: f64) -> String {
    format!("{:.2}", normalize_zero(value))
}

/// One decimal with a percent suffix: `-10.0%`.
#[must_use]
pub fn percent_1(value: f64) -> String {
    format!("{:.1}%", normalize_zero(value))
}
