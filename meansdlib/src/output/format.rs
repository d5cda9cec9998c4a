//! Number and cell formatting.

use crate::options::NumberStyle;

/// Rendered when neither a mean nor an SD resolves for a cell (en dash).
pub const SENTINEL: &str = "\u{2013}";

/// Render a number.
///
/// Rounding is half away from zero (`5.25` at one place is `5.3`).
/// `CollapseIntegers` (and unresolved `Auto`) print integral values without
/// a decimal point; `FixedPoint` always prints `decimal_places` digits.
pub fn format_number(value: f64, decimal_places: u8, style: NumberStyle) -> String {
    match style {
        NumberStyle::FixedPoint => fixed_point(value, decimal_places),
        NumberStyle::CollapseIntegers | NumberStyle::Auto => {
            if value.fract() == 0.0 {
                fixed_point(value, 0)
            } else {
                fixed_point(value, decimal_places)
            }
        }
    }
}

fn fixed_point(value: f64, decimal_places: u8) -> String {
    let factor = 10f64.powi(i32::from(decimal_places));
    let scaled = value * factor;
    // huge values have no fractional digits left to round
    let rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", usize::from(decimal_places), rounded)
}

/// Combine a rendered mean series and SD series into the display string.
///
/// | mean | SD  | result        |
/// |------|-----|---------------|
/// | ""   | ""  | `–`           |
/// | ""   | s   | `(s)`         |
/// | m    | ""  | `m`           |
/// | m    | s   | `m (s)`       |
pub fn format_cell(mean: &str, sd: &str) -> String {
    match (mean.is_empty(), sd.is_empty()) {
        (true, true) => SENTINEL.to_string(),
        (true, false) => format!("({sd})"),
        (false, true) => mean.to_string(),
        (false, false) => format!("{mean} ({sd})"),
    }
}
