//! # Quantity Scaler
//!
//! Rescales a recipe quantity for a different number of servings. Only plain
//! base-10 decimals are scaled; anything else ("1/2", "a pinch", "2-3") is shown
//! exactly as written.
//!
//! The result depends on the servings currently selected on screen, so it is
//! computed on every render and never stored.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Plain decimal quantity: optional sign, digits with optional fraction, or a bare fraction
pub const DECIMAL_PATTERN: &str = r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)\s*$";

lazy_static! {
    static ref DECIMAL_REGEX: Regex =
        Regex::new(DECIMAL_PATTERN).expect("Decimal quantity pattern should be valid");
}

/// Parse a quantity string as a base-10 decimal
///
/// Rejects exponents, `inf`, `NaN` and fractions, which `f64::from_str` would
/// otherwise accept or which are not decimals.
pub fn parse_decimal(quantity: &str) -> Option<f64> {
    if !DECIMAL_REGEX.is_match(quantity) {
        return None;
    }
    quantity.trim().parse::<f64>().ok()
}

/// Scale `quantity` from `recipe_servings` to `current_servings`
///
/// # Arguments
///
/// * `quantity` - Quantity as written in the recipe
/// * `recipe_servings` - Serving count the recipe is written for
/// * `current_servings` - Serving count selected by the user, if any
///
/// # Returns
///
/// The scaled quantity truncated to two decimals, or `quantity` unchanged when
/// no servings are selected, the quantity is not a decimal, or the scaled value
/// is not positive.
///
/// # Examples
///
/// ```rust
/// use groceries::quantity_scaler::scale;
///
/// assert_eq!(scale("200", 2, Some(4)), "400");
/// assert_eq!(scale("400", 3, Some(1)), "133.33");
/// assert_eq!(scale("a pinch", 2, Some(4)), "a pinch");
/// assert_eq!(scale("200", 2, None), "200");
/// ```
pub fn scale(quantity: &str, recipe_servings: u32, current_servings: Option<u32>) -> String {
    let Some(current_servings) = current_servings else {
        return quantity.to_string();
    };

    if recipe_servings == 0 {
        return quantity.to_string();
    }

    let Some(parsed) = parse_decimal(quantity) else {
        trace!("Quantity '{}' is not a decimal, leaving unscaled", quantity);
        return quantity.to_string();
    };

    let scaled = parsed / recipe_servings as f64 * current_servings as f64;
    if !scaled.is_finite() || scaled <= 0.0 {
        return quantity.to_string();
    }

    match format_truncated(scaled) {
        Some(rendered) => rendered,
        None => quantity.to_string(),
    }
}

/// Render a positive value truncated to hundredths, without trailing zeros
///
/// Returns `None` when the truncated value is zero.
fn format_truncated(value: f64) -> Option<String> {
    // The epsilon absorbs binary representation error (0.29 * 100 = 28.999...)
    let cents = (value * 100.0 + 1e-6).floor();
    if cents <= 0.0 || !cents.is_finite() {
        return None;
    }

    let rendered = format!("{:.2}", cents / 100.0);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');

    Some(rendered.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_doubles_integer_quantity() {
        assert_eq!(scale("200", 2, Some(4)), "400");
    }

    #[test]
    fn test_scale_truncates_not_rounds() {
        assert_eq!(scale("400", 3, Some(1)), "133.33");
        assert_eq!(scale("2", 3, Some(1)), "0.66");
    }

    #[test]
    fn test_scale_without_current_servings() {
        assert_eq!(scale("1.5", 4, None), "1.5");
        assert_eq!(scale("a pinch", 4, None), "a pinch");
    }

    #[test]
    fn test_scale_non_numeric_falls_back() {
        assert_eq!(scale("a pinch", 2, Some(4)), "a pinch");
        assert_eq!(scale("1/2", 2, Some(4)), "1/2");
        assert_eq!(scale("2-3", 2, Some(4)), "2-3");
        assert_eq!(scale("", 2, Some(4)), "");
    }

    #[test]
    fn test_scale_rejects_float_syntax_that_is_not_decimal() {
        assert_eq!(scale("1e3", 1, Some(2)), "1e3");
        assert_eq!(scale("inf", 1, Some(2)), "inf");
        assert_eq!(scale("NaN", 1, Some(2)), "NaN");
    }

    #[test]
    fn test_scale_non_positive_falls_back() {
        assert_eq!(scale("0", 2, Some(4)), "0");
        assert_eq!(scale("-5", 2, Some(4)), "-5");
        assert_eq!(scale("200", 2, Some(0)), "200");
    }

    #[test]
    fn test_scale_zero_recipe_servings_falls_back() {
        assert_eq!(scale("200", 0, Some(4)), "200");
    }

    #[test]
    fn test_scale_renders_trimmed_fraction() {
        assert_eq!(scale("1", 2, Some(1)), "0.5");
        assert_eq!(scale("1.5", 4, Some(6)), "2.25");
        assert_eq!(scale("0.29", 1, Some(1)), "0.29");
    }

    #[test]
    fn test_scale_too_small_to_render_falls_back() {
        assert_eq!(scale("0.001", 1, Some(1)), "0.001");
    }

    #[test]
    fn test_scale_accepts_surrounding_whitespace_and_bare_fraction() {
        assert_eq!(scale(" 100 ", 1, Some(2)), "200");
        assert_eq!(scale(".5", 1, Some(2)), "1");
        assert_eq!(scale("3.", 1, Some(2)), "6");
    }

    #[test]
    fn test_scale_round_trip_within_tolerance() {
        let cases = [("200", 2, 4), ("1.5", 4, 6), ("75", 3, 6), ("12.5", 5, 2)];

        for (quantity, recipe_servings, current_servings) in cases {
            let scaled = scale(quantity, recipe_servings, Some(current_servings));
            let restored = scale(&scaled, current_servings, Some(recipe_servings));

            let original: f64 = quantity.parse().unwrap();
            let back: f64 = restored.parse().unwrap();
            assert!(
                (original - back).abs() <= 0.01,
                "{} -> {} -> {}",
                quantity,
                scaled,
                restored
            );
        }
    }

    #[test]
    fn test_scale_long_quantity_keeps_magnitude() {
        assert_eq!(
            scale("100000000000000000000", 1, Some(2)),
            "200000000000000000000"
        );
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("42"), Some(42.0));
        assert_eq!(parse_decimal("-1.25"), Some(-1.25));
        assert_eq!(parse_decimal("1,5"), None);
        assert_eq!(parse_decimal("12 g"), None);
    }
}
