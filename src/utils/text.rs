/// Format `value` with `precision` significant digits the way C's `%g` does:
/// trailing zeros are dropped and very small or large magnitudes switch to
/// exponent notation.
pub fn format_significant(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    // Round first so the exponent reflects carries such as 9.99999 -> 10.000.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Menu markup treats `|` as the start of the parameter list and newlines as item breaks.
pub fn sanitize_menu_text(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '|' => '¦',
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_like_percent_g() {
        assert_eq!(format_significant(1.1, 5), "1.1");
        assert_eq!(format_significant(-0.01, 5), "-0.01");
        assert_eq!(format_significant(1.27346, 5), "1.2735");
        assert_eq!(format_significant(151.234, 5), "151.23");
        assert_eq!(format_significant(12345.0, 5), "12345");
        assert_eq!(format_significant(0.0, 5), "0");
    }

    #[test]
    fn switches_to_exponent_for_extremes() {
        assert_eq!(format_significant(123456.0, 5), "1.2346e+05");
        assert_eq!(format_significant(0.00001234, 5), "1.234e-05");
        assert_eq!(format_significant(99999.9, 5), "1e+05");
    }

    #[test]
    fn sanitizes_separators() {
        assert_eq!(sanitize_menu_text("a | b\nc"), "a ¦ b c");
    }
}
