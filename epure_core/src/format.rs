//! Number formatting shared by the CSV and HTML exports.

/// Exponential notation with an explicit exponent sign: `1.0000e+2`, `-5.00e-3`.
pub fn exp(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let s = format!("{:.*e}", digits, value);
    match s.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => s,
    }
}

/// Fixed notation with `digits` decimals.
pub fn fixed(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

/// Escape text for HTML/SVG element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_signs() {
        assert_eq!(exp(100.0, 4), "1.0000e+2");
        assert_eq!(exp(0.004, 6), "4.000000e-3");
        assert_eq!(exp(-12345.0, 2), "-1.23e+4");
        assert_eq!(exp(0.0, 3), "0.000e+0");
        assert_eq!(exp(f64::NAN, 3), "NaN");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(1.0, 4), "1.0000");
        assert_eq!(fixed(-0.1256, 3), "-0.126");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>R&D</b>"), "&lt;b&gt;R&amp;D&lt;/b&gt;");
        assert_eq!(escape_html("σ(x)"), "σ(x)");
    }
}
