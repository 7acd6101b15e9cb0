//! Conversions between operand text and `f64`.
//!
//! Operand text is read leniently: the longest leading decimal numeral is
//! taken and anything after it is ignored, so `"5."` reads as `5` and
//! `"12abc"` as `12`. Results are written back in the shortest form that
//! round-trips.

/// Text shown in place of a result when dividing by zero.
pub const ERROR_SENTINEL: &str = "Error";

/// Parse the leading decimal numeral of `text`.
///
/// Returns `None` when `text` does not start with a numeral: the empty
/// string, a lone `"."` or sign, and the [`ERROR_SENTINEL`] all fail.
///
/// ```rust
/// use keycalc::core::parse_operand;
///
/// assert_eq!(parse_operand("42"), Some(42.0));
/// assert_eq!(parse_operand("3."), Some(3.0));
/// assert_eq!(parse_operand(".5"), Some(0.5));
/// assert_eq!(parse_operand(""), None);
/// assert_eq!(parse_operand("Error"), None);
/// ```
pub fn parse_operand(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if unsigned.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = unsigned.as_bytes();
    let int_len = leading_digits(bytes);
    let mut cursor = int_len;
    let mut frac_len = 0;
    if bytes.get(cursor) == Some(&b'.') {
        frac_len = leading_digits(&bytes[cursor + 1..]);
        cursor += 1 + frac_len;
    }
    if int_len + frac_len == 0 {
        return None;
    }

    let mut exponent = "";
    if matches!(bytes.get(cursor), Some(b'e' | b'E')) {
        let mut end = cursor + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_digits = leading_digits(&bytes[end..]);
        if exp_digits > 0 {
            exponent = &unsigned[cursor..end + exp_digits];
        }
    }

    let int_part = if int_len == 0 { "0" } else { &unsigned[..int_len] };
    let frac_start = int_len + 1;
    let frac_part = if frac_len == 0 {
        "0"
    } else {
        &unsigned[frac_start..frac_start + frac_len]
    };
    let sign = if negative { "-" } else { "" };

    format!("{sign}{int_part}.{frac_part}{exponent}").parse().ok()
}

fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Render a computed value as operand text.
///
/// Integral values carry no fractional part, `-0` renders as `"0"`, and
/// magnitudes outside `[1e-6, 1e21)` switch to exponent notation with an
/// explicit exponent sign.
///
/// ```rust
/// use keycalc::core::format_number;
///
/// assert_eq!(format_number(8.0), "8");
/// assert_eq!(format_number(3.5), "3.5");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Whether `text` is something the current operand can hold: the error
/// sentinel, or a numeral (possibly partial, possibly trimmed from the end
/// of a formatted result such as `"-"`, `"1e+"` or `"Infin"`).
///
/// ```rust
/// use keycalc::core::is_operand_text;
///
/// assert!(is_operand_text("12."));
/// assert!(is_operand_text("Error"));
/// assert!(!is_operand_text("1.2.3"));
/// assert!(!is_operand_text("abc"));
/// ```
pub fn is_operand_text(text: &str) -> bool {
    if text == ERROR_SENTINEL {
        return true;
    }
    let body = text.strip_prefix('-').unwrap_or(text);
    if "Infinity".starts_with(body) || "NaN".starts_with(body) {
        return true;
    }

    let (mantissa, exponent) = match body.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (body, None),
    };
    let mantissa_ok = mantissa.chars().all(|c| c.is_ascii_digit() || c == '.')
        && mantissa.matches('.').count() <= 1;
    let exponent_ok = exponent.map_or(true, |exponent| {
        let digits = exponent
            .strip_prefix(&['+', '-'][..])
            .unwrap_or(exponent);
        mantissa.chars().any(|c| c.is_ascii_digit()) && digits.chars().all(|c| c.is_ascii_digit())
    });
    mantissa_ok && exponent_ok
}
