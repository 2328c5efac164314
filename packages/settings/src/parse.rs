// ABOUTME: Primitive coercion of stored setting strings
// ABOUTME: Literal boolean matching and leading-numeric-prefix float parsing

/// Parses the literal strings `"true"` and `"false"`. Anything else is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parses the longest numeric prefix of `value`, ignoring trailing text.
///
/// Leading whitespace is skipped, then an optional sign followed by either
/// `Infinity` or a decimal literal with optional fraction and exponent.
/// `"3.5abc"` yields `3.5`; `"abc"`, `""` and `"."` yield `None`.
///
/// Values already stored by older clients rely on this leniency, so inputs
/// with trailing garbage must keep parsing.
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let s = value.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    // Exponent only counts when it has digits: "2e" parses as 2
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
