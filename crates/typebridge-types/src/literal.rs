//! Scalar literal helpers

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts
/// `0`, `f`, `F`, `FALSE`, `false`, `False`. Anything else is rejected.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Drop an all-zero fractional part: `"12.000"` -> `"12"`.
///
/// Strings with a non-zero fraction are returned unchanged.
pub fn trim_zero_decimal(s: &str) -> &str {
    match s.split_once('.') {
        Some((int_part, frac))
            if !int_part.is_empty() && !frac.is_empty() && frac.bytes().all(|b| b == b'0') =>
        {
            int_part
        }
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepted_spellings() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
    }

    #[test]
    fn test_parse_bool_rejects() {
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("tRuE"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_trim_zero_decimal() {
        assert_eq!(trim_zero_decimal("12.000"), "12");
        assert_eq!(trim_zero_decimal("12.5"), "12.5");
        assert_eq!(trim_zero_decimal("12"), "12");
        assert_eq!(trim_zero_decimal(".0"), ".0");
    }
}
