//! Attribute name sanitizing and validation.
//!
//! Attribute names end up inside generated search filters such as
//! `(uid=jdoe)`, so anything user- or config-supplied is either checked with
//! [`is_valid_attr`] or scrubbed with [`sanitize_attr`] before use.
//!
//! Two name forms are accepted by directories:
//!
//! - short names (`cn`, `sAMAccountName`, `x-custom-1`)
//! - numeric OIDs (`2.5.4.3`)

use std::sync::OnceLock;

use regex_lite::Regex;

/// Characters that are never allowed in an attribute name. Whitespace is
/// stripped as well but is matched with [`char::is_whitespace`].
pub const ILLEGAL_ATTR_CHARS: &[char] = &[
    '#', '$', '\'', '(', ')', '+', ',', ';', '<', '=', '>', '\\', '_', '{', '}',
];

/// Short attribute name: a letter, then letters, digits or hyphens.
pub const SHORT_NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9-]*$";

/// Numeric OID: dot-separated numbers without leading zeros.
pub const NUMERIC_OID_PATTERN: &str = r"^(?:0|[1-9][0-9]*)(?:\.(?:0|[1-9][0-9]*))*$";

fn short_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SHORT_NAME_PATTERN).expect("short name pattern compiles"))
}

fn numeric_oid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMERIC_OID_PATTERN).expect("numeric OID pattern compiles"))
}

/// Remove whitespace and filter-significant characters from `attr`.
///
/// The result is not guaranteed to be a valid attribute (`1ab` survives
/// untouched), only safe to splice into a filter.
pub fn sanitize_attr(attr: &str) -> String {
    attr.chars()
        .filter(|c| !c.is_whitespace() && !ILLEGAL_ATTR_CHARS.contains(c))
        .collect()
}

/// Whether `attr` is a short attribute name or a numeric OID.
pub fn is_valid_attr(attr: &str) -> bool {
    is_short_name(attr) || is_numeric_oid(attr)
}

/// Whether `attr` is a short attribute name such as `cn` or `a1-b2`.
pub fn is_short_name(attr: &str) -> bool {
    short_name_re().is_match(attr)
}

/// Whether `attr` is a numeric OID such as `2.5.4.3`.
pub fn is_numeric_oid(attr: &str) -> bool {
    numeric_oid_re().is_match(attr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_whitespace() {
        assert_eq!(sanitize_attr(""), "");
        assert_eq!(sanitize_attr("   "), "");
        assert_eq!(sanitize_attr(" a- b"), "a-b");
        assert_eq!(sanitize_attr("a\tb"), "ab");
        assert_eq!(sanitize_attr("a\nb"), "ab");
    }

    #[test]
    fn test_sanitize_special_characters() {
        assert_eq!(
            sanitize_attr("a#b$c'd(e)f+g,h;i<j=k>l\\m_n{o}p"),
            "abcdefghijklmnop"
        );
    }

    #[test]
    fn test_sanitize_keeps_other_characters() {
        // Technically invalid identifiers are left alone.
        for attr in ["1ab", "1.a.2", ".", "a.b", "1-2-3", "-1a", "1-a"] {
            assert_eq!(sanitize_attr(attr), attr);
        }
        assert_eq!(sanitize_attr("c*n"), "c*n");
        assert_eq!(sanitize_attr("名前"), "名前");
    }

    #[test]
    fn test_sanitize_idempotent() {
        let samples = [
            "",
            "  uid ",
            "a#b$c'd(e)f+g,h;i<j=k>l\\m_n{o}p",
            "(uid=*)",
            "user_name",
            "\u{00a0}cn\u{2003}",
            "1.2.3",
        ];
        for s in samples {
            let once = sanitize_attr(s);
            assert_eq!(sanitize_attr(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn test_valid_short_names() {
        for attr in ["a", "a1", "a1-", "a-b", "a1-b2", "sAMAccountName"] {
            assert!(is_valid_attr(attr), "{attr} should be valid");
            assert!(is_short_name(attr));
        }
        for attr in ["1a", "-a", "-1a", "1-a", "a_b", "a b", "é"] {
            assert!(!is_valid_attr(attr), "{attr} should be invalid");
        }
    }

    #[test]
    fn test_valid_numeric_oids() {
        for attr in [
            "0",
            "1",
            "0.1",
            "1.2",
            "0.0.0",
            "1.2.3",
            "123.456.789",
            "12345678901234567890",
            "1.2.3.4.5.6.7.8.9.10.11.12.13.14.15.16.17.18.19.20",
        ] {
            assert!(is_valid_attr(attr), "{attr} should be valid");
            assert!(is_numeric_oid(attr));
        }
        for attr in [".", "1.", ".1", "1..1", "1.-1", "01", "1.02", "1.a.2"] {
            assert!(!is_valid_attr(attr), "{attr} should be invalid");
        }
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(!is_valid_attr(""));
    }

    #[test]
    fn test_sanitize_never_changes_valid_attr() {
        for attr in ["cn", "a1-", "x-custom-attr", "0", "2.5.4.3", "1.3.6.1.4.1.1466"] {
            assert!(is_valid_attr(attr));
            assert_eq!(sanitize_attr(attr), attr);
        }
    }
}
