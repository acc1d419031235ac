//! Identifier and tag normalization utilities.
//!
//! Record identifiers are compared verbatim (`"T300"` and `"t300"` are
//! different records). Category tags are free text and compared after
//! normalization.

/// Normalize a free-text tag for case-insensitive comparison.
///
/// Trims, lowercases, and collapses internal whitespace to single spaces.
///
/// # Examples
///
/// ```
/// use complab_core::util::ids::normalize_tag;
///
/// assert_eq!(normalize_tag("  Fiber "), "fiber");
/// assert_eq!(normalize_tag("Carbon   Fiber"), "carbon fiber");
/// ```
pub fn normalize_tag(tag: &str) -> String {
    tag.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Percent-encode an identifier for use as a query-string value.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through; everything
/// else is encoded byte-wise as UTF-8.
///
/// # Examples
///
/// ```
/// use complab_core::util::ids::encode_query_value;
///
/// assert_eq!(encode_query_value("T300"), "T300");
/// assert_eq!(encode_query_value("IM7 / 8552"), "IM7%20%2F%208552");
/// ```
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Read a single parameter from a query string (`?id=T300&x=1` or `id=T300`).
///
/// Returns the percent-decoded value of the first occurrence of `name`, or
/// `None` when the parameter is absent or empty.
///
/// # Examples
///
/// ```
/// use complab_core::util::ids::query_param;
///
/// assert_eq!(query_param("?id=T300", "id"), Some("T300".to_string()));
/// assert_eq!(query_param("?id=IM7%2F8552", "id"), Some("IM7/8552".to_string()));
/// assert_eq!(query_param("?other=1", "id"), None);
/// assert_eq!(query_param("?id=", "id"), None);
/// ```
pub fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_query_value(value))
        .filter(|value| !value.is_empty())
}

fn decode_query_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_simple() {
        assert_eq!(normalize_tag("Matrix"), "matrix");
    }

    #[test]
    fn test_normalize_tag_whitespace() {
        assert_eq!(normalize_tag("  High   Modulus  Fiber "), "high modulus fiber");
    }

    #[test]
    fn test_normalize_tag_empty() {
        assert_eq!(normalize_tag(""), "");
        assert_eq!(normalize_tag("   "), "");
    }

    #[test]
    fn test_encode_query_value_unreserved() {
        assert_eq!(encode_query_value("AS4-8552_v1.0~x"), "AS4-8552_v1.0~x");
    }

    #[test]
    fn test_encode_query_value_reserved() {
        assert_eq!(encode_query_value("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query_value("\"><"), "%22%3E%3C");
    }

    #[test]
    fn test_query_param_multiple() {
        assert_eq!(query_param("?a=1&id=X&id=Y", "id"), Some("X".to_string()));
    }

    #[test]
    fn test_query_param_plus_and_bad_escape() {
        assert_eq!(query_param("id=a+b", "id"), Some("a b".to_string()));
        assert_eq!(query_param("id=100%", "id"), Some("100%".to_string()));
        assert_eq!(query_param("id=%zz", "id"), Some("%zz".to_string()));
    }

    #[test]
    fn test_query_param_flag_without_value() {
        assert_eq!(query_param("?id", "id"), None);
    }

    #[test]
    fn test_encode_decode_inverse() {
        let id = "IM7 / 8552 (ü)";
        let query = format!("?id={}", encode_query_value(id));
        assert_eq!(query_param(&query, "id"), Some(id.to_string()));
    }
}
