//! Address-string parsing for the city/state fallback.

use regex::Regex;
use std::sync::OnceLock;

/// US-style "City, ST 12345" or "City, ST" anywhere in the value.
fn address_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?P<city>[^,]+),\s*(?P<state>[A-Za-z]{2})(?:\s+\d{4,6})?").unwrap()
    })
}

/// Extract (city, state) from a free-text address value.
///
/// City is trimmed, state is upper-cased. Returns `None` when the value
/// does not contain the pattern.
pub fn parse_address(value: &str) -> Option<(String, String)> {
    let caps = address_regex().captures(value)?;
    let city = caps.name("city")?.as_str().trim().to_string();
    let state = caps.name("state")?.as_str().to_uppercase();
    Some((city, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_state_zip() {
        assert_eq!(
            parse_address("Boston, MA 02110"),
            Some(("Boston".to_string(), "MA".to_string()))
        );
    }

    #[test]
    fn test_city_state_without_zip() {
        assert_eq!(
            parse_address("Seattle, wa"),
            Some(("Seattle".to_string(), "WA".to_string()))
        );
    }

    #[test]
    fn test_leftmost_comma_wins() {
        // Multi-part addresses match at the first comma.
        assert_eq!(
            parse_address("Pier 70, Seattle, WA 98109"),
            Some(("Pier 70".to_string(), "SE".to_string()))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(parse_address("not an address"), None);
        assert_eq!(parse_address(""), None);
    }
}
