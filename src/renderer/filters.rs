use log::warn;
use regex::Regex;

/// Tests if a string matches a regular expression.
///
/// Registered as the `regex` filter and used to validate `skip` keys. An invalid
/// pattern is logged and never matches.
///
/// # Arguments
/// * `val` - The string to test
/// * `re` - The regular expression pattern
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// Replaces every match of `re` in `val`. An invalid pattern leaves `val` unchanged.
///
/// Registered as the `regex_replace` filter.
pub fn regex_replace_filter(val: &str, re: &str, replacement: &str) -> String {
    match Regex::new(re) {
        Ok(re) => re.replace_all(val, replacement).into_owned(),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            val.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_filter_matches() {
        assert!(regex_filter("hello123", r"hello\d+"));
    }

    #[test]
    fn test_regex_filter_no_match() {
        assert!(!regex_filter("hello", r"\d+"));
    }

    #[test]
    fn test_regex_filter_invalid_regex() {
        assert!(!regex_filter("anything", r"([unclosed"));
    }

    #[test]
    fn test_regex_replace_filter() {
        assert_eq!(regex_replace_filter("10.0.0.1", r"\.", "-"), "10-0-0-1");
        assert_eq!(regex_replace_filter("keep", r"([unclosed", "x"), "keep");
    }
}
