// Utility functions for parsing metadata field values

use regex::Regex;
use std::sync::OnceLock;

/// Get the regex pattern for splitting multi-value artist credits
fn get_separator_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // Match any of: comma, semicolon, slash, pipe, ideographic comma, ampersand,
        // "x", "ft.", "feat.", "featuring"
        Regex::new(r#"[,;/|、&]|\s+(?:x|ft\.?|feat\.?|featuring)\s+"#).unwrap()
    })
}

fn get_digits_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Parse a multi-value field into individual values
///
/// Splits on: `, ; / | 、 & x ft. feat. featuring`
///
/// # Examples
/// ```
/// use metadata_customizer::metadata::parser::parse_multi_value;
///
/// let artists = parse_multi_value("Neuro-sama & Evil Neuro");
/// assert_eq!(artists, vec!["Neuro-sama", "Evil Neuro"]);
/// ```
pub fn parse_multi_value(value: &str) -> Vec<String> {
    if value.is_empty() {
        return vec![];
    }

    let regex = get_separator_regex();

    regex
        .split(value)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Parse artist field, returning a list of individual artists
pub fn parse_artists(artist: &str) -> Vec<String> {
    parse_multi_value(artist)
}

/// Parse a version string into its digit runs: `"2.10"` -> `[2, 10]`,
/// `"v3"` -> `[3]`, no digits -> `[0]`.
///
/// Runs too large for `u64` count as 0.
pub fn parse_version_components(version: &str) -> Vec<u64> {
    let parts: Vec<u64> = get_digits_regex()
        .find_iter(version)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(0))
        .collect();
    if parts.is_empty() {
        vec![0]
    } else {
        parts
    }
}

/// First digit run of a version string, 0 if none: `"1.10"` -> 1
pub fn leading_version_number(version: &str) -> u64 {
    get_digits_regex()
        .find(version)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Parse an integer field, 0 on empty or malformed input
pub fn parse_int_or_zero(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

/// Parse strings like:
/// - "3" -> (3, 0)
/// - "3/12" -> (3, 12)
///
/// Each side defaults to 0.
pub fn parse_slash_pair(value: &str) -> (i64, i64) {
    let mut parts = value.trim().splitn(2, '/');
    let a = parts.next().map(parse_int_or_zero).unwrap_or(0);
    let b = parts.next().map(parse_int_or_zero).unwrap_or(0);
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separator() {
        assert_eq!(
            parse_multi_value("Artist A, Artist B, Artist C"),
            vec!["Artist A", "Artist B", "Artist C"]
        );
    }

    #[test]
    fn test_ampersand_separator() {
        assert_eq!(
            parse_multi_value("Neuro & Evil"),
            vec!["Neuro", "Evil"]
        );
    }

    #[test]
    fn test_ft_separator() {
        assert_eq!(
            parse_multi_value("Artist A ft. Artist B"),
            vec!["Artist A", "Artist B"]
        );
        assert_eq!(
            parse_multi_value("Artist A featuring Artist B"),
            vec!["Artist A", "Artist B"]
        );
        assert_eq!(
            parse_multi_value("Artist A x Artist B"),
            vec!["Artist A", "Artist B"]
        );
    }

    #[test]
    fn test_japanese_comma() {
        assert_eq!(
            parse_multi_value("アーティストA、アーティストB"),
            vec!["アーティストA", "アーティストB"]
        );
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(parse_multi_value(""), Vec::<String>::new());
    }

    #[test]
    fn test_single_value() {
        assert_eq!(parse_artists("Single Artist"), vec!["Single Artist"]);
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(
            parse_multi_value("  Artist A  ,  Artist B  "),
            vec!["Artist A", "Artist B"]
        );
    }

    #[test]
    fn test_version_components() {
        assert_eq!(parse_version_components("2.10"), vec![2, 10]);
        assert_eq!(parse_version_components("v3"), vec![3]);
        assert_eq!(parse_version_components("final"), vec![0]);
        assert_eq!(parse_version_components(""), vec![0]);
    }

    #[test]
    fn test_leading_version_number() {
        assert_eq!(leading_version_number("1.10"), 1);
        assert_eq!(leading_version_number("v12b"), 12);
        assert_eq!(leading_version_number("none"), 0);
    }

    #[test]
    fn test_slash_pair() {
        assert_eq!(parse_slash_pair("3/12"), (3, 12));
        assert_eq!(parse_slash_pair("7"), (7, 0));
        assert_eq!(parse_slash_pair(""), (0, 0));
        assert_eq!(parse_slash_pair("a/5"), (0, 5));
    }

    #[test]
    fn test_int_or_zero() {
        assert_eq!(parse_int_or_zero(" 4 "), 4);
        assert_eq!(parse_int_or_zero("4.0"), 0);
        assert_eq!(parse_int_or_zero(""), 0);
    }
}
