//! Tag matching functions
//!
//! Signatures and feature descriptions are written by different hands, so
//! tags rarely line up exactly (`"white_marble"` vs `"white marble"` vs
//! `"White-Marble"`). Every comparison in the scorer goes through the
//! functions in this module.

/// Normalize a tag for fuzzy comparison
///
/// Lower-cases, turns each run of `_`, `-` or whitespace into one space and
/// trims the result.
pub fn normalize_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut pending_space = false;
    for ch in tag.chars().flat_map(char::to_lowercase) {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}

/// Fuzzy tag match
///
/// Case-insensitive, separator-insensitive substring check in either
/// direction. An empty tag (after normalization) never matches.
///
/// # Examples
/// ```
/// use heritage_matcher::fuzzy_tag_match;
///
/// assert!(fuzzy_tag_match("garden", "garden_tomb"));
/// assert!(fuzzy_tag_match("White Marble", "white_marble"));
/// assert!(!fuzzy_tag_match("", "dome"));
/// ```
pub fn fuzzy_tag_match(a: &str, b: &str) -> bool {
    let a = normalize_tag(a);
    let b = normalize_tag(b);
    normalized_match(&a, &b)
}

/// Fuzzy match on tags that are already normalized
pub(crate) fn normalized_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Fuzzy match of `tag` against any entry of `candidates`
pub fn matches_any<'a, I>(tag: &str, candidates: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let tag = normalize_tag(tag);
    candidates
        .into_iter()
        .any(|candidate| normalized_match(&tag, &normalize_tag(candidate)))
}

/// Exact, case-sensitive tag equality
pub fn exact_tag_match(a: &str, b: &str) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("White_Marble"), "white marble");
        assert_eq!(normalize_tag("  red--sandstone__walls "), "red sandstone walls");
        assert_eq!(normalize_tag("___"), "");
        assert_eq!(normalize_tag("dome"), "dome");
    }

    #[test]
    fn test_fuzzy_match_both_directions() {
        assert!(fuzzy_tag_match("hilltop", "hilltop_vaishnava_temple"));
        assert!(fuzzy_tag_match("hilltop_vaishnava_temple", "hilltop"));
    }

    #[test]
    fn test_fuzzy_match_ignores_case_and_separators() {
        assert!(fuzzy_tag_match("FOUR MINARETS", "four_minarets"));
        assert!(fuzzy_tag_match("four-minarets", "four_minarets_square_base"));
        assert!(fuzzy_tag_match("Red Sandstone", "red_sandstone_walls"));
    }

    #[test]
    fn test_fuzzy_non_match() {
        assert!(!fuzzy_tag_match("coastal", "white_marble"));
        assert!(!fuzzy_tag_match("chariot", "charminar"));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!fuzzy_tag_match("", ""));
        assert!(!fuzzy_tag_match("_", "dome"));
        assert!(!fuzzy_tag_match("dome", "  "));
    }

    #[test]
    fn test_separator_boundaries_survive() {
        // "red sandstone" must not match across a word boundary it lacks
        assert!(!fuzzy_tag_match("redsandstone", "red_sandstone"));
    }

    #[test]
    fn test_matches_any() {
        let features = ["white_marble", "central_dome", "four_minarets"];
        assert!(matches_any("central dome", features.iter().copied()));
        assert!(!matches_any("wheels", features.iter().copied()));
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        assert!(exact_tag_match("dome", "dome"));
        assert!(!exact_tag_match("Dome", "dome"));
    }
}
