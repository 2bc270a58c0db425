//! Case handling: reapplying the casing pattern of an original token
//! to a lowercase replacement.

use itertools::{EitherOrBoth, Itertools};
use smol_str::SmolStr;

/// Lowercases every character of `s`.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Uppercases every character of `s`.
#[inline(always)]
pub fn upper_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_uppercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Uppercases the first character of `s`, leaving the rest untouched.
#[inline(always)]
pub fn upper_first(s: &str) -> SmolStr {
    let mut c = s.chars();
    match c.next() {
        None => SmolStr::new(""),
        Some(f) => SmolStr::from(f.to_uppercase().collect::<String>() + c.as_str()),
    }
}

/// Whether the word is entirely uppercase.
pub fn is_all_caps(word: &str) -> bool {
    upper_case(word) == word
}

/// Whether only the first character of the word is uppercase.
pub fn is_first_caps(word: &str) -> bool {
    upper_first(word) == word
}

/// Applies the casing pattern of `original` to `replacement`: all-caps
/// stays all-caps, a capitalized initial stays capitalized, anything
/// else is lowercased.
pub fn apply_case(original: &str, replacement: &str) -> SmolStr {
    if is_all_caps(original) {
        upper_case(replacement)
    } else if original.chars().next().map_or(false, char::is_uppercase) {
        upper_first(&lower_case(replacement))
    } else {
        lower_case(replacement)
    }
}

/// Rebuilds `replacement` with the formatting of `original`.
///
/// Hyphen-separated parts are cased independently, zipping original
/// parts with replacement parts positionally; when the replacement has
/// fewer parts the remaining original parts are kept, and surplus
/// replacement parts are dropped. An empty original returns the
/// replacement unchanged.
pub fn preserve_formatting(original: &str, replacement: &str) -> SmolStr {
    if original.is_empty() {
        return SmolStr::new(replacement);
    }

    if original.contains('-') {
        let parts: Vec<SmolStr> = original
            .split('-')
            .zip_longest(replacement.split('-'))
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(original, replacement) => {
                    Some(apply_case(original, replacement))
                }
                EitherOrBoth::Left(original) => Some(apply_case(original, original)),
                EitherOrBoth::Right(_) => None,
            })
            .collect();
        return SmolStr::from(parts.join("-"));
    }

    apply_case(original, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing_rule() {
        assert_eq!(apply_case("PARIS", "paris"), "PARIS");
        assert_eq!(apply_case("Pariss", "paris"), "Paris");
        assert_eq!(apply_case("pariss", "paris"), "paris");
        // Mixed case collapses to the lowercase replacement.
        assert_eq!(apply_case("pArIs", "paris"), "paris");
    }

    #[test]
    fn single_capital_counts_as_all_caps() {
        assert_eq!(apply_case("P", "paris"), "PARIS");
    }

    #[test]
    fn empty_original_returns_replacement() {
        assert_eq!(preserve_formatting("", "paris"), "paris");
    }

    #[test]
    fn hyphen_parts_are_cased_independently() {
        assert_eq!(
            preserve_formatting("Well-KNONW", "well-known"),
            "Well-KNOWN"
        );
    }

    #[test]
    fn replacement_with_fewer_parts_falls_back_to_original() {
        assert_eq!(
            preserve_formatting("Well-knonw", "well"),
            "Well-knonw"
        );
    }

    #[test]
    fn surplus_replacement_parts_are_dropped() {
        assert_eq!(preserve_formatting("Wellknonw", "well"), "Well");
        assert_eq!(
            preserve_formatting("Well-knonw", "well-known-extra"),
            "Well-known"
        );
    }

    #[test]
    fn unicode_casing() {
        assert_eq!(apply_case("ÉTÉ", "ete"), "ETE");
        assert_eq!(apply_case("Über", "uber"), "Uber");
    }
}
