//! Per-character fallback for anything the curated tables and the subscript
//! run pass left behind.
//!
//! Resolution order for one character:
//!   1. `SPECIAL_CHARS` (single-character keys)
//!   2. `SUBSCRIPTS`
//!   3. the Unicode character name, through the ordered `NAME_RULES`
//!   4. compatibility decomposition (NFKD), ASCII code points only
//!
//! A character with no name, or one no step resolves, is an `UnmappableChar`.

use unicode_normalization::UnicodeNormalization;

use crate::error::UnmappableChar;
use crate::tables;

/// One step of the name-based dispatch: a predicate on the lowercased
/// Unicode name and a handler that derives an ASCII token from it.
pub struct NameRule {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub derive: fn(&str) -> Option<String>,
}

impl NameRule {
    pub fn apply(&self, name: &str) -> Option<String> {
        if (self.applies)(name) {
            (self.derive)(name).filter(|token| !token.is_empty())
        } else {
            None
        }
    }
}

/// Tried in order; a rule that applies but derives nothing lets the next one try.
pub static NAME_RULES: &[NameRule] = &[
    NameRule {
        name: "greek-letter",
        applies: is_greek_letter,
        derive: last_alphabetic_token,
    },
    NameRule {
        name: "sub-superscript",
        applies: is_sub_or_superscript,
        derive: joined_alphanumeric_tokens,
    },
];

fn is_greek_letter(name: &str) -> bool {
    name.contains("greek") && name.contains("letter")
}

fn is_sub_or_superscript(name: &str) -> bool {
    name.contains("subscript") || name.contains("superscript")
}

/// "greek small letter theta" -> "theta"
fn last_alphabetic_token(name: &str) -> Option<String> {
    name.split_whitespace()
        .rev()
        .find(|token| token.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_string)
}

/// "superscript latin small letter n" -> "superscriptlatinsmalllettern"
fn joined_alphanumeric_tokens(name: &str) -> Option<String> {
    let joined: String = name
        .replace('-', " ")
        .split_whitespace()
        .filter(|token| token.chars().all(|c| c.is_ascii_alphanumeric()))
        .collect();
    Some(joined)
}

/// ASCII code points left after compatibility decomposition ("é" -> "e").
fn decompose_to_ascii(c: char) -> Option<String> {
    let ascii: String = std::iter::once(c).nfkd().filter(char::is_ascii).collect();
    (!ascii.is_empty()).then_some(ascii)
}

/// Lowercased Unicode name, if the character has one.
pub fn char_name(c: char) -> Option<String> {
    unicode_names2::name(c).map(|name| name.to_string().to_lowercase())
}

/// ASCII replacement for a single non-ASCII character.
pub fn char_replacement(c: char) -> Result<String, UnmappableChar> {
    if let Some(spelled) = tables::special_replacement(c) {
        return Ok(spelled.to_string());
    }
    if let Some(mapped) = tables::subscript_replacement(c) {
        return Ok(mapped.to_string());
    }

    let name = char_name(c).ok_or(UnmappableChar::new(c))?;
    if let Some(token) = resolve_by_name(NAME_RULES, &name) {
        tracing::trace!(ch = %c, %token, "derived from unicode name");
        return Ok(token);
    }

    decompose_to_ascii(c).ok_or(UnmappableChar::new(c))
}

/// First non-empty token any rule derives from `name`.
pub fn resolve_by_name(rules: &[NameRule], name: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        let token = rule.apply(name)?;
        tracing::trace!(rule = rule.name, %token, "name rule matched");
        Some(token)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_take_priority() {
        assert_eq!(char_replacement('\u{0398}').unwrap(), "Theta");
        assert_eq!(char_replacement('\u{2081}').unwrap(), "1");
        assert_eq!(char_replacement('\u{1D62}').unwrap(), "i");
    }

    #[test]
    fn test_greek_letter_from_name() {
        // Not curated; recovered from "GREEK SMALL LETTER OMEGA"
        assert_eq!(char_replacement('\u{03C9}').unwrap(), "omega");
        // Capital letters lose their case through the name
        assert_eq!(char_replacement('\u{03A9}').unwrap(), "omega");
        assert_eq!(char_replacement('\u{03B1}').unwrap(), "alpha");
    }

    #[test]
    fn test_greek_rule_takes_last_alphabetic_token() {
        assert_eq!(
            last_alphabetic_token("greek small letter final sigma").as_deref(),
            Some("sigma")
        );
        // Digits are skipped, so the keyword itself can be the result
        assert_eq!(
            last_alphabetic_token("greek letter 42").as_deref(),
            Some("letter")
        );
        assert_eq!(last_alphabetic_token("42 7"), None);
    }

    #[test]
    fn test_subscript_name_rule() {
        // LATIN SUBSCRIPT SMALL LETTER SCHWA has no table entry
        assert_eq!(
            char_replacement('\u{2094}').unwrap(),
            "latinsubscriptsmallletterschwa"
        );
        assert_eq!(
            joined_alphanumeric_tokens("superscript two-thirds").as_deref(),
            Some("superscripttwothirds")
        );
    }

    fn always(_: &str) -> bool {
        true
    }

    fn empty_token(_: &str) -> Option<String> {
        Some(String::new())
    }

    fn no_token(_: &str) -> Option<String> {
        None
    }

    fn whole_name(name: &str) -> Option<String> {
        Some(name.replace(' ', "_"))
    }

    #[test]
    fn test_rule_that_derives_nothing_falls_through() {
        let rules = [
            NameRule { name: "empty", applies: always, derive: empty_token },
            NameRule { name: "none", applies: always, derive: no_token },
            NameRule { name: "whole", applies: always, derive: whole_name },
        ];
        assert_eq!(rules[0].apply("x"), None);
        assert_eq!(rules[1].apply("x"), None);
        assert_eq!(
            resolve_by_name(&rules, "snow man").as_deref(),
            Some("snow_man")
        );
        assert_eq!(resolve_by_name(&rules[..2], "snow man"), None);
    }

    #[test]
    fn test_rule_that_does_not_apply_is_skipped() {
        let greek = &NAME_RULES[0];
        assert_eq!(greek.name, "greek-letter");
        assert_eq!(greek.apply("latin small letter a"), None);
        assert_eq!(
            resolve_by_name(NAME_RULES, "superscript latin small letter n").as_deref(),
            Some("superscriptlatinsmalllettern")
        );
    }

    #[test]
    fn test_decomposition_fallback() {
        assert_eq!(char_replacement('\u{00E9}').unwrap(), "e"); // é
        assert_eq!(char_replacement('\u{2113}').unwrap(), "l"); // ℓ
        assert_eq!(char_replacement('\u{FB01}').unwrap(), "fi"); // ﬁ
    }

    #[test]
    fn test_unmappable() {
        let err = char_replacement('\u{20AC}').unwrap_err(); // €
        assert_eq!(err.ch, '\u{20AC}');
        assert_eq!(err.code_point, 0x20AC);
        assert!(char_replacement('\u{2603}').is_err()); // ☃
        assert!(char_replacement('\u{4E2D}').is_err()); // 中
    }

    #[test]
    fn test_char_name() {
        assert_eq!(
            char_name('\u{03C9}').as_deref(),
            Some("greek small letter omega")
        );
    }
}
