//! Substring matching with optional case folding.

use std::fmt;
use std::ops::Range;

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Match,
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

impl From<bool> for MatchResult {
    #[inline]
    fn from(matched: bool) -> Self {
        if matched {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern cannot be empty")]
    Empty,
}

/// Tests whether `pattern` occurs anywhere in `address`.
///
/// Case-insensitive mode compares the uppercased address against
/// `pattern_upper`, which the caller computes once per run. `pattern` must be
/// non-empty.
#[inline]
pub fn matches(address: &str, pattern: &str, pattern_upper: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        address.contains(pattern)
    } else {
        address.to_uppercase().contains(pattern_upper)
    }
}

/// A non-empty search pattern with its case-folded form precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    upper: String,
    case_sensitive: bool,
}

impl Pattern {
    pub fn new(text: impl Into<String>, case_sensitive: bool) -> Result<Self, PatternError> {
        let text = text.into();
        if text.is_empty() {
            return Err(PatternError::Empty);
        }

        let upper = if case_sensitive {
            String::new()
        } else {
            text.to_uppercase()
        };

        Ok(Self {
            text,
            upper,
            case_sensitive,
        })
    }

    /// The pattern as given.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Uppercase form, empty when matching is case sensitive.
    pub fn upper(&self) -> &str {
        &self.upper
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn matches(&self, address: &str) -> MatchResult {
        matches(address, &self.text, &self.upper, self.case_sensitive).into()
    }

    /// Byte range of the first occurrence in `address`, for highlighting.
    ///
    /// In case-insensitive mode the range is only returned when case folding
    /// keeps byte offsets intact, which holds for ASCII addresses.
    pub fn find(&self, address: &str) -> Option<Range<usize>> {
        if self.case_sensitive {
            return address
                .find(&self.text)
                .map(|start| start..start + self.text.len());
        }

        let folded = address.to_uppercase();
        if folded.len() != address.len() {
            return None;
        }
        let start = folded.find(&self.upper)?;
        let end = start + self.upper.len();
        (address.is_char_boundary(start) && address.is_char_boundary(end)).then_some(start..end)
    }

    /// Expected attempts to find a hex pattern anywhere in an address of
    /// `address_len` hex characters.
    ///
    /// Each character has 16 possible values; with case-sensitive matching
    /// against checksummed addresses every letter also has to land on the
    /// right case. The result is spread over the possible start positions.
    pub fn estimated_difficulty(&self, address_len: usize) -> u64 {
        let len = self.text.chars().count();
        let mut attempts = 16u64.saturating_pow(len as u32);
        if self.case_sensitive {
            let letters = self.text.chars().filter(|c| c.is_ascii_alphabetic()).count();
            attempts = attempts.saturating_mul(2u64.saturating_pow(letters as u32));
        }

        let positions = address_len.saturating_sub(len) + 1;
        (attempts / positions as u64).max(1)
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self, address_len: usize) -> &'static str {
        match self.estimated_difficulty(address_len) {
            0..=1_000 => "Very Easy (< 1 second)",
            1_001..=100_000 => "Easy (seconds)",
            100_001..=10_000_000 => "Medium (minutes)",
            10_000_001..=1_000_000_000 => "Hard (hours)",
            _ => "Very Hard (days or more)",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESSES: &[&str] = &[
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "xxABxx",
        "xxabxx",
        "xxxx",
        "",
    ];

    const PATTERNS: &[&str] = &["AB", "ab", "aB", "5aAe", "BEAED", "x", "0x", "dead"];

    #[test]
    fn test_case_sensitive_is_literal_substring() {
        for address in ADDRESSES {
            for pattern in PATTERNS {
                let upper = pattern.to_uppercase();
                assert_eq!(
                    matches(address, pattern, &upper, true),
                    address.contains(pattern),
                    "{address} / {pattern}"
                );
            }
        }
    }

    #[test]
    fn test_case_insensitive_is_folded_substring() {
        for address in ADDRESSES {
            for pattern in PATTERNS {
                let upper = pattern.to_uppercase();
                assert_eq!(
                    matches(address, pattern, &upper, false),
                    address.to_uppercase().contains(&upper),
                    "{address} / {pattern}"
                );
            }
        }
    }

    #[test]
    fn test_case_fold_symmetry() {
        for address in ADDRESSES {
            for pattern in PATTERNS {
                let upper = pattern.to_uppercase();
                assert_eq!(
                    matches(address, pattern, &upper, false),
                    matches(&address.to_uppercase(), &upper, &upper, false),
                );
            }
        }
    }

    #[test]
    fn test_pattern_matches() {
        let insensitive = Pattern::new("AB", false).unwrap();
        assert!(insensitive.matches("xxABxx").is_match());
        assert!(insensitive.matches("xxabxx").is_match());
        assert!(!insensitive.matches("xxxx").is_match());

        let sensitive = Pattern::new("AB", true).unwrap();
        assert!(sensitive.matches("xxABxx").is_match());
        assert!(!sensitive.matches("xxabxx").is_match());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(Pattern::new("", false), Err(PatternError::Empty));
        assert_eq!(Pattern::new(String::new(), true), Err(PatternError::Empty));
    }

    #[test]
    fn test_upper_precomputed() {
        let pattern = Pattern::new("beEf", false).unwrap();
        assert_eq!(pattern.upper(), "BEEF");
        assert_eq!(pattern.text(), "beEf");
    }

    #[test]
    fn test_find() {
        let pattern = Pattern::new("beef", false).unwrap();
        assert_eq!(pattern.find("0x00BeEf00"), Some(4..8));
        assert_eq!(pattern.find("0x0000"), None);

        let exact = Pattern::new("Ef", true).unwrap();
        assert_eq!(exact.find("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"), Some(34..36));
    }

    #[test]
    fn test_difficulty() {
        let pattern = Pattern::new("dead", false).unwrap();
        // 16^4 spread over 37 start positions
        assert_eq!(pattern.estimated_difficulty(40), 65536 / 37);

        let cased = Pattern::new("dead", true).unwrap();
        assert_eq!(cased.estimated_difficulty(40), 65536 * 16 / 37);

        let digits = Pattern::new("1234", true).unwrap();
        assert_eq!(digits.estimated_difficulty(40), 65536 / 37);
    }

    #[test]
    fn test_difficulty_description() {
        let easy = Pattern::new("a", false).unwrap();
        assert_eq!(easy.difficulty_description(40), "Very Easy (< 1 second)");

        let hard = Pattern::new("deadbeefcafe", false).unwrap();
        assert_eq!(hard.difficulty_description(40), "Very Hard (days or more)");
    }
}
