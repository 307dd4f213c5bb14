//! Gem version ordering.
//!
//! Versions are compared the way RubyGems compares them: the string is split
//! into runs of digits and runs of letters, numeric runs compare numerically,
//! a letter run sorts before any number (so `2.0.0.rc1 < 2.0.0`), and missing
//! trailing segments count as zero (so `1.0 == 1.0.0`).

use std::cmp::Ordering;
use std::fmt;

/// One run of a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Number(u64),
    Text(String),
}

/// A parsed gem version that keeps its original spelling for display.
#[derive(Debug, Clone)]
pub struct GemVersion {
    raw: String,
    segments: Vec<Segment>,
}

impl GemVersion {
    /// Parse a version string. Never fails; unparseable text sorts as letters.
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut current_is_digit = false;

        for c in raw.chars() {
            if c.is_ascii_alphanumeric() {
                let is_digit = c.is_ascii_digit();
                if !current.is_empty() && is_digit != current_is_digit {
                    segments.push(Self::segment(&current, current_is_digit));
                    current.clear();
                }
                current_is_digit = is_digit;
                current.push(c);
            } else if !current.is_empty() {
                segments.push(Self::segment(&current, current_is_digit));
                current.clear();
            }
        }
        if !current.is_empty() {
            segments.push(Self::segment(&current, current_is_digit));
        }

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    fn segment(text: &str, is_digit: bool) -> Segment {
        if is_digit {
            text.parse()
                .map(Segment::Number)
                .unwrap_or_else(|_| Segment::Text(text.to_string()))
        } else {
            Segment::Text(text.to_lowercase())
        }
    }

    /// The version as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the text looks like a version at all (starts with a digit).
    pub fn looks_like_version(text: &str) -> bool {
        text.chars().next().is_some_and(|c| c.is_ascii_digit())
    }
}

impl fmt::Display for GemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for GemVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GemVersion {}

impl PartialOrd for GemVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GemVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let zero = Segment::Number(0);
        let len = self.segments.len().max(other.segments.len());

        for i in 0..len {
            let lhs = self.segments.get(i).unwrap_or(&zero);
            let rhs = other.segments.get(i).unwrap_or(&zero);
            let ord = match (lhs, rhs) {
                (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
                (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
                (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
                (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> GemVersion {
        GemVersion::parse(s)
    }

    #[test]
    fn numeric_segments_compare_numerically() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("2.0.0") > v("1.99.99"));
    }

    #[test]
    fn trailing_zeros_are_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("3"), v("3.0.0.0"));
    }

    #[test]
    fn prerelease_sorts_before_release() {
        assert!(v("2.0.0.rc1") < v("2.0.0"));
        assert!(v("2.0.0.beta") < v("2.0.0.rc1"));
        assert!(v("2.0.0.pre") > v("1.9.9"));
    }

    #[test]
    fn letters_split_from_digits() {
        // "1.0.0a1" has the same segments as "1.0.0.a.1"
        assert_eq!(v("1.0.0a1"), v("1.0.0.a.1"));
    }

    #[test]
    fn display_keeps_original_spelling() {
        assert_eq!(v("1.0.0.RC1").to_string(), "1.0.0.RC1");
    }

    #[test]
    fn sorting_descending() {
        let mut versions = vec![v("1.0.0"), v("10.0"), v("2.3.1"), v("2.3.1.pre")];
        versions.sort_by(|a, b| b.cmp(a));
        let rendered: Vec<_> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(rendered, vec!["10.0", "2.3.1", "2.3.1.pre", "1.0.0"]);
    }

    #[test]
    fn looks_like_version_requires_leading_digit() {
        assert!(GemVersion::looks_like_version("1.2"));
        assert!(!GemVersion::looks_like_version("rc1"));
        assert!(!GemVersion::looks_like_version(""));
    }
}
