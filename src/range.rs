use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Inclusive range typed by the user: `3`, `1-4`, `(1..4)` or the open `2-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u32,
    /// `None` runs up to the last available item.
    pub end: Option<u32>,
}

impl Range {
    pub fn new(start: u32, end: Option<u32>) -> Self {
        Self { start, end }
    }

    pub fn expand(&self, last: u32) -> RangeInclusive<u32> {
        self.start..=self.end.unwrap_or(last)
    }

    /// Whether an episode number falls in the range; fractional numbers such
    /// as `12.5` belong to the range of their integer part.
    pub fn contains(&self, number: f32) -> bool {
        let number = number.trunc();

        number >= self.start as f32 && self.end.is_none_or(|end| number <= end as f32)
    }
}

impl FromStr for Range {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, <Self as FromStr>::Err> {
        let s = s.trim().trim_matches(|p| p == '(' || p == ')');
        let open = s.ends_with(['-', '.']);

        let bounds = s
            .split(&[',', '-', '.'])
            .filter_map(|c| c.trim().parse::<u32>().ok())
            .collect::<Vec<_>>();

        let range = match (bounds.as_slice(), open) {
            (&[start], true) => Self::new(start, None),
            (&[start], false) => Self::new(start, Some(start)),
            (&[start, .., end], _) if start <= end => Self::new(start, Some(end)),
            _ => bail!("Invalid range"),
        };

        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let range = Range::from_str("(0..5)").unwrap();
        assert_eq!(range, Range::new(0, Some(5)));

        let range = Range::from_str("1-5").unwrap();
        assert_eq!(range, Range::new(1, Some(5)));

        let range = Range::from_str("3").unwrap();
        assert_eq!(range, Range::new(3, Some(3)));

        let range = Range::from_str("4-").unwrap();
        assert_eq!(range, Range::new(4, None));
    }

    #[test]
    fn test_expand() {
        assert!(Range::new(2, None).expand(6).eq(2..=6));
        assert!(Range::new(2, Some(4)).expand(6).eq(2..=4));
    }

    #[test]
    fn test_contains() {
        let range = Range::new(2, Some(3));
        assert!(range.contains(2.0));
        assert!(range.contains(3.5));
        assert!(!range.contains(1.0));
        assert!(!range.contains(4.0));

        assert!(Range::new(10, None).contains(1000.0));
    }

    #[test]
    fn test_wrong_range() {
        assert!(Range::from_str("-").is_err());
        assert!(Range::from_str("5-2").is_err());
        assert!(Range::from_str("ciao").is_err());
    }
}
