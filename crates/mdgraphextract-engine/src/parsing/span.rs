/// A byte range `[start, end)` within a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when the two spans share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Self::new(m.start(), m.end())
    }
}

/// 1-based column of the byte offset `byte` in `line`, counted in chars.
pub fn column_at(line: &str, byte: usize) -> usize {
    line[..byte].chars().count() + 1
}

/// Column just past the last character of `line`.
pub fn end_column(line: &str) -> usize {
    line.chars().count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_spans() {
        assert!(Span::new(0, 5).overlaps(Span::new(4, 8)));
        assert!(Span::new(4, 8).overlaps(Span::new(0, 5)));
        assert!(Span::new(2, 3).overlaps(Span::new(0, 10)));
    }

    #[test]
    fn touching_spans_do_not_overlap() {
        assert!(!Span::new(0, 5).overlaps(Span::new(5, 8)));
        assert!(!Span::new(5, 8).overlaps(Span::new(0, 5)));
    }

    #[test]
    fn columns_count_chars() {
        assert_eq!(column_at("abc", 0), 1);
        assert_eq!(column_at("äbc", 2), 2);
        assert_eq!(end_column("tschüß"), 7);
        assert_eq!(end_column(""), 1);
    }
}
