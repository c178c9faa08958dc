/// Quoted (cited) lines, all `>` syntax knowledge lives here.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips blockquote prefixes from a line, returning (depth, byte_offset).
    ///
    /// Handles various forms: `> text`, `>> nested`, `> > spaced nested`,
    /// `>text`. Whitespace before and between markers is skipped.
    ///
    /// # Returns
    /// - `depth`: Number of `>` prefixes found (0 if not a blockquote)
    /// - `byte_offset`: Index into `s` where content begins after prefixes
    pub fn strip_prefixes(s: &str) -> (usize, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0usize;

        loop {
            let mut j = i;
            while j < b.len() && (b[j] == b' ' || b[j] == b'\t') {
                j += 1;
            }
            if j < b.len() && b[j] == (Self::PREFIX as u8) {
                depth += 1;
                i = j + 1;
            } else {
                break;
            }
        }
        (depth, i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_prefixes("hello"), (0, 0));
        assert_eq!(BlockQuote::strip_prefixes("  hello"), (0, 0));
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_prefixes("> hello"), (1, 1));
    }

    #[test]
    fn strip_double_quote() {
        assert_eq!(BlockQuote::strip_prefixes("> > hello"), (2, 3));
    }

    #[test]
    fn strip_nested_quote_no_space() {
        assert_eq!(BlockQuote::strip_prefixes(">> hello"), (2, 2));
        assert_eq!(BlockQuote::strip_prefixes(">Quote"), (1, 1));
    }

    #[test]
    fn strip_with_tabs_between_markers() {
        assert_eq!(BlockQuote::strip_prefixes(" >\t>\t> x"), (3, 6));
    }
}
