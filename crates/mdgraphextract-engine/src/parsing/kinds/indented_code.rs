/// Code recognised by indentation alone.
pub struct IndentedCode;

impl IndentedCode {
    pub const SPACES: &'static str = "    ";
    pub const TAB: char = '\t';

    /// Returns the line content after one level of code indentation
    /// (four spaces or a tab), or `None` if the line is not indented enough.
    pub fn strip(line: &str) -> Option<&str> {
        line.strip_prefix(Self::SPACES)
            .or_else(|| line.strip_prefix(Self::TAB))
    }

    /// Whether an indented line may open a new block: it needs content
    /// beyond whitespace.
    pub fn can_open(content: &str) -> bool {
        !content.trim().is_empty()
    }
}
