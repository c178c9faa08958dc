/// YAML front matter delimited by `---` at the top of a document.
pub struct FrontMatter;

impl FrontMatter {
    pub const OPEN: &'static str = "---";
    /// Lines that close the header; YAML allows either document marker.
    pub const CLOSE: [&'static str; 2] = ["---", "..."];

    /// Only the very first row of a document may open a header.
    pub fn opens(row: usize, line: &str) -> bool {
        row == 1 && line == Self::OPEN
    }

    pub fn closes(line: &str) -> bool {
        Self::CLOSE.contains(&line)
    }
}
