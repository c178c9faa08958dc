#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// An opening fence line, split into its marker and info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpen {
    pub kind: FenceKind,
    /// The run of fence characters; a closing line must equal it exactly.
    pub fence: String,
    /// Language tag or other text after the fence, trimmed.
    pub info: String,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_LEN: usize = 3;

    /// Recognises an opening fence: three or more backticks or tildes at the
    /// start of the line, optionally followed by an info string.
    pub fn open(line: &str) -> Option<FenceOpen> {
        let (kind, marker) = match line.chars().next()? {
            Self::BACKTICK => (FenceKind::Backticks, Self::BACKTICK),
            Self::TILDE => (FenceKind::Tildes, Self::TILDE),
            _ => return None,
        };
        let len = line.len() - line.trim_start_matches(marker).len();
        if len < Self::MIN_LEN {
            return None;
        }

        let info = line[len..].trim();
        // A backtick info string may not contain backticks (it would be inline code).
        if kind == FenceKind::Backticks && info.contains(Self::BACKTICK) {
            return None;
        }

        Some(FenceOpen {
            kind,
            fence: line[..len].to_string(),
            info: info.to_string(),
        })
    }

    /// True when `line` closes a block opened with `fence`.
    pub fn closes(fence: &str, line: &str) -> bool {
        line == fence
    }
}
