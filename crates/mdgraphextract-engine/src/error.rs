use crate::lines::Encoding;

/// Failures raised while setting up or feeding a parse.
///
/// Malformed Markdown is never an error: the scanner recognises what it can
/// and passes everything else through untouched.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid input kind: input is absent or not a supported source")]
    InvalidInputKind,
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("Input is not valid {encoding} at row {row}")]
    Decode { row: usize, encoding: Encoding },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
