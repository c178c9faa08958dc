use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input directory: {0}")]
    InvalidInputDir(String),
}

pub const GRAPH_EXTENSION: &str = "gv";

/// Read a file's raw bytes; decoding is left to the parser.
pub fn read_file(path: &Path) -> Result<Vec<u8>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(IoError::Io)
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Scan for markdown files below `root`, sorted
pub fn scan_markdown_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidInputDir(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Where the graph for `source` goes: the same path with a `.gv` extension,
/// or that file name inside `output_dir`.
pub fn graph_path_for(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    let with_ext = source.with_extension(GRAPH_EXTENSION);
    match (output_dir, with_ext.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => with_ext,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        write_file(&path, content).unwrap();
        path
    }

    #[test]
    fn test_scan_finds_nested_markdown_only() {
        // Given a directory with markdown and other files
        let dir = TempDir::new().unwrap();
        create_test_file(&dir, "b.md", "# B");
        create_test_file(&dir, "nested/a.md", "# A");
        create_test_file(&dir, "notes.txt", "# not markdown");

        // When scanning for files
        let files = scan_markdown_files(dir.path()).unwrap();

        // Then only markdown files are found, sorted
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("b.md"), PathBuf::from("nested/a.md")]
        );
    }

    #[test]
    fn test_handle_invalid_input_directory() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist");
        let result = scan_markdown_files(&nonexistent_path);
        assert!(matches!(result, Err(IoError::InvalidInputDir(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_file(&dir.path().join("missing.md"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_then_read_bytes() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "deep/er/doc.md", "# Grüße");
        assert_eq!(read_file(&path).unwrap(), "# Grüße".as_bytes());
    }

    #[test]
    fn test_graph_paths() {
        assert_eq!(
            graph_path_for(Path::new("docs/readme.md"), None),
            PathBuf::from("docs/readme.gv")
        );
        assert_eq!(
            graph_path_for(Path::new("docs/readme.md"), Some(Path::new("out"))),
            PathBuf::from("out/readme.gv")
        );
        assert_eq!(
            graph_path_for(Path::new("NOTES"), None),
            PathBuf::from("NOTES.gv")
        );
    }
}
