//! Source file loading as plain text.

use inventory_core::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Read a source file as UTF-8 text, unmodified.
///
/// The whole file is one document; CSV structure is not interpreted here.
pub fn load_text(path: &Path) -> AppResult<String> {
    if !path.is_file() {
        return Err(AppError::Knowledge(format!(
            "Source file not found: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Knowledge(format!("Failed to read {}: {}", path.display(), e)))?;

    if !is_likely_text(&raw) {
        tracing::warn!("Refusing likely binary file: {}", path.display());
        return Err(AppError::Knowledge(format!(
            "Binary file not supported: {}",
            path.display()
        )));
    }

    // A leading BOM would otherwise end up in the first chunk
    let text = raw.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(raw);

    tracing::debug!("Loaded {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Simple heuristic: text files carry no null bytes.
fn is_likely_text(data: &str) -> bool {
    !data.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_text_verbatim() {
        let file = write_file(b"Unique Entry ID,Name\nA1,Glasses\n");
        assert_eq!(
            load_text(file.path()).unwrap(),
            "Unique Entry ID,Name\nA1,Glasses\n"
        );
    }

    #[test]
    fn test_load_text_strips_bom() {
        let file = write_file("\u{feff}ID\nA1\n".as_bytes());
        assert_eq!(load_text(file.path()).unwrap(), "ID\nA1\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_text(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(AppError::Knowledge(_))));
    }

    #[test]
    fn test_load_binary_file() {
        let file = write_file(b"ID\0\0\0");
        assert!(matches!(load_text(file.path()), Err(AppError::Knowledge(_))));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let file = write_file(b"ID\n\xff\xfe\n");
        assert!(matches!(load_text(file.path()), Err(AppError::Knowledge(_))));
    }
}
