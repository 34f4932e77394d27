use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Returns true if `path` is a directory, false if it does not exist, and an error
/// if it exists but is not a directory or cannot be inspected.
pub fn exists_dir<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(true),
        Ok(_) => Err(Error::NotADirectory { path: path.display().to_string() }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::ReadError { path: path.display().to_string(), source }),
    }
}

/// Reads a template source file. The read is scoped to this call.
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .map_err(|source| Error::ReadError { path: path.display().to_string(), source })
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Writes `content` to `dest_path`, or to stdout when no path (or `-`) is given.
pub fn write_output(content: &str, dest_path: Option<&Path>) -> Result<()> {
    match dest_path {
        Some(path) if path != Path::new(crate::constants::STDOUT_INDICATOR) => {
            write_file(content, path)
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn exists_dir_distinguishes_missing_and_files() {
        let dir = TempDir::new().unwrap();
        assert!(exists_dir(dir.path()).unwrap());
        assert!(!exists_dir(dir.path().join("missing")).unwrap());

        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(exists_dir(&file), Err(Error::NotADirectory { .. })));
    }

    #[test]
    fn write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/out.json");
        write_file("[]", &target).unwrap();
        assert_eq!(read_template(&target).unwrap(), "[]");
    }
}
