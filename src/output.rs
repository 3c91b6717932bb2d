use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `contents` to `path` as a whole: a temporary file in the target
/// directory is filled and then renamed over the destination.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("reports/nested/out.html");
        write_atomic(&target, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "<html></html>");
    }

    #[test]
    fn replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.html");
        fs::write(&target, "old contents that are longer").unwrap();
        write_atomic(&target, "new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn target_that_is_a_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(write_atomic(dir.path(), "x").is_err());
    }
}
