//! Filesystem utilities for code generation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write content to a file, creating parent directories if needed
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)
}

/// First of `path.1`, `path.2`, ... that does not exist yet.
pub fn unique_path(path: &Path) -> PathBuf {
    let mut counter = 1;
    loop {
        let mut candidate = path.as_os_str().to_owned();
        candidate.push(format!(".{}", counter));
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.rs");

        write_file(&path, "fn main() {}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fn main() {}");
    }

    #[test]
    fn test_unique_path_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coffee.rs");
        fs::write(&path, "").unwrap();
        fs::write(dir.path().join("coffee.rs.1"), "").unwrap();

        assert_eq!(unique_path(&path), dir.path().join("coffee.rs.2"));
    }
}
