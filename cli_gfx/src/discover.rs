use std::path::{Path, PathBuf};

use lib_gfx::constants::PNG_EXT;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::ConvertError;

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PNG_EXT))
}

/// Collects the images to convert.
///
/// A file input is taken as-is, even without a `.png` extension. A directory
/// is walked recursively for `.png` files; unreadable entries are skipped.
/// The result is sorted and free of duplicates.
pub fn find_images(input: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if input.is_file() {
        if !is_png(input) {
            warn!("Input file doesn't have .png extension");
        }
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(input).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.file_type().is_file() && is_png(entry.path()) {
            debug!("Found {}", entry.path().display());
            images.push(entry.into_path());
        }
    }

    images.sort();
    images.dedup();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_images_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("icons/small")).unwrap();
        fs::write(root.join("b.png"), b"").unwrap();
        fs::write(root.join("a.PNG"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        fs::write(root.join("icons/small/c.png"), b"").unwrap();
        fs::create_dir_all(root.join("dir.png")).unwrap();

        let found = find_images(root).unwrap();
        assert_eq!(
            found,
            vec![
                root.join("a.PNG"),
                root.join("b.png"),
                root.join("icons/small/c.png"),
            ]
        );
    }

    #[test]
    fn test_find_images_single_file_any_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.raw");
        fs::write(&path, b"").unwrap();

        assert_eq!(find_images(&path).unwrap(), vec![path]);
    }

    #[test]
    fn test_find_images_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = find_images(&dir.path().join("nope"));
        assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
    }

    #[test]
    fn test_find_images_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_images(dir.path()).unwrap().is_empty());
    }
}
