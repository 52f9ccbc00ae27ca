//! File discovery for the batch pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineResult;

/// Check whether a path carries the supported image extension
/// (`.png`, case-insensitive).
pub fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// List the PNG files directly inside `source_dir`, non-recursive.
///
/// Directory enumeration order is filesystem-dependent, so the result is
/// sorted by name for deterministic batch output.
pub fn png_files(source_dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if has_png_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(has_png_extension(Path::new("a.png")));
        assert!(has_png_extension(Path::new("a.PNG")));
        assert!(has_png_extension(Path::new("a.Png")));
        assert!(!has_png_extension(Path::new("a.jpg")));
        assert!(!has_png_extension(Path::new("a.png.txt")));
        assert!(!has_png_extension(Path::new("png")));
    }

    #[test]
    fn test_listing_is_sorted_and_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.png"), b"x").unwrap();

        let files = png_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_empty_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(png_files(dir.path()).unwrap().is_empty());
    }
}
