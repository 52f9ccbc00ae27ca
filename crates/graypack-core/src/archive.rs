//! ZIP extraction and packaging.
//!
//! Two modes: `extract` inflates an uploaded archive and partitions its
//! files into supported images and everything else; `pack` bundles a
//! directory of produced files back into a single archive.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::discovery;
use crate::types::ExtractionResult;

/// Metadata directory some archiving tools (macOS Finder) embed in ZIPs.
/// Its contents are resource forks, never user images.
const MACOS_METADATA_DIR: &str = "__MACOSX";

/// Extracts uploaded ZIP archives and packages output directories.
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    /// Inflate `bytes` into `dest_dir` and classify the extracted files.
    ///
    /// Every regular file in the archive tree (outside `__MACOSX`) lands in
    /// the result, partitioned by extension into `images` (`.png`,
    /// case-insensitive) and `invalid`. An archive with zero images is not
    /// an error; the caller decides that policy.
    ///
    /// Entries whose names would escape `dest_dir` (absolute paths, `..`)
    /// are skipped with a warning.
    pub fn extract(bytes: &[u8], dest_dir: &Path) -> PipelineResult<ExtractionResult> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| PipelineError::CorruptArchive {
                message: e.to_string(),
            })?;

        fs::create_dir_all(dest_dir)?;

        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| PipelineError::CorruptArchive {
                    message: e.to_string(),
                })?;

            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!("Skipping unsafe archive entry: {:?}", entry.name());
                continue;
            };
            let out_path = dest_dir.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out_path)?;
                continue;
            }
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out)?;
        }

        let (images, invalid) = Self::classify(dest_dir);
        tracing::debug!(
            "Extracted {:?}: {} image(s), {} other file(s)",
            dest_dir,
            images.len(),
            invalid.len()
        );

        Ok(ExtractionResult {
            extract_dir: dest_dir.to_path_buf(),
            images,
            invalid,
        })
    }

    /// Walk `dest_dir` and partition regular files into PNGs and others,
    /// skipping the macOS metadata directory. Both lists are sorted.
    fn classify(dest_dir: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut images = Vec::new();
        let mut invalid = Vec::new();

        for entry in WalkDir::new(dest_dir)
            .into_iter()
            .filter_entry(|e| e.file_name() != OsStr::new(MACOS_METADATA_DIR))
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path().to_path_buf();
            if discovery::has_png_extension(&path) {
                images.push(path);
            } else {
                invalid.push(path);
            }
        }

        images.sort();
        invalid.sort();
        (images, invalid)
    }

    /// Bundle every regular file directly inside `source_dir` into a single
    /// ZIP named `archive_name`, written into `source_dir` itself.
    ///
    /// Entries sit at the archive root; subdirectories are not recursed
    /// into. A file matching `archive_name` is excluded so re-runs never
    /// nest the previous output archive. Re-running overwrites in place.
    pub fn pack(source_dir: &Path, archive_name: &str) -> PipelineResult<PathBuf> {
        let archive_path = source_dir.join(archive_name);

        let mut members: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(source_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == archive_name {
                continue;
            }
            members.push((name, entry.path()));
        }
        // Stable entry order keeps repeated packs comparable
        members.sort();

        let file = fs::File::create(&archive_path)?;
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, path) in &members {
            writer
                .start_file(name.as_str(), options)
                .map_err(io::Error::other)?;
            let mut src = fs::File::open(path)?;
            io::copy(&mut src, &mut writer)?;
        }
        writer.finish().map_err(io::Error::other)?;

        tracing::debug!("Packed {} file(s) into {:?}", members.len(), archive_path);
        Ok(archive_path)
    }
}
