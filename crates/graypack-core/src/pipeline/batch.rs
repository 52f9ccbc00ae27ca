//! Batch orchestration - decode, transform and encode every image in a
//! source directory, then package the results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::archive::ArchiveExtractor;
use crate::error::{PipelineError, PipelineResult};

use super::{codec::PngCodec, discovery, grayscale};

/// Fixed name of the packaged output archive inside the destination
/// directory. Deterministic so repeated runs overwrite rather than
/// accumulate.
pub const OUTPUT_ARCHIVE_NAME: &str = "grayscale_images.zip";

/// Runs one grayscale conversion batch over a (source, destination)
/// directory pair.
pub struct BatchPipeline;

impl BatchPipeline {
    /// Convert every PNG directly inside `source_dir` and write the results
    /// under the same filenames in `dest_dir`, then pack `dest_dir` into
    /// [`OUTPUT_ARCHIVE_NAME`].
    ///
    /// All-or-nothing: the first per-file failure aborts the whole batch
    /// with no partial-success bookkeeping. Files are processed in sorted
    /// name order. Returns the ordered produced image paths, excluding the
    /// packaged archive.
    pub fn run(source_dir: &Path, dest_dir: &Path) -> PipelineResult<Vec<PathBuf>> {
        let start = std::time::Instant::now();

        let files = discovery::png_files(source_dir)?;
        if files.is_empty() {
            return Err(PipelineError::NoImagesFound(source_dir.to_path_buf()));
        }

        fs::create_dir_all(dest_dir)?;

        let mut produced = Vec::with_capacity(files.len());
        for path in &files {
            tracing::debug!("Converting: {:?}", path);

            let decode_start = std::time::Instant::now();
            let mut buffer = PngCodec::decode(path)?;
            tracing::trace!("  Decode: {:?}", decode_start.elapsed());

            grayscale::apply(&mut buffer);

            let file_name = path.file_name().ok_or_else(|| {
                PipelineError::Io(io::Error::other(format!(
                    "source entry has no file name: {}",
                    path.display()
                )))
            })?;
            let out_path = dest_dir.join(file_name);

            let encode_start = std::time::Instant::now();
            PngCodec::encode(&buffer, &out_path)?;
            tracing::trace!("  Encode: {:?}", encode_start.elapsed());

            produced.push(out_path);
        }

        let archive_path = ArchiveExtractor::pack(dest_dir, OUTPUT_ARCHIVE_NAME)?;
        tracing::debug!(
            "Batch of {} image(s) done in {:?}, packed to {:?}",
            produced.len(),
            start.elapsed(),
            archive_path
        );

        Ok(produced)
    }
}
