//! Session-oriented upload and grayscale operations.
//!
//! This is the library surface an HTTP layer would call: `upload` stores
//! and extracts one archive under a fresh session directory, `grayscale`
//! converts a previously uploaded session. Every session gets a unique
//! directory, so no two batch jobs ever share a destination.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::archive::ArchiveExtractor;
use crate::config::Config;
use crate::error::{PipelineError, ServiceError};
use crate::pipeline::BatchPipeline;
use crate::types::UploadReceipt;

/// Name of the stored upload inside a session directory.
const UPLOAD_FILE_NAME: &str = "upload.zip";

/// Directory of extracted source images inside a session.
const IMAGES_DIR_NAME: &str = "images";

/// Sibling directory the grayscale results are written into.
const GRAYSCALE_DIR_NAME: &str = "grayscale";

/// The main entry point: upload/grayscale operations over a configured
/// uploads root.
pub struct Graypack {
    config: Config,
}

impl Graypack {
    /// Create a new instance with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a new instance with configuration from the default location.
    pub fn with_defaults() -> crate::error::Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(config))
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accept one uploaded archive.
    ///
    /// Stores the archive under a fresh session directory beneath the
    /// uploads root, extracts it into `<session>/images`, and reports the
    /// session id, the sorted image paths, and a warning naming any
    /// non-PNG files found. An archive with zero PNG images is a
    /// business-rule failure (`NoImagesFound`), as is an empty or
    /// oversized upload.
    pub fn upload(&self, archive_bytes: &[u8]) -> Result<UploadReceipt, ServiceError> {
        if archive_bytes.is_empty() {
            return Err(ServiceError::EmptyUpload);
        }

        let max_bytes = self.config.limits.max_archive_size_mb * 1024 * 1024;
        if archive_bytes.len() as u64 > max_bytes {
            return Err(ServiceError::ArchiveTooLarge {
                size_mb: archive_bytes.len() as u64 / (1024 * 1024),
                max_mb: self.config.limits.max_archive_size_mb,
            });
        }

        let uploads_root = self.config.uploads_dir();
        fs::create_dir_all(&uploads_root)?;

        let session_id = next_session_id(&uploads_root);
        let session_dir = uploads_root.join(&session_id);
        fs::create_dir(&session_dir)?;
        fs::write(session_dir.join(UPLOAD_FILE_NAME), archive_bytes)?;

        let images_dir = session_dir.join(IMAGES_DIR_NAME);
        let extraction = ArchiveExtractor::extract(archive_bytes, &images_dir)?;

        if extraction.images.is_empty() {
            return Err(PipelineError::NoImagesFound(images_dir).into());
        }

        let warning = if extraction.invalid.is_empty() {
            None
        } else {
            let names: Vec<String> = extraction
                .invalid
                .iter()
                .map(|p| relative_name(p, &extraction.extract_dir))
                .collect();
            Some(format!(
                "Some files were ignored because they are not PNG images: {}",
                names.join(", ")
            ))
        };

        tracing::info!(
            session = %session_id,
            images = extraction.images.len(),
            skipped = extraction.invalid.len(),
            "upload extracted"
        );

        Ok(UploadReceipt {
            session_id,
            images: extraction.images,
            warning,
        })
    }

    /// Convert a previously uploaded session to grayscale.
    ///
    /// Resolves `<session>/images` as the batch source and the sibling
    /// `<session>/grayscale` as the destination, runs the pipeline, and
    /// returns the ordered produced image paths.
    pub fn grayscale(&self, session_id: &str) -> Result<Vec<PathBuf>, ServiceError> {
        if session_id.trim().is_empty() {
            return Err(ServiceError::MissingSession);
        }
        // A session id is a single path component; anything else could
        // escape the uploads root.
        if session_id.contains(['/', '\\']) || session_id == "." || session_id == ".." {
            return Err(ServiceError::UnknownSession(session_id.to_string()));
        }

        let session_dir = self.config.uploads_dir().join(session_id);
        let images_dir = session_dir.join(IMAGES_DIR_NAME);
        if !images_dir.is_dir() {
            return Err(ServiceError::UnknownSession(session_id.to_string()));
        }

        let dest_dir = session_dir.join(GRAYSCALE_DIR_NAME);
        let produced = BatchPipeline::run(&images_dir, &dest_dir)?;

        tracing::info!(
            session = %session_id,
            images = produced.len(),
            "grayscale batch complete"
        );
        Ok(produced)
    }
}

/// Generate a session id unique under `uploads_root`.
///
/// Millisecond timestamp, with a numeric suffix bump when two uploads land
/// in the same millisecond.
fn next_session_id(uploads_root: &Path) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let base = millis.to_string();
    if !uploads_root.join(&base).exists() {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !uploads_root.join(&candidate).exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Render `path` relative to `base` for user-facing messages, falling back
/// to the file name so absolute paths never leak outward.
fn relative_name(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
