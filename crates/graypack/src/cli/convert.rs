//! The `graypack convert` command: upload + grayscale in one run.

use anyhow::Context;
use clap::Args;
use graypack_core::{Config, Graypack, ServiceError, UploadReceipt, OUTPUT_ARCHIVE_NAME};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// ZIP archive of PNG images to convert
    #[arg(required = true)]
    pub archive: PathBuf,

    /// Copy the grayscale results (and the packaged ZIP) into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override the configured uploads root for this run
    #[arg(long)]
    pub uploads_dir: Option<String>,

    /// Print the result as JSON instead of plain paths
    #[arg(long)]
    pub json: bool,
}

/// Execute the convert command.
pub fn execute(args: ConvertArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(dir) = &args.uploads_dir {
        let expanded = shellexpand::tilde(dir);
        config.general.uploads_dir = PathBuf::from(expanded.into_owned());
    }

    let bytes = fs::read(&args.archive)
        .with_context(|| format!("Cannot read archive: {}", args.archive.display()))?;

    let service = Graypack::new(config);

    let receipt = service.upload(&bytes).map_err(translate)?;
    if let Some(warning) = &receipt.warning {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        "Uploaded {} image(s) into session {}",
        receipt.images.len(),
        receipt.session_id
    );

    let produced = service.grayscale(&receipt.session_id).map_err(translate)?;

    let produced = match &args.output_dir {
        Some(dir) => copy_results(&produced, dir)?,
        None => produced,
    };

    if args.json {
        print_json(&receipt, &produced)?;
    } else {
        for path in &produced {
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Copy the produced images plus the packaged archive into `dir`, returning
/// the new image paths.
fn copy_results(produced: &[PathBuf], dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory: {}", dir.display()))?;

    let mut copied = Vec::with_capacity(produced.len());
    for path in produced {
        let name = path
            .file_name()
            .with_context(|| format!("Produced path has no file name: {}", path.display()))?;
        let target = dir.join(name);
        fs::copy(path, &target)
            .with_context(|| format!("Cannot copy result to {}", target.display()))?;
        copied.push(target);
    }

    if let Some(dest_dir) = produced.first().and_then(|p| p.parent()) {
        let archive = dest_dir.join(OUTPUT_ARCHIVE_NAME);
        if archive.is_file() {
            fs::copy(&archive, dir.join(OUTPUT_ARCHIVE_NAME))
                .with_context(|| format!("Cannot copy archive to {}", dir.display()))?;
        }
    }
    Ok(copied)
}

fn print_json(receipt: &UploadReceipt, produced: &[PathBuf]) -> anyhow::Result<()> {
    let out = serde_json::json!({
        "session_id": receipt.session_id,
        "images": receipt.images,
        "warning": receipt.warning,
        "grayscale_images": produced,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Translate a service error for the user: business-rule failures keep
/// their descriptive message, internal failures collapse to a generic one
/// with the detail going to the log only.
fn translate(err: ServiceError) -> anyhow::Error {
    if err.is_client_error() {
        anyhow::anyhow!("{err}")
    } else {
        tracing::error!(error = %err, "conversion failed");
        anyhow::anyhow!("processing failed")
    }
}
