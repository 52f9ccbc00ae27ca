//! End-to-end test: upload a mixed archive, convert it, inspect the output
//! bytes and the packaged result archive.

use std::io::{Cursor, Read, Write};

use graypack_core::{Config, Graypack, PngCodec, ServiceError, OUTPUT_ARCHIVE_NAME};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let data: Vec<u8> = rgba
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * 4)
        .collect();
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &data,
        width,
        height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .unwrap();
    out.into_inner()
}

fn build_zip(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn service_in(dir: &std::path::Path) -> Graypack {
    let mut config = Config::default();
    config.general.uploads_dir = dir.to_path_buf();
    Graypack::new(config)
}

#[test]
fn mixed_archive_converts_to_grayscale_and_packs() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    // a.png: 2x2 solid red; notes.txt: not an image
    let archive = build_zip(&[
        ("a.png", png_bytes(2, 2, [255, 0, 0, 255])),
        ("notes.txt", b"plain text".to_vec()),
    ]);

    let receipt = service.upload(&archive).unwrap();
    assert_eq!(receipt.images.len(), 1);
    assert!(receipt.warning.as_deref().unwrap().contains("notes.txt"));

    let produced = service.grayscale(&receipt.session_id).unwrap();
    assert_eq!(produced.len(), 1);

    // floor(255 / 3) = 85 on every pixel, alpha preserved
    let buffer = PngCodec::decode(&produced[0]).unwrap();
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(buffer.pixel(x, y), [85, 85, 85, 255]);
        }
    }

    // The packaged archive sits next to the outputs and contains exactly
    // the one produced file
    let dest_dir = produced[0].parent().unwrap();
    let archive_file = std::fs::File::open(dest_dir.join(OUTPUT_ARCHIVE_NAME)).unwrap();
    let mut packed = ZipArchive::new(archive_file).unwrap();
    assert_eq!(packed.len(), 1);
    let mut entry = packed.by_name("a.png").unwrap();
    let mut packed_bytes = Vec::new();
    entry.read_to_end(&mut packed_bytes).unwrap();
    assert_eq!(packed_bytes, std::fs::read(&produced[0]).unwrap());
}

#[test]
fn rerunning_a_session_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());
    let archive = build_zip(&[
        ("a.png", png_bytes(3, 1, [12, 7, 8, 9])),
        ("b.png", png_bytes(1, 1, [1, 2, 3, 4])),
    ]);

    let receipt = service.upload(&archive).unwrap();

    let first = service.grayscale(&receipt.session_id).unwrap();
    let first_bytes: Vec<Vec<u8>> = first.iter().map(|p| std::fs::read(p).unwrap()).collect();
    let second = service.grayscale(&receipt.session_id).unwrap();
    let second_bytes: Vec<Vec<u8>> = second.iter().map(|p| std::fs::read(p).unwrap()).collect();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn corrupt_upload_is_an_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());

    let err = service.upload(b"definitely not a zip").unwrap_err();
    assert!(matches!(err, ServiceError::Pipeline(_)));
    assert!(!err.is_client_error());
}

#[test]
fn uploads_get_distinct_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(dir.path());
    let archive = build_zip(&[("a.png", png_bytes(1, 1, [0, 0, 0, 255]))]);

    let first = service.upload(&archive).unwrap();
    let second = service.upload(&archive).unwrap();
    assert_ne!(first.session_id, second.session_id);

    // Each session converts independently
    service.grayscale(&first.session_id).unwrap();
    service.grayscale(&second.session_id).unwrap();
}
