//! Upload cleanup walkthrough.
//!
//! Multipart parsers write uploads to disk before validation can run,
//! so a rejected request would leak files. This example shows the gate
//! removing them:
//! 1. Store uploads the way a multipart parser would
//! 2. Fail validation and watch the files disappear
//! 3. Opt out of cleanup and keep them
//!
//! Run with: `cargo run --example upload_cleanup`

use std::fs;
use std::io;
use std::path::PathBuf;

use request_gate::{FieldRule, RequestAdapter, Schema, SubSchema, UploadedFile, ValidationGate};
use tempfile::TempDir;

fn store_upload(dir: &TempDir, name: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, b"fake image bytes")?;
    Ok(path)
}

fn submission_schema() -> Schema {
    Schema::new()
        .body(SubSchema::new().field("title", FieldRule::required()))
        .files(SubSchema::new().field("cover", FieldRule::required()))
}

fn list_remaining(dir: &TempDir) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir.path())?
        .filter_map(|entry| Some(entry.ok()?.file_name().to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The gate reports each removed file at debug level.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Upload Cleanup Example ===");

    println!("\n--- Scenario 1: rejection cleans up ---");
    let dir = TempDir::new()?;
    let gallery_1 = store_upload(&dir, "gallery-1.png")?;
    let gallery_2 = store_upload(&dir, "gallery-2.png")?;
    let thumbnail = store_upload(&dir, "thumbnail.png")?;

    let mut request = RequestAdapter::new();
    request.add_file("gallery", UploadedFile::new(&gallery_1));
    request.add_file("gallery", UploadedFile::new(&gallery_2));
    request.set_single_file("thumbnail", UploadedFile::new(&thumbnail));

    println!("stored before check: {:?}", list_remaining(&dir)?);

    // Neither the title nor the cover upload is there; the request is
    // rejected and every stored upload goes with it.
    let gate = ValidationGate::new(submission_schema());
    let outcome = gate.check(&request)?;
    println!(
        "✗ rejected: {}",
        serde_json::to_string(&outcome.into_rejection().expect("rejected").body)?
    );
    println!("stored after check: {:?}", list_remaining(&dir)?);

    println!("\n--- Scenario 2: cleanup disabled ---");
    let dir = TempDir::new()?;
    let kept = store_upload(&dir, "kept.png")?;

    let mut request = RequestAdapter::new();
    request.add_file("gallery", UploadedFile::new(&kept));

    let lenient = ValidationGate::new(submission_schema()).cleanup_uploads(false);
    let outcome = lenient.check(&request)?;
    println!(
        "✗ rejected with status {}",
        outcome.into_rejection().expect("rejected").status
    );
    println!("stored after check: {:?}", list_remaining(&dir)?);

    println!("\n=== Key Takeaways ===");
    println!("1. Cleanup runs only when the schema covers files and the request fails");
    println!("2. Both the upload collection and the single-file alias are covered");
    println!("3. Cleanup is on by default and can be switched off per gate");
    Ok(())
}
