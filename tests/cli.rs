//! CLI end-to-end tests
//!
//! Drive the built `tilemark` binary the way a user would:
//! - success path: dimensions, PNG output, completion notice, extra args ignored
//! - usage errors: missing arguments, no output file
//! - decode/write failures: non-zero exit

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

fn tilemark() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tilemark"))
}

fn run<P: AsRef<OsStr>>(args: &[P]) -> Output {
    tilemark().args(args).output().expect("failed to execute tilemark")
}

fn red_png(dir: &Path) -> PathBuf {
    let path = dir.join("red.png");
    RgbaImage::from_pixel(300, 200, Rgba([255, 0, 0, 255]))
        .save(&path)
        .expect("write fixture");
    path
}

// ============================================================================
// Success path
// ============================================================================

#[test]
fn test_red_png_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = red_png(dir.path());
    let output = dir.path().join("marked.png");

    let out = run(&[&input, &output]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim_end(), format!("Watermarked: {}", output.display()));

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (300, 200));

    let mut changed = 0;
    for p in img.pixels() {
        let [r, g, b] = p.0;
        // at most alpha 25/255 of the gray fill mixes in
        assert!(r >= 230 && g <= 25 && b <= 25, "pixel {:?} strays too far from red", p);
        if p.0 != [255, 0, 0] {
            changed += 1;
        }
    }
    assert!(changed > 0, "no watermark visible");
}

#[test]
fn test_jpeg_input_becomes_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.jpg");
    RgbImage::from_fn(160, 120, |x, y| Rgb([x as u8, y as u8, 128]))
        .save(&input)
        .unwrap();
    // the output extension does not change the encoding
    let output = dir.path().join("photo_marked.jpg");

    let out = run(&[&input, &output]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
    assert_eq!(img.dimensions(), (160, 120));
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = red_png(dir.path());
    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");

    assert!(run(&[&input, &first]).status.success());
    assert!(run(&[&input, &second]).status.success());

    let a = image::open(&first).unwrap().to_rgb8();
    let b = image::open(&second).unwrap().to_rgb8();
    assert_eq!(a, b);
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = red_png(dir.path());
    let output = dir.path().join("out.png");
    std::fs::write(&output, b"stale").unwrap();

    assert!(run(&[&input, &output]).status.success());
    let img = image::open(&output).unwrap();
    assert_eq!(img.dimensions(), (300, 200));
}

#[test]
fn test_extra_arguments_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let input = red_png(dir.path());
    let output = dir.path().join("marked.png");

    let out = tilemark().arg(&input).arg(&output).args(["extra", "more"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim_end(), format!("Watermarked: {}", output.display()));
    assert_eq!(image::open(&output).unwrap().dimensions(), (300, 200));
}

#[test]
fn test_debug_log_goes_to_stderr_with_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let input = red_png(dir.path());
    let output = dir.path().join("marked.png");

    let out = tilemark().env("RUST_LOG", "debug").arg(&input).arg(&output).output().unwrap();
    assert!(out.status.success());
    // stdout still carries only the notice
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 1);

    let stderr = String::from_utf8_lossy(&out.stderr);
    let line = stderr.lines().find(|l| l.contains("[DEBUG]")).expect("no debug line on stderr");
    // [YYYY-MM-DDTHH:MM:SSZ] [DEBUG] ...
    let ts = &line[1..line.find(']').unwrap()];
    assert_eq!(ts.len(), 20, "timestamp {:?}", ts);
    assert!(ts.ends_with('Z') && ts.as_bytes()[10] == b'T', "timestamp {:?}", ts);
}

// ============================================================================
// Usage errors
// ============================================================================

#[test]
fn test_no_arguments_prints_usage() {
    let out = tilemark().output().expect("failed to execute tilemark");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
    assert!(out.stdout.is_empty());
}

#[test]
fn test_single_argument_prints_usage_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = red_png(dir.path());

    let out = run(&[&input]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the fixture should exist");
}

// ============================================================================
// Fatal errors
// ============================================================================

#[test]
fn test_undecodable_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("garbage.png");
    std::fs::write(&input, b"definitely not an image").unwrap();
    let output = dir.path().join("out.png");

    let out = run(&[&input, &output]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("garbage.png"));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.png");
    let output = dir.path().join("out.png");

    let out = run(&[&input, &output]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = red_png(dir.path());
    let output = dir.path().join("no-such-dir").join("out.png");

    let out = run(&[&input, &output]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}
