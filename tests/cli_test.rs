// CLI entry point tests

use std::process::Command;

use image::{Rgb, RgbImage};

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_plate_segment"))
}

// ============================================================
// 1. No arguments shows usage and exits with failure
// ============================================================

#[test]
fn test_main_no_args_shows_usage() {
    let output = cargo_bin().output().expect("failed to execute binary");

    assert!(
        !output.status.success(),
        "should exit with failure when no args given"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage"),
        "stderr should contain 'Usage', got: {stderr}"
    );
}

// ============================================================
// 2. --help / --version
// ============================================================

#[test]
fn test_main_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success(), "should exit with success for --help");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "got: {stderr}");
}

#[test]
fn test_main_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(env!("CARGO_PKG_VERSION")),
        "stderr should contain version, got: {stderr}"
    );
}

// ============================================================
// 3. Job file errors
// ============================================================

#[test]
fn test_main_missing_job_file() {
    let output = cargo_bin()
        .arg("/nonexistent/jobs.yaml")
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "got: {stderr}");
}

#[test]
fn test_main_missing_input_image_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let jobs = tmp.path().join("jobs.yaml");
    std::fs::write(&jobs, "jobs:\n  - input: nope.png\n    output_dir: out\n").unwrap();

    let output = cargo_bin().arg(&jobs).output().expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "got: {stderr}");
}

#[test]
fn test_main_oversized_border_in_settings_fails_cleanly() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("settings.yaml"), "border: 4294967295\n").unwrap();
    let jobs = tmp.path().join("jobs.yaml");
    std::fs::write(&jobs, "jobs:\n  - input: plate.png\n    output_dir: out\n").unwrap();

    let output = cargo_bin().arg(&jobs).output().expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "got: {stderr}");
    assert!(!stderr.contains("panicked"), "got: {stderr}");
}

// ============================================================
// 4. End to end
// ============================================================

#[test]
fn test_main_segments_plate_from_job_file() {
    let tmp = tempfile::tempdir().unwrap();

    let img = RgbImage::from_fn(100, 40, |x, y| {
        let lit = (8..32).contains(&y) && [10, 30, 50, 70].iter().any(|&s| x >= s && x < s + 10);
        if lit {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    img.save(tmp.path().join("plate.png")).unwrap();

    std::fs::write(tmp.path().join("settings.yaml"), "annotate: true\n").unwrap();
    let jobs = tmp.path().join("jobs.yaml");
    std::fs::write(
        &jobs,
        "jobs:\n  - input: plate.png\n    output_dir: out/plate\n",
    )
    .unwrap();

    let output = cargo_bin().arg(&jobs).output().expect("failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stderr.contains("OK:"), "got: {stderr}");
    assert!(stderr.contains("(4 segments)"), "got: {stderr}");

    let out_dir = tmp.path().join("out/plate");
    assert!(out_dir.join("segment_03.png").exists());
    assert!(out_dir.join("annotated.png").exists());
    assert!(out_dir.join("report.json").exists());
}
