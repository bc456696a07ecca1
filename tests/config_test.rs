// 設定ファイル解析テスト

use std::io::Write;

use plate_segment::config::job::JobFile;
use plate_segment::config::merged::MergedConfig;
use plate_segment::config::settings::Settings;
use plate_segment::segment::{MAX_BORDER, SegmentParams};

// ============================================================
// 1. Settings 構造体のデシリアライズ
// ============================================================

#[test]
fn test_settings_full_yaml() {
    let yaml = r#"
border: 5
binarize_threshold: 100
column_threshold: 12.5
row_threshold: 30
min_char_width: 8
annotate: true
parallel_workers: 4
"#;
    let settings = Settings::from_yaml(yaml).expect("should parse full YAML");
    assert_eq!(settings.border, 5);
    assert_eq!(settings.binarize_threshold, 100);
    assert_eq!(settings.column_threshold, 12.5);
    assert_eq!(settings.row_threshold, 30.0);
    assert_eq!(settings.min_char_width, 8);
    assert!(settings.annotate);
    assert_eq!(settings.parallel_workers, 4);
}

#[test]
fn test_settings_empty_yaml() {
    let settings = Settings::from_yaml("{}").expect("should use defaults for empty YAML");
    assert_eq!(settings.border, 3);
    assert_eq!(settings.binarize_threshold, 120);
    assert_eq!(settings.column_threshold, 15.0);
    assert_eq!(settings.row_threshold, 20.0);
    assert_eq!(settings.min_char_width, 5);
    assert!(!settings.annotate);
    assert_eq!(settings.parallel_workers, 0);
}

#[test]
fn test_settings_partial_yaml() {
    let settings = Settings::from_yaml("min_char_width: 7\n").expect("should fill defaults");
    assert_eq!(settings.min_char_width, 7);
    assert_eq!(settings.border, 3);
    assert_eq!(settings.binarize_threshold, 120);
}

#[test]
fn test_settings_negative_threshold_rejected() {
    assert!(Settings::from_yaml("row_threshold: -1.0\n").is_err());
}

#[test]
fn test_settings_out_of_range_binarize_threshold_rejected() {
    assert!(Settings::from_yaml("binarize_threshold: 300\n").is_err());
}

#[test]
fn test_settings_oversized_border_rejected() {
    assert!(Settings::from_yaml("border: 4294967295\n").is_err());
    assert!(Settings::from_yaml(&format!("border: {}\n", MAX_BORDER + 1)).is_err());
    let settings = Settings::from_yaml(&format!("border: {MAX_BORDER}\n")).unwrap();
    assert_eq!(settings.border, MAX_BORDER);
}

#[test]
fn test_default_settings_match_segment_params() {
    let settings = Settings::default();
    let job: JobFile =
        JobFile::from_yaml("jobs:\n  - input: a.png\n    output_dir: out\n").unwrap();
    let merged = MergedConfig::new(&settings, &job.jobs[0]).unwrap();
    assert_eq!(merged.params, SegmentParams::default());
}

// ============================================================
// 2. Job 構造体のデシリアライズ
// ============================================================

#[test]
fn test_job_required_fields_only() {
    let yaml = r#"
jobs:
  - input: "plate.png"
    output_dir: "out/plate"
"#;
    let job_file = JobFile::from_yaml(yaml).expect("should parse required fields");
    assert_eq!(job_file.jobs.len(), 1);
    let job = &job_file.jobs[0];
    assert_eq!(job.input, "plate.png");
    assert_eq!(job.output_dir, "out/plate");
    assert!(job.border.is_none());
    assert!(job.binarize_threshold.is_none());
    assert!(job.min_char_width.is_none());
    assert!(job.annotate.is_none());
}

#[test]
fn test_job_missing_output_dir() {
    let yaml = r#"
jobs:
  - input: "plate.png"
"#;
    assert!(JobFile::from_yaml(yaml).is_err());
}

#[test]
fn test_job_empty_output_dir_rejected() {
    let yaml = r#"
jobs:
  - input: "plate.png"
    output_dir: "  "
"#;
    assert!(JobFile::from_yaml(yaml).is_err());
}

#[test]
fn test_job_file_without_jobs_rejected() {
    assert!(JobFile::from_yaml("jobs: []\n").is_err());
}

// ============================================================
// 3. MergedConfig
// ============================================================

#[test]
fn test_merged_config_job_overrides_settings() {
    let settings = Settings::from_yaml("border: 4\nmin_char_width: 6\nannotate: false\n").unwrap();
    let yaml = r#"
jobs:
  - input: "plate.png"
    output_dir: "out"
    min_char_width: 9
    annotate: true
"#;
    let job_file = JobFile::from_yaml(yaml).unwrap();
    let merged = MergedConfig::new(&settings, &job_file.jobs[0]).unwrap();

    assert_eq!(merged.params.border, 4);
    assert_eq!(merged.params.min_char_width, 9);
    assert_eq!(merged.params.binarize_threshold, 120);
    assert!(merged.annotate);
}

#[test]
fn test_merged_config_rejects_oversized_border_override() {
    let settings = Settings::default();
    let yaml = r#"
jobs:
  - input: "plate.png"
    output_dir: "out"
    border: 2147483647
"#;
    let job_file = JobFile::from_yaml(yaml).unwrap();
    let err = MergedConfig::new(&settings, &job_file.jobs[0]).unwrap_err();
    assert!(
        err.to_string().contains("plate.png"),
        "error should name the job, got: {err}"
    );
}

// ============================================================
// 4. settings.yaml の自動検出
// ============================================================

#[test]
fn test_settings_for_job_file_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = std::fs::File::create(dir.path().join("settings.yaml")).unwrap();
    writeln!(f, "min_char_width: 11").unwrap();

    let settings = Settings::for_job_file(&dir.path().join("jobs.yaml")).unwrap();
    assert_eq!(settings.min_char_width, 11);
}

#[test]
fn test_settings_for_job_file_defaults_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::for_job_file(&dir.path().join("jobs.yaml")).unwrap();
    assert_eq!(settings.min_char_width, 5);
}

#[test]
fn test_settings_for_job_file_invalid_yaml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.yaml"), "border: [not, a, number]\n").unwrap();
    assert!(Settings::for_job_file(&dir.path().join("jobs.yaml")).is_err());
}

#[test]
fn test_settings_for_job_file_bare_file_name() {
    // A bare file name has an empty parent; lookup falls back to the working directory.
    let settings = Settings::for_job_file(std::path::Path::new("no_such_jobs_file.yaml"));
    assert!(settings.is_ok());
}
