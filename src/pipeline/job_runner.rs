// ジョブ単位: 画像読込 -> セグメンテーション -> セグメントPNG/注釈画像/レポート出力

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::PlateSegError;
use crate::segment::annotate::annotate_segments;
use crate::segment::band::Band;
use crate::segment::{SegmentFailure, SegmentOutcome, SegmentParams, segment_plate};

/// File name of the per-job JSON report.
pub const REPORT_FILE: &str = "report.json";
/// File name of the debug overlay.
pub const ANNOTATED_FILE: &str = "annotated.png";

/// Configuration for a single job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub params: SegmentParams,
    pub annotate: bool,
}

/// Outcome of one job as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Segmented { count: usize },
    Failed(SegmentFailure),
}

/// Result of processing a single job.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
struct SegmentEntry {
    index: usize,
    file: String,
    column_start: u32,
    column_end: u32,
}

/// report.json の内容。
#[derive(Debug, Serialize)]
struct JobReport {
    input: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    band: Option<Band>,
    segments: Vec<SegmentEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

/// File name for the `index`-th segment.
pub fn segment_file_name(index: usize) -> String {
    format!("segment_{index:02}.png")
}

/// Segment one plate crop and write its artifacts into `output_dir`.
///
/// Outputs left in `output_dir` by an earlier run are removed first.
/// A failed segmentation is not an error: it is written to the report and
/// returned as [`JobStatus::Failed`].
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    let img = image::open(&config.input_path).map_err(|e| {
        PlateSegError::image_decode(format!("{}: {e}", config.input_path.display()))
    })?;
    let rgb = img.to_rgb8();

    let outcome = segment_plate(&rgb, &config.params)?;

    fs::create_dir_all(&config.output_dir)?;
    clear_previous_outputs(&config.output_dir)?;

    let mut entries = Vec::new();
    for (index, seg) in outcome.segments().iter().enumerate() {
        let file = segment_file_name(index);
        seg.image.save(config.output_dir.join(&file))?;
        entries.push(SegmentEntry {
            index,
            file,
            column_start: seg.column_start,
            column_end: seg.column_end,
        });
    }

    if config.annotate {
        let annotated = annotate_segments(&rgb, config.params.border, outcome.segments())?;
        annotated.save(config.output_dir.join(ANNOTATED_FILE))?;
    }

    let (status, report) = match &outcome {
        SegmentOutcome::Segments { band, segments } => (
            JobStatus::Segmented {
                count: segments.len(),
            },
            JobReport {
                input: config.input_path.display().to_string(),
                status: "segmented",
                band: *band,
                segments: entries,
                failure: None,
            },
        ),
        SegmentOutcome::Failed(reason) => {
            warn!(input = %config.input_path.display(), %reason, "segmentation failed");
            (
                JobStatus::Failed(*reason),
                JobReport {
                    input: config.input_path.display().to_string(),
                    status: "failed",
                    band: None,
                    segments: entries,
                    failure: Some(reason.to_string()),
                },
            )
        }
    };

    write_report(&config.output_dir, &report)?;

    if let JobStatus::Segmented { count } = status {
        info!(
            input = %config.input_path.display(),
            output = %config.output_dir.display(),
            segments = count,
            "job finished"
        );
    }

    Ok(JobResult {
        input_path: config.input_path.clone(),
        output_dir: config.output_dir.clone(),
        status,
    })
}

/// 前回実行の出力 (segment_*.png, annotated.png, report.json) を削除する。
fn clear_previous_outputs(output_dir: &Path) -> crate::error::Result<()> {
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let is_previous = (name.starts_with("segment_") && name.ends_with(".png"))
            || name == ANNOTATED_FILE
            || name == REPORT_FILE;
        if is_previous && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

fn write_report(output_dir: &Path, report: &JobReport) -> crate::error::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(output_dir.join(REPORT_FILE), json)
        .map_err(|e| PlateSegError::report(format!("{}: {e}", output_dir.display())))
}
