use super::job::Job;
use super::settings::Settings;
use crate::error::PlateSegError;
use crate::segment::SegmentParams;

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub params: SegmentParams,
    pub annotate: bool,
    pub parallel_workers: usize,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    ///
    /// 上書き後のパラメータも検証する。
    pub fn new(settings: &Settings, job: &Job) -> crate::error::Result<Self> {
        let base = settings.segment_params();
        let params = SegmentParams {
            border: job.border.unwrap_or(base.border),
            binarize_threshold: job.binarize_threshold.unwrap_or(base.binarize_threshold),
            min_char_width: job.min_char_width.unwrap_or(base.min_char_width),
            ..base
        };
        params.validate().map_err(|e| {
            PlateSegError::config(format!("Invalid overrides for job '{}': {e}", job.input))
        })?;

        Ok(MergedConfig {
            params,
            annotate: job.annotate.unwrap_or(settings.annotate),
            parallel_workers: settings.parallel_workers,
        })
    }
}
