use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::PlateSegError;
use crate::segment::SegmentParams;

/// File name looked up next to each job file.
pub const SETTINGS_FILE: &str = "settings.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub border: u32,
    pub binarize_threshold: u8,
    pub column_threshold: f64,
    pub row_threshold: f64,
    pub min_char_width: u32,
    pub annotate: bool,
    pub parallel_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let params = SegmentParams::default();
        Settings {
            border: params.border,
            binarize_threshold: params.binarize_threshold,
            column_threshold: params.column_threshold,
            row_threshold: params.row_threshold,
            min_char_width: params.min_char_width,
            annotate: false,
            parallel_workers: 0,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let settings: Settings = serde_yml::from_str(yaml)
            .map_err(|e| PlateSegError::config(format!("Failed to parse settings YAML: {e}")))?;
        settings
            .segment_params()
            .validate()
            .map_err(|e| PlateSegError::config(format!("Invalid settings: {e}")))?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// ジョブファイルと同じディレクトリの settings.yaml を読み込む。
    /// ファイルが無ければデフォルト設定を返す。
    pub fn for_job_file(job_file_path: &Path) -> crate::error::Result<Self> {
        let dir = match job_file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let settings_path = dir.join(SETTINGS_FILE);

        match std::fs::read_to_string(&settings_path) {
            Ok(content) => Self::from_yaml(&content).map_err(|e| {
                PlateSegError::config(format!("{}: {e}", settings_path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Segmentation parameters without any job overrides.
    pub fn segment_params(&self) -> SegmentParams {
        SegmentParams {
            border: self.border,
            binarize_threshold: self.binarize_threshold,
            column_threshold: self.column_threshold,
            row_threshold: self.row_threshold,
            min_char_width: self.min_char_width,
        }
    }
}
