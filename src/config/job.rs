use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

/// 1枚のナンバープレート画像に対するジョブ。
///
/// `Option` のフィールドは settings.yaml の値を上書きする。
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub input: String,
    #[serde(deserialize_with = "deserialize_output_dir")]
    pub output_dir: String,
    pub border: Option<u32>,
    pub binarize_threshold: Option<u8>,
    pub min_char_width: Option<u32>,
    pub annotate: Option<bool>,
}

impl JobFile {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let job_file: JobFile = serde_yml::from_str(yaml)?;
        if job_file.jobs.is_empty() {
            return Err(crate::error::PlateSegError::config(
                "Job file must contain at least one job",
            ));
        }
        Ok(job_file)
    }
}

/// 空の出力ディレクトリを拒否するデシリアライザ
fn deserialize_output_dir<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Err(serde::de::Error::custom("output_dir cannot be empty"));
    }
    Ok(s)
}
