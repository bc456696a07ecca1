use std::path::{Path, PathBuf};
use std::process::ExitCode;

use plate_segment::config::job::JobFile;
use plate_segment::config::merged::MergedConfig;
use plate_segment::config::settings::Settings;
use plate_segment::pipeline::job_runner::{JobConfig, JobStatus};
use plate_segment::pipeline::orchestrator::run_all_jobs;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: plate_segment <jobs.yaml>...");
        eprintln!("  Segment license plate crops into per-character images.");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("plate_segment {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let mut job_configs: Vec<JobConfig> = Vec::new();
    let mut parallel_workers = 0;

    for job_file_arg in &args {
        let job_file_path = Path::new(job_file_arg);

        // Load settings from the same directory as the job file.
        let settings = match Settings::for_job_file(job_file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings for {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let yaml_content = match std::fs::read_to_string(job_file_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("ERROR: Failed to read job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let job_file = match JobFile::from_yaml(&yaml_content) {
            Ok(jf) => jf,
            Err(e) => {
                eprintln!("ERROR: Failed to parse job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        // Resolve job file directory for relative paths.
        let job_dir = job_file_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        for job in &job_file.jobs {
            let merged = match MergedConfig::new(&settings, job) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("ERROR: {job_file_arg}: {e}");
                    return ExitCode::FAILURE;
                }
            };
            parallel_workers = parallel_workers.max(merged.parallel_workers);

            job_configs.push(JobConfig {
                input_path: resolve_path(&job_dir, &job.input),
                output_dir: resolve_path(&job_dir, &job.output_dir),
                params: merged.params,
                annotate: merged.annotate,
            });
        }
    }

    let results = match run_all_jobs(&job_configs, parallel_workers) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut has_error = false;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(job_result) => match &job_result.status {
                JobStatus::Segmented { count } => eprintln!(
                    "OK: {} -> {} ({} segments)",
                    job_result.input_path.display(),
                    job_result.output_dir.display(),
                    count
                ),
                JobStatus::Failed(reason) => {
                    eprintln!("FAILED: {}: {reason}", job_result.input_path.display())
                }
            },
            Err(e) => {
                eprintln!(
                    "ERROR: {} -> {}: {e}",
                    job_configs[i].input_path.display(),
                    job_configs[i].output_dir.display()
                );
                has_error = true;
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// `RUST_LOG` controls verbosity; defaults to `warn`. Logs go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
