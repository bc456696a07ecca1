// 全ジョブ実行 (rayon 並列)

use rayon::prelude::*;

use crate::error::PlateSegError;
use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run jobs in parallel, collecting results in input order.
///
/// One job failure does NOT prevent other jobs from running.
/// `parallel_workers == 0` uses rayon's global pool.
pub fn run_all_jobs(
    jobs: &[JobConfig],
    parallel_workers: usize,
) -> crate::error::Result<Vec<crate::error::Result<JobResult>>> {
    if parallel_workers == 0 {
        return Ok(jobs.par_iter().map(run_job).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel_workers)
        .build()
        .map_err(|e| PlateSegError::config(format!("Failed to build worker pool: {e}")))?;

    Ok(pool.install(|| jobs.par_iter().map(run_job).collect()))
}
