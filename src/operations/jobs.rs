//! Background job polling.

use tracing::debug;

use crate::client::v2::{GetJobRequest, JobResource, JobStatus};
use crate::client::CloudFoundryClient;
use crate::error::{CfError, OperationError, Result};
use crate::operations::PollingConfig;

/// Polls a job until it finishes.
///
/// A `finished` job completes with no value; a `failed` job surfaces the
/// platform error recorded in its details.
///
/// # Errors
///
/// Returns the job's platform error if it failed, an operation error if it
/// does not terminate within the polling timeout, or any error of the
/// underlying calls.
pub async fn wait_for_completion<C>(
    client: &C,
    job: &JobResource,
    polling: PollingConfig,
) -> Result<()>
where
    C: CloudFoundryClient + ?Sized,
{
    let job_id = job.id().to_string();

    match tokio::time::timeout(polling.timeout, poll(client, job.clone(), polling)).await {
        Ok(result) => result,
        Err(_) => Err(OperationError::JobTimeout {
            job_id,
            waited_ms: u64::try_from(polling.timeout.as_millis()).unwrap_or(u64::MAX),
        }
        .into()),
    }
}

async fn poll<C>(client: &C, mut job: JobResource, polling: PollingConfig) -> Result<()>
where
    C: CloudFoundryClient + ?Sized,
{
    let request = GetJobRequest::new(job.id())?;

    while !job.entity.status.is_terminal() {
        debug!("Job {} is {}", job.id(), job.entity.status);
        tokio::time::sleep(polling.interval).await;
        job = client.get_job(&request).await?;
    }

    debug!("Job {} is {}", job.id(), job.entity.status);
    if job.entity.status == JobStatus::Failed {
        return Err(CfError::CloudFoundry(job.entity.failure()));
    }
    Ok(())
}
