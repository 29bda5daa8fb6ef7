use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tracing::info;

use crate::errors::{Error, Result};
use crate::registry::JobRegistry;
use crate::request::Request;

/// Look a job up in the registry and ask its process to terminate.
///
/// Advisory only: this neither waits for nor confirms the exit. The start
/// path owning the process observes the termination through its normal wait
/// and reports whatever exit status the signaled process produces. A job
/// that already finished is indistinguishable here from one that never
/// existed; both come back as unknown.
pub fn cancel(request: &Request, registry: &JobRegistry) -> Result<()> {
    let job_uuid = request.job_uuid().ok_or(Error::MissingJobId)?;
    let pid = registry
        .get(job_uuid)
        .ok_or_else(|| Error::UnknownJob(job_uuid.to_string()))?;
    info!(job = %job_uuid, pid, "cancelling job, sending SIGTERM");
    signal::kill(Pid::from_raw(pid), Signal::SIGTERM).map_err(|source| Error::Signal { pid, source })
}
