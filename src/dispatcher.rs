use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};

use crate::aggregator::UpdateAggregator;
use crate::cancel;
use crate::collector;
use crate::errors::{Error, Result};
use crate::events::{StreamKind, Update};
use crate::registry::JobRegistry;
use crate::request::{Event, Request};
use crate::script;
use crate::sink::UpdateSink;
use crate::types::{JobId, Pid};

/// Routes incoming requests and owns the per-job lifecycle.
///
/// Clones share the registry and the sink, so the transport can hand one
/// clone to each request task. A start request runs the whole job lifecycle
/// and returns only once the script has exited; the transport is expected
/// to spawn one task per request.
pub struct Dispatcher<S> {
    registry: JobRegistry,
    sink: Arc<S>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: UpdateSink> Dispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self {
            registry: JobRegistry::new(),
            sink: Arc::new(sink),
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Handle one request. All effects are side effects (process start,
    /// registry mutation, update emission) or log entries; a request that
    /// cannot be handled is logged and dropped.
    pub async fn dispatch(&self, request: Request) {
        match request.event() {
            Event::Start => {
                if let Err(err) = self.start_script(request).await {
                    error!(error = %err, "cannot start script");
                }
            }
            Event::Cancel => {
                if let Err(err) = cancel::cancel(&request, &self.registry) {
                    error!(error = %err, "cannot cancel job");
                }
            }
            Event::Unknown(event) => {
                error!(%event, "received unknown event");
            }
        }
    }

    async fn start_script(&self, request: Request) -> Result<()> {
        let job_uuid = request.job_uuid().map(str::to_string);
        if job_uuid.is_none() {
            warn!("no job uuid found in request metadata, job will not be cancellable");
        }

        trace!(script = %String::from_utf8_lossy(&request.content), "running script");

        // Owns the staged file; held to the end of the routine so the
        // artifact outlives the launch and is removed on every exit path.
        let artifact = script::stage(&request.content).map_err(Error::Stage)?;

        // the child inherits our environment as-is; per-job env injection
        // would slot in here
        let mut child = Command::new("/bin/sh")
            .arg("-c")
            .arg(artifact.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(Error::Launch)?;

        let pid = child.id().map(|pid| pid as Pid);
        if let Some(pid) = pid {
            info!(pid, "started script process");
        }

        // Deregistration fires when the guard drops, once the process has
        // been fully waited on.
        let _registration = match (job_uuid, pid) {
            (Some(id), Some(pid)) => Some(Registration::new(self.registry.clone(), id, pid)),
            _ => None,
        };

        let (updates_tx, updates_rx) = mpsc::unbounded_channel();

        let aggregator = UpdateAggregator::new(request.return_url(), request.message_id.clone());
        tokio::spawn(aggregator.aggregate(updates_rx, Arc::clone(&self.sink)));

        let stdout_task = child
            .stdout
            .take()
            .map(|out| tokio::spawn(collector::collect(StreamKind::Stdout, out, updates_tx.clone())));
        let stderr_task = child
            .stderr
            .take()
            .map(|err| tokio::spawn(collector::collect(StreamKind::Stderr, err, updates_tx.clone())));

        // Both collectors must finish before the channel may close.
        if let Some(task) = stdout_task {
            let _ = task.await;
        }
        if let Some(task) = stderr_task {
            let _ = task.await;
        }

        match child.wait().await {
            Ok(status) => {
                let _ = updates_tx.send(Update::exit(exit_code(status)));
            }
            Err(err) => {
                error!(error = %err, "script run failed");
            }
        }

        // Single close point. The collectors' clones are already gone, so
        // dropping this sender ends the job's update stream with the exit
        // update as the last event.
        drop(updates_tx);
        Ok(())
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    // a process that did not exit with a code was terminated by a signal
    128 + status.signal().unwrap_or_default()
}

/// Registry entry scoped to the start path: inserted on construction,
/// removed exactly once when dropped.
struct Registration {
    registry: JobRegistry,
    id: JobId,
}

impl Registration {
    fn new(registry: JobRegistry, id: JobId, pid: Pid) -> Self {
        registry.set(id.clone(), pid);
        Self { registry, id }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.remove(&self.id);
    }
}
