use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::types::{JobId, Pid};

/// Live mapping from job id to the pid of its running process, used solely
/// to support cancellation.
///
/// Shared between the dispatcher (register on start, deregister once the
/// process has been fully waited on) and the canceller (lookup). Every
/// operation takes the lock for a single map access and nothing else.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<Mutex<HashMap<JobId, Pid>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the pid for a job id. Concurrent starts reusing
    /// an id are not deduplicated: last writer wins.
    pub fn set(&self, id: impl Into<JobId>, pid: Pid) {
        self.jobs
            .lock()
            .expect("job registry poisoned")
            .insert(id.into(), pid);
    }

    pub fn get(&self, id: &str) -> Option<Pid> {
        self.jobs
            .lock()
            .expect("job registry poisoned")
            .get(id)
            .copied()
    }

    /// Remove a job. Removing an id that was never added is a no-op.
    pub fn remove(&self, id: &str) {
        self.jobs.lock().expect("job registry poisoned").remove(id);
    }
}
