use std::{io, result};
use thiserror::Error;

use crate::types::{JobId, Pid};

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot stage script: {0}")]
    Stage(#[source] io::Error),
    #[error("cannot run script: {0}")]
    Launch(#[source] io::Error),
    #[error("no job uuid found in request metadata")]
    MissingJobId,
    #[error("cannot cancel unknown job {0}")]
    UnknownJob(JobId),
    #[error("failed to send SIGTERM to process {pid}: {source}")]
    Signal { pid: Pid, source: nix::Error },
}

pub type Result<T> = result::Result<T, Error>;
