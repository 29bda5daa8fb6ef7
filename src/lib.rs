//! Remote script execution core.
//!
//! Runs controller-submitted scripts as child processes, streams their
//! stdout/stderr back as updates while they are produced, reports the final
//! exit status, and cancels a running script by its job id. The transport
//! that delivers requests and carries updates lives outside this crate: it
//! feeds [`Request`]s into a [`Dispatcher`] and receives the resulting
//! [`Update`]s through its [`UpdateSink`] implementation.

mod aggregator;
mod cancel;
mod collector;
mod dispatcher;
pub mod errors;
mod events;
mod registry;
mod request;
mod script;
mod sink;
pub mod types;

pub use dispatcher::Dispatcher;
pub use events::{StreamKind, Update};
pub use registry::JobRegistry;
pub use request::{Event, Request, EVENT, JOB_UUID, RETURN_URL};
pub use sink::UpdateSink;
