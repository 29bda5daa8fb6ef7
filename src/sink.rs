use crate::events::Update;

/// Where a job's updates go once aggregated. Implemented by the transport
/// layer.
///
/// Delivery is fire-and-forget from the core's perspective: implementations
/// must not block the caller on acknowledgement, and a delivery failure is
/// the sink's own problem (log, retry, drop) — it is never propagated back
/// into the job's process lifecycle.
pub trait UpdateSink: Send + Sync + 'static {
    fn deliver(&self, return_url: &str, message_id: &str, update: Update);
}
