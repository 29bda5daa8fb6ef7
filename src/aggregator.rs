use std::sync::Arc;

use tokio::sync::mpsc;

use crate::events::Update;
use crate::sink::UpdateSink;

/// Forwards a job's updates to the reporting sink, in arrival order, tagged
/// with the reporting address and message id captured at job start.
pub struct UpdateAggregator {
    return_url: String,
    message_id: String,
}

impl UpdateAggregator {
    pub fn new(return_url: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            return_url: return_url.into(),
            message_id: message_id.into(),
        }
    }

    /// Run until the update channel is closed and fully drained.
    pub async fn aggregate<S: UpdateSink>(
        self,
        mut updates: mpsc::UnboundedReceiver<Update>,
        sink: Arc<S>,
    ) {
        while let Some(update) = updates.recv().await {
            sink.deliver(&self.return_url, &self.message_id, update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StreamKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        deliveries: Mutex<Vec<(String, String, Update)>>,
    }

    impl UpdateSink for RecordingSink {
        fn deliver(&self, return_url: &str, message_id: &str, update: Update) {
            self.deliveries.lock().unwrap().push((
                return_url.to_string(),
                message_id.to_string(),
                update,
            ));
        }
    }

    #[tokio::test]
    async fn forwards_in_order_and_stops_on_close() {
        let sink = Arc::new(RecordingSink::default());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Update::output(StreamKind::Stdout, "one")).unwrap();
        tx.send(Update::output(StreamKind::Stderr, "two")).unwrap();
        tx.send(Update::exit(0)).unwrap();
        drop(tx);

        UpdateAggregator::new("http://x", "msg-1")
            .aggregate(rx, Arc::clone(&sink))
            .await;

        let deliveries = sink.deliveries.lock().unwrap();
        assert_eq!(
            *deliveries,
            vec![
                (
                    "http://x".to_string(),
                    "msg-1".to_string(),
                    Update::output(StreamKind::Stdout, "one")
                ),
                (
                    "http://x".to_string(),
                    "msg-1".to_string(),
                    Update::output(StreamKind::Stderr, "two")
                ),
                ("http://x".to_string(), "msg-1".to_string(), Update::exit(0)),
            ]
        );
    }
}
