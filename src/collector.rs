use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tracing::{error, trace};

use crate::events::{StreamKind, Update};

const READ_CAPACITY: usize = 4096;

/// Drain one output stream of a running process into updates.
///
/// Every read that yields bytes becomes one `Output` update, exactly as
/// read: a chunk may span or split lines arbitrarily, there is no
/// reassembly. End of stream stops the collector silently; any other read
/// error stops it with a log and the job carries on with whatever the other
/// stream still produces. The sender is a clone — the channel is closed by
/// the start path, after both collectors are done.
pub async fn collect<R>(stream: StreamKind, mut reader: R, updates: mpsc::UnboundedSender<Update>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(READ_CAPACITY);
    loop {
        match reader.read_buf(&mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let chunk = buf.split();
                let text = String::from_utf8_lossy(&chunk).into_owned();
                trace!(stream = %stream, message = %text, "collected output");
                let _ = updates.send(Update::output(stream, text));
            }
            Err(err) => {
                error!(stream = %stream, error = %err, "cannot read from stream");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    async fn collected(input: Vec<u8>) -> Vec<Update> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        collect(StreamKind::Stdout, Cursor::new(input), tx).await;
        let mut updates = Vec::new();
        while let Some(update) = rx.recv().await {
            updates.push(update);
        }
        updates
    }

    #[tokio::test]
    async fn short_input_is_one_update() {
        let updates = collected(b"hello".to_vec()).await;
        assert_eq!(updates, vec![Update::output(StreamKind::Stdout, "hello")]);
    }

    #[tokio::test]
    async fn empty_input_emits_nothing() {
        assert!(collected(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn chunking_preserves_content_in_order() {
        let input: Vec<u8> = (0..10_000u32).map(|i| b'a' + (i % 26) as u8).collect();
        let updates = collected(input.clone()).await;
        assert!(updates.len() > 1);
        let joined: String = updates
            .iter()
            .map(|update| match update {
                Update::Output { content, .. } => content.as_str(),
                Update::Exit { .. } => panic!("collector never emits exit updates"),
            })
            .collect();
        assert_eq!(joined.as_bytes(), &input[..]);
    }
}
