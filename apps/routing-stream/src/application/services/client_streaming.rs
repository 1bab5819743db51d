//! Client-Streaming Session Handler
//!
//! Receives requests until the peer half-closes, folding each one into a
//! [`ClientStreamSummary`]. Nothing is sent before end-of-input.
//!
//! ```text
//! Receiving ──(message)──► Receiving ──(end-of-input)──► Responding ──► Closed
//!     │
//!     ├──(transport error)──► Failed
//!     └──(shutdown)─────────► Cancelled
//! ```
//!
//! A transport error other than end-of-input ends the call with that error
//! instead of looping on a broken stream.

use tokio_util::sync::CancellationToken;

use crate::application::ports::InboundStream;
use crate::application::services::SessionError;
use crate::domain::session::ClientStreamSummary;

/// Drain the inbound stream and return its summary.
///
/// # Errors
///
/// Returns [`SessionError::Transport`] when the inbound stream fails before
/// end-of-input, and [`SessionError::Cancelled`] when `cancel` fires first.
pub async fn run<S>(
    mut inbound: S,
    cancel: &CancellationToken,
) -> Result<ClientStreamSummary, SessionError>
where
    S: InboundStream<String>,
{
    let mut summary = ClientStreamSummary::default();

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::info!(received = summary.received, "Client stream cancelled");
                return Err(SessionError::Cancelled);
            }
            next = inbound.receive() => next,
        };

        match next {
            Ok(Some(source)) => {
                tracing::debug!(source = %source, "Client stream message received");
                summary.record(source);
            }
            Ok(None) => {
                tracing::info!(
                    received = summary.received,
                    sources = summary.sources.len(),
                    "Client stream finished"
                );
                return Ok(summary);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    received = summary.received,
                    "Client stream failed"
                );
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use tokio::sync::mpsc;
    use tokio_stream::wrappers::ReceiverStream;

    use super::*;

    fn ok(source: &str) -> Result<String, io::Error> {
        Ok(source.to_string())
    }

    #[tokio::test]
    async fn summarizes_all_sources_after_close() {
        let inbound = tokio_stream::iter(vec![ok("10.10.0.1"), ok("10.10.0.2"), ok("10.10.0.3")]);

        let summary = run(inbound, &CancellationToken::new()).await.unwrap();

        assert_eq!(summary.received, 3);
        assert_eq!(summary.sources, vec!["10.10.0.1", "10.10.0.2", "10.10.0.3"]);
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_summary() {
        let inbound = tokio_stream::iter(Vec::<Result<String, io::Error>>::new());
        let summary = run(inbound, &CancellationToken::new()).await.unwrap();
        assert_eq!(summary, ClientStreamSummary::default());
    }

    #[tokio::test]
    async fn transport_error_terminates_call() {
        let inbound = tokio_stream::iter(vec![
            ok("10.10.0.1"),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            ok("10.10.0.2"),
        ]);

        let err = run(inbound, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, SessionError::Transport(msg) if msg.contains("reset")));
    }

    #[tokio::test]
    async fn no_reply_before_close() {
        let (tx, rx) = mpsc::channel::<Result<String, io::Error>>(4);
        let handle = tokio::spawn(async move {
            run(ReceiverStream::new(rx), &CancellationToken::new()).await
        });

        tx.send(ok("10.10.0.1")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!handle.is_finished(), "must not reply before end-of-input");

        drop(tx);
        let summary = handle.await.unwrap().unwrap();
        assert_eq!(summary.received, 1);
    }

    #[tokio::test]
    async fn shutdown_unblocks_open_stream() {
        let (tx, rx) = mpsc::channel::<Result<String, io::Error>>(4);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move { run(ReceiverStream::new(rx), &token).await });

        tx.send(ok("10.10.0.1")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        cancel.cancel();

        let result = tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("cancellation must unblock the read loop")
            .unwrap();
        assert_eq!(result, Err(SessionError::Cancelled));
        drop(tx);
    }
}
