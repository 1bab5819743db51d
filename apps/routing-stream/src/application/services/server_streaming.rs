//! Server-Streaming Session Handler
//!
//! Bridges one registry subscription to one peer. The caller registers the
//! subscription when the call starts and hands it to the session; dropping
//! it at the end of the session unregisters the id on every exit path.
//!
//! The session ends when any of these happens first:
//!
//! - the shutdown token fires
//! - the peer stops reading (outbound receiver dropped, or a send fails)
//! - the queue ends because a newer registration took over the id

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::application::services::SessionEnd;
use crate::domain::metric::{ListenerEvent, MetricSample};
use crate::infrastructure::broadcast::Subscription;

/// Inputs for one server-streaming call.
pub struct ServerStreamingSession {
    /// Registry subscription owned by this call.
    pub subscription: Subscription,
    /// Outbound half of the call.
    pub outbound: mpsc::Sender<MetricSample>,
    /// Process shutdown signal.
    pub cancel: CancellationToken,
}

/// Result of a finished server-streaming call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStreamingOutcome {
    /// Samples written to the peer.
    pub delivered: u64,
    /// Why the session stopped.
    pub end: SessionEnd,
}

/// Run the session until it ends.
pub async fn run(session: ServerStreamingSession) -> ServerStreamingOutcome {
    let ServerStreamingSession {
        mut subscription,
        outbound,
        cancel,
    } = session;
    let mut delivered = 0u64;

    tracing::info!(client_id = %subscription.id(), "Server stream started");

    let end = loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break SessionEnd::Shutdown,
            () = outbound.closed() => break SessionEnd::PeerDisconnected,
            event = subscription.recv() => {
                let Some(ListenerEvent::Metric(sample)) = event else {
                    break SessionEnd::Replaced;
                };
                tokio::select! {
                    () = cancel.cancelled() => break SessionEnd::Shutdown,
                    sent = outbound.send(sample) => {
                        if sent.is_err() {
                            break SessionEnd::PeerDisconnected;
                        }
                        delivered += 1;
                    }
                }
            }
        }
    };

    tracing::info!(
        client_id = %subscription.id(),
        delivered,
        end = end.as_str(),
        "Server stream ended"
    );

    ServerStreamingOutcome { delivered, end }
}
