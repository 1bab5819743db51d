//! Port Interfaces
//!
//! Defines the interfaces (ports) the session handlers depend on.
//!
//! ## Driver Ports (Inbound)
//!
//! - `InboundStream`: Messages arriving from the remote peer
//!
//! ## Driven Ports (Outbound)
//!
//! - `SampleSource`: Produces one metric sample per generator tick
//!
//! The outbound direction of a call is a bounded `tokio::sync::mpsc::Sender`
//! of domain values; a failed send means the peer is gone.

use async_trait::async_trait;
use futures::{Stream, StreamExt};

use super::services::SessionError;
use crate::domain::metric::MetricSample;

/// Inbound half of a call.
///
/// `Ok(None)` marks end-of-input, which is a normal completion and not an
/// error. `Err` is a transport failure.
#[async_trait]
pub trait InboundStream<T>: Send {
    /// Wait for the next message from the peer.
    async fn receive(&mut self) -> Result<Option<T>, SessionError>;
}

#[async_trait]
impl<S, T, E> InboundStream<T> for S
where
    S: Stream<Item = Result<T, E>> + Unpin + Send + 'static,
    T: Send + 'static,
    E: std::error::Error + Send + 'static,
{
    async fn receive(&mut self) -> Result<Option<T>, SessionError> {
        match self.next().await {
            None => Ok(None),
            Some(Ok(message)) => Ok(Some(message)),
            Some(Err(e)) => Err(SessionError::Transport(e.to_string())),
        }
    }
}

/// Produces the sample broadcast on each generator tick.
pub trait SampleSource: Send {
    /// Build the next sample.
    fn next_sample(&mut self) -> MetricSample;
}

impl<F> SampleSource for F
where
    F: FnMut() -> MetricSample + Send,
{
    fn next_sample(&mut self) -> MetricSample {
        self()
    }
}
