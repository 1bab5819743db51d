//! Session Handlers
//!
//! One handler per RPC shape. Each is written against the ports in
//! `application::ports` and knows nothing about tonic:
//!
//! - `unary`: one request, one reply
//! - `client_streaming`: fold requests until end-of-input, then reply once
//! - `server_streaming`: bridge one registry subscription to the peer
//! - `bidi_streaming`: drain inbound and send a paced sequence concurrently

pub mod bidi_streaming;
pub mod client_streaming;
pub mod server_streaming;
pub mod unary;

/// Errors that end a session abnormally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The inbound transport failed with something other than end-of-input.
    #[error("transport error: {0}")]
    Transport(String),
    /// The session was cancelled by shutdown.
    #[error("session cancelled")]
    Cancelled,
}

/// Why a streaming session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The peer went away (outbound write failed or stream dropped).
    PeerDisconnected,
    /// The process is shutting down.
    Shutdown,
    /// The registry entry went away, usually because a newer registration
    /// took over this subscriber id.
    Replaced,
    /// Both directions finished normally.
    Completed,
}

impl SessionEnd {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PeerDisconnected => "peer_disconnected",
            Self::Shutdown => "shutdown",
            Self::Replaced => "replaced",
            Self::Completed => "completed",
        }
    }
}
