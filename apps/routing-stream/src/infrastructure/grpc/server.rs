//! gRPC Server Implementation
//!
//! Implements the `RoutingService` gRPC service. Handlers work on domain
//! values; this module converts to and from the wire types and owns the
//! per-call bookkeeping (session ids, live counters, metrics).

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use prost_types::Timestamp;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_stream::wrappers::{ReceiverStream, TcpListenerStream};
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tonic::{Request, Response, Status, Streaming};
use tracing::Instrument;
use uuid::Uuid;

use super::proto::routing::v1::{
    BiDiStreamingRequest, BiDiStreamingResponse, ClientStreamingRequest, ClientStreamingResponse,
    ServerStreamingRequest, ServerStreamingResponse, UnaryRequest, UnaryResponse,
    routing_service_server::{RoutingService, RoutingServiceServer},
};
use crate::application::services::server_streaming::ServerStreamingSession;
use crate::application::services::{
    SessionEnd, SessionError, bidi_streaming, client_streaming, server_streaming, unary,
};
use crate::domain::metric::MetricSample;
use crate::domain::session::{BidiPlan, BidiReply, ClientStreamSummary};
use crate::domain::subscription::SubscriberId;
use crate::infrastructure::broadcast::SharedRegistry;
use crate::infrastructure::metrics::{self, CallShape};

// =============================================================================
// Type Aliases
// =============================================================================

type CallResult<T> = Result<Response<T>, Status>;
type BoxedStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the gRPC server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingServerConfig {
    /// Registry queue capacity per server-streaming subscriber.
    pub subscriber_capacity: usize,
    /// Buffer between a session task and its response stream.
    pub outbound_capacity: usize,
    /// Outbound sequence for bidi calls.
    pub bidi_plan: BidiPlan,
}

impl Default for RoutingServerConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: 100,
            outbound_capacity: 16,
            bidi_plan: BidiPlan::default(),
        }
    }
}

// =============================================================================
// Session Tracking
// =============================================================================

/// Live session counts per call shape.
#[derive(Debug, Default)]
pub struct SessionCounters {
    unary: AtomicU64,
    client_streaming: AtomicU64,
    server_streaming: AtomicU64,
    bidi_streaming: AtomicU64,
}

/// Point-in-time copy of [`SessionCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Live unary calls.
    pub unary: u64,
    /// Live client-streaming calls.
    pub client_streaming: u64,
    /// Live server-streaming calls.
    pub server_streaming: u64,
    /// Live bidi calls.
    pub bidi_streaming: u64,
}

impl SessionSnapshot {
    /// Sum over all call shapes.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.unary + self.client_streaming + self.server_streaming + self.bidi_streaming
    }
}

impl SessionCounters {
    const fn slot(&self, shape: CallShape) -> &AtomicU64 {
        match shape {
            CallShape::Unary => &self.unary,
            CallShape::ClientStreaming => &self.client_streaming,
            CallShape::ServerStreaming => &self.server_streaming,
            CallShape::BidiStreaming => &self.bidi_streaming,
        }
    }

    /// Count a new live session; the count drops again with the guard.
    #[must_use]
    pub fn enter(self: &Arc<Self>, shape: CallShape) -> SessionGuard {
        let live = self.slot(shape).fetch_add(1, Ordering::Relaxed) + 1;
        publish_live(shape, live);
        SessionGuard {
            counters: Arc::clone(self),
            shape,
        }
    }

    /// Live sessions of one shape.
    #[must_use]
    pub fn live(&self, shape: CallShape) -> u64 {
        self.slot(shape).load(Ordering::Relaxed)
    }

    /// Copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            unary: self.live(CallShape::Unary),
            client_streaming: self.live(CallShape::ClientStreaming),
            server_streaming: self.live(CallShape::ServerStreaming),
            bidi_streaming: self.live(CallShape::BidiStreaming),
        }
    }
}

/// Keeps one session counted while alive.
#[derive(Debug)]
pub struct SessionGuard {
    counters: Arc<SessionCounters>,
    shape: CallShape,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let live = self
            .counters
            .slot(self.shape)
            .fetch_sub(1, Ordering::Relaxed)
            .saturating_sub(1);
        publish_live(self.shape, live);
    }
}

#[allow(clippy::cast_precision_loss)]
fn publish_live(shape: CallShape, live: u64) {
    metrics::set_active_sessions(shape, live as f64);
}

// =============================================================================
// gRPC Server
// =============================================================================

/// gRPC server for the routing service.
pub struct RoutingServer {
    config: RoutingServerConfig,
    registry: SharedRegistry,
    sessions: Arc<SessionCounters>,
    cancel: CancellationToken,
}

impl RoutingServer {
    /// Create a new gRPC server.
    ///
    /// `cancel` ends every live streaming session when fired.
    #[must_use]
    pub fn new(
        config: RoutingServerConfig,
        registry: SharedRegistry,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            registry,
            sessions: Arc::new(SessionCounters::default()),
            cancel,
        }
    }

    /// Live session counters, shared with the health server.
    #[must_use]
    pub fn sessions(&self) -> Arc<SessionCounters> {
        Arc::clone(&self.sessions)
    }

    /// Wrap into the tonic service.
    #[must_use]
    pub fn into_service(self) -> RoutingServiceServer<Self> {
        RoutingServiceServer::new(self)
    }

    fn outbound_channel<T>(&self) -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
        mpsc::channel(self.config.outbound_capacity.max(1))
    }
}

/// Serve `server` on `listener` until `shutdown` fires.
///
/// Returns once in-flight calls have drained after the shutdown signal.
///
/// # Errors
///
/// Returns the transport error when the server cannot accept connections.
pub async fn serve(
    server: RoutingServer,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> Result<(), tonic::transport::Error> {
    Server::builder()
        .add_service(server.into_service())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown.cancelled_owned())
        .await
}

#[tonic::async_trait]
impl RoutingService for RoutingServer {
    type ExecServerStreamingStream = BoxedStream<ServerStreamingResponse>;
    type ExecBiDiStreamingStream = BoxedStream<BiDiStreamingResponse>;

    async fn exec_unary(&self, request: Request<UnaryRequest>) -> CallResult<UnaryResponse> {
        let _session = self.sessions.enter(CallShape::Unary);
        let session_id = Uuid::new_v4();
        let req = request.into_inner();

        let reply = tracing::info_span!("unary", session_id = %session_id)
            .in_scope(|| unary::handle(&req.message));

        metrics::record_session_finished(CallShape::Unary, SessionEnd::Completed.as_str());
        Ok(Response::new(UnaryResponse {
            status: reply.status,
        }))
    }

    async fn exec_client_streaming(
        &self,
        request: Request<Streaming<ClientStreamingRequest>>,
    ) -> CallResult<ClientStreamingResponse> {
        let _session = self.sessions.enter(CallShape::ClientStreaming);
        let session_id = Uuid::new_v4();
        let inbound = request.into_inner().map(|req| req.map(|r| r.src));

        let result = client_streaming::run(inbound, &self.cancel)
            .instrument(tracing::info_span!("client_streaming", session_id = %session_id))
            .await;

        match result {
            Ok(summary) => {
                metrics::record_session_finished(
                    CallShape::ClientStreaming,
                    SessionEnd::Completed.as_str(),
                );
                Ok(Response::new(summary_to_proto(summary)))
            }
            Err(e) => {
                let end = match e {
                    SessionError::Cancelled => SessionEnd::Shutdown.as_str(),
                    SessionError::Transport(_) => "failed",
                };
                metrics::record_session_finished(CallShape::ClientStreaming, end);
                Err(e.into())
            }
        }
    }

    async fn exec_server_streaming(
        &self,
        request: Request<ServerStreamingRequest>,
    ) -> CallResult<Self::ExecServerStreamingStream> {
        let client_id = SubscriberId::new(request.into_inner().client_id);
        if client_id.is_empty() {
            return Err(Status::invalid_argument("client_id must not be empty"));
        }

        let guard = self.sessions.enter(CallShape::ServerStreaming);
        let session_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "server_streaming",
            session_id = %session_id,
            client_id = %client_id
        );

        // Registered before the call returns, so no broadcast after this
        // point can miss the subscriber.
        let subscription = span.in_scope(|| {
            self.registry
                .register(client_id, self.config.subscriber_capacity)
        });

        let (tx, rx) = self.outbound_channel();
        let session = ServerStreamingSession {
            subscription,
            outbound: tx,
            cancel: self.cancel.clone(),
        };

        tokio::spawn(
            async move {
                let outcome = server_streaming::run(session).await;
                metrics::record_session_finished(CallShape::ServerStreaming, outcome.end.as_str());
                drop(guard);
            }
            .instrument(span),
        );

        let stream = ReceiverStream::new(rx).map(|sample| Ok(sample_to_proto(&sample)));
        Ok(Response::new(
            Box::pin(stream) as Self::ExecServerStreamingStream
        ))
    }

    async fn exec_bi_di_streaming(
        &self,
        request: Request<Streaming<BiDiStreamingRequest>>,
    ) -> CallResult<Self::ExecBiDiStreamingStream> {
        let guard = self.sessions.enter(CallShape::BidiStreaming);
        let session_id = Uuid::new_v4();
        let inbound = request.into_inner().map(|req| req.map(|_| ()));
        let plan = self.config.bidi_plan;
        let cancel = self.cancel.clone();

        let (tx, rx) = self.outbound_channel();

        tokio::spawn(
            async move {
                bidi_streaming::run(inbound, tx, plan, cancel.clone()).await;
                let end = if cancel.is_cancelled() {
                    SessionEnd::Shutdown
                } else {
                    SessionEnd::Completed
                };
                metrics::record_session_finished(CallShape::BidiStreaming, end.as_str());
                drop(guard);
            }
            .instrument(tracing::info_span!("bidi_streaming", session_id = %session_id)),
        );

        let stream = ReceiverStream::new(rx).map(|reply| Ok(reply_to_proto(reply)));
        Ok(Response::new(Box::pin(stream) as Self::ExecBiDiStreamingStream))
    }
}

impl From<SessionError> for Status {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Transport(msg) => Self::unknown(msg),
            SessionError::Cancelled => Self::cancelled("session cancelled"),
        }
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

fn datetime_to_timestamp(dt: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: dt.timestamp(),
        nanos: i32::try_from(dt.timestamp_subsec_nanos()).unwrap_or(i32::MAX),
    }
}

fn sample_to_proto(sample: &MetricSample) -> ServerStreamingResponse {
    ServerStreamingResponse {
        src: sample.source().to_string(),
        dst: sample.destination().to_string(),
        metric1: sample.metric1(),
        metric2: sample.metric2(),
        metric3: sample.metric3(),
        observed_at: Some(datetime_to_timestamp(sample.timestamp())),
    }
}

fn summary_to_proto(summary: ClientStreamSummary) -> ClientStreamingResponse {
    ClientStreamingResponse {
        received: summary.received,
        sources: summary.sources,
    }
}

const fn reply_to_proto(reply: BidiReply) -> BiDiStreamingResponse {
    BiDiStreamingResponse {
        sequence: reply.sequence,
    }
}

// =============================================================================
// Tests
// =============================================================================
