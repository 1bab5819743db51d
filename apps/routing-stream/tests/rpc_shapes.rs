//! gRPC Call Shape Integration Tests
//!
//! Drives each RPC shape end to end through a real tonic server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tonic::{Code, Request};

use routing_stream::{
    BidiPlan, RoutingServer, RoutingServerConfig, SubscriptionRegistry, serve_grpc,
    proto::{
        BiDiStreamingRequest, ClientStreamingRequest, UnaryRequest,
        routing_service_client::RoutingServiceClient,
    },
};

const WAIT: Duration = Duration::from_secs(2);

/// Start a test gRPC server on a random port and return the client.
async fn setup_test_server(
    config: RoutingServerConfig,
) -> (RoutingServiceClient<Channel>, tokio::task::JoinHandle<()>) {
    let (client, handle, _cancel) = setup_cancellable_server(config).await;
    (client, handle)
}

/// Like [`setup_test_server`], also returning the shutdown token.
async fn setup_cancellable_server(
    config: RoutingServerConfig,
) -> (
    RoutingServiceClient<Channel>,
    tokio::task::JoinHandle<()>,
    CancellationToken,
) {
    let cancel = CancellationToken::new();
    let server = RoutingServer::new(config, Arc::new(SubscriptionRegistry::new()), cancel.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = cancel.clone();
    let server_handle = tokio::spawn(async move {
        serve_grpc(server, listener, shutdown).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = RoutingServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap();

    (client, server_handle, cancel)
}

fn fast_config() -> RoutingServerConfig {
    RoutingServerConfig {
        bidi_plan: BidiPlan {
            responses: 3,
            pacing: Duration::from_millis(10),
        },
        ..RoutingServerConfig::default()
    }
}

#[tokio::test]
async fn unary_returns_server_hello() {
    let (mut client, handle) = setup_test_server(fast_config()).await;

    let response = client
        .exec_unary(Request::new(UnaryRequest {
            message: "Client Hello".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(response.into_inner().status, "Server Hello");
    handle.abort();
}

#[tokio::test]
async fn client_streaming_replies_once_after_close() {
    let (mut client, handle) = setup_test_server(fast_config()).await;

    let requests = ["10.10.0.1", "10.10.0.2", "10.10.0.3"].map(|src| ClientStreamingRequest {
        src: src.to_string(),
    });

    let response = timeout(WAIT, client.exec_client_streaming(tokio_stream::iter(requests)))
        .await
        .expect("client stream should complete")
        .unwrap()
        .into_inner();

    assert_eq!(response.received, 3);
    assert_eq!(response.sources, vec!["10.10.0.1", "10.10.0.2", "10.10.0.3"]);
    handle.abort();
}

#[tokio::test]
async fn client_streaming_holds_reply_until_close() {
    let (mut client, handle) = setup_test_server(fast_config()).await;
    let (tx, rx) = mpsc::channel(4);

    let call = tokio::spawn(async move {
        client
            .exec_client_streaming(ReceiverStream::new(rx))
            .await
            .map(tonic::Response::into_inner)
    });

    tx.send(ClientStreamingRequest {
        src: "10.10.0.1".to_string(),
    })
    .await
    .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!call.is_finished(), "no reply before the client closes");

    drop(tx);
    let response = timeout(WAIT, call).await.unwrap().unwrap().unwrap();
    assert_eq!(response.received, 1);
    handle.abort();
}

#[tokio::test]
async fn client_streaming_ends_with_cancelled_on_shutdown() {
    let (mut client, handle, cancel) = setup_cancellable_server(fast_config()).await;
    let (tx, rx) = mpsc::channel(4);

    let call = tokio::spawn(async move {
        client
            .exec_client_streaming(ReceiverStream::new(rx))
            .await
            .map(tonic::Response::into_inner)
    });

    tx.send(ClientStreamingRequest {
        src: "10.10.0.1".to_string(),
    })
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The client never closes its side; shutdown alone must end the call.
    cancel.cancel();
    let status = timeout(WAIT, call)
        .await
        .expect("shutdown should end an open client stream")
        .unwrap()
        .unwrap_err();
    assert_eq!(status.code(), Code::Cancelled);

    drop(tx);
    timeout(WAIT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn bidi_completes_only_after_both_directions() {
    let (mut client, handle) = setup_test_server(fast_config()).await;
    let (tx, rx) = mpsc::channel(4);

    for _ in 0..3 {
        tx.send(BiDiStreamingRequest {}).await.unwrap();
    }

    let mut responses = client
        .exec_bi_di_streaming(ReceiverStream::new(rx))
        .await
        .unwrap()
        .into_inner();

    let mut sequences = Vec::new();
    for _ in 0..3 {
        let reply = timeout(WAIT, responses.message())
            .await
            .unwrap()
            .unwrap()
            .expect("reply expected");
        sequences.push(reply.sequence);
    }
    assert_eq!(sequences, vec![0, 1, 2]);

    let still_open = timeout(Duration::from_millis(100), responses.message()).await;
    assert!(
        still_open.is_err(),
        "response stream must stay open while the client is still sending"
    );

    drop(tx);
    let end = timeout(WAIT, responses.message()).await.unwrap().unwrap();
    assert!(end.is_none());
    handle.abort();
}
