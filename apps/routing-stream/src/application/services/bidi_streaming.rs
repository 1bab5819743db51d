//! Bidirectional Streaming Session Handler
//!
//! Runs the two directions of a call concurrently and joins them:
//!
//! - inbound: drain peer messages until end-of-input, a transport error or
//!   shutdown
//! - outbound: send `plan.responses` replies, pausing `plan.pacing` after each
//!
//! The outbound sender lives until both directions are done, so the peer
//! sees the response stream end only after the call is complete.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::application::ports::InboundStream;
use crate::domain::session::{BidiOutcome, BidiPlan, BidiReply};

/// Run both directions to completion.
pub async fn run<S>(
    inbound: S,
    outbound: mpsc::Sender<BidiReply>,
    plan: BidiPlan,
    cancel: CancellationToken,
) -> BidiOutcome
where
    S: InboundStream<()>,
{
    let (received, sent) = tokio::join!(
        drain(inbound, &cancel),
        send_sequence(&outbound, plan, &cancel)
    );

    tracing::info!(received, sent, "Bidi stream finished");
    drop(outbound);

    BidiOutcome { received, sent }
}

async fn drain<S>(mut inbound: S, cancel: &CancellationToken) -> u32
where
    S: InboundStream<()>,
{
    let mut received = 0u32;

    loop {
        let next = tokio::select! {
            () = cancel.cancelled() => break,
            next = inbound.receive() => next,
        };

        match next {
            Ok(Some(())) => {
                received += 1;
                tracing::debug!(received, "Bidi request received");
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, received, "Bidi inbound failed");
                break;
            }
        }
    }

    received
}

async fn send_sequence(
    outbound: &mpsc::Sender<BidiReply>,
    plan: BidiPlan,
    cancel: &CancellationToken,
) -> u32 {
    let mut sent = 0u32;

    for sequence in 0..plan.responses {
        tokio::select! {
            () = cancel.cancelled() => break,
            result = outbound.send(BidiReply { sequence }) => {
                if result.is_err() {
                    tracing::debug!(sequence, "Bidi peer stopped reading");
                    break;
                }
                sent += 1;
            }
        }

        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(plan.pacing) => {}
        }
    }

    sent
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::time::Duration;

    use tokio_stream::wrappers::ReceiverStream;

    use super::*;

    const WAIT: Duration = Duration::from_secs(1);

    fn fast_plan() -> BidiPlan {
        BidiPlan {
            responses: 3,
            pacing: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn exchanges_three_requests_and_three_replies() {
        let (in_tx, in_rx) = mpsc::channel::<Result<(), io::Error>>(8);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run(
            ReceiverStream::new(in_rx),
            out_tx,
            fast_plan(),
            CancellationToken::new(),
        ));

        for _ in 0..3 {
            in_tx.send(Ok(())).await.unwrap();
        }
        drop(in_tx);

        let mut sequences = Vec::new();
        while let Some(reply) = tokio::time::timeout(WAIT, out_rx.recv()).await.unwrap() {
            sequences.push(reply.sequence);
        }

        assert_eq!(sequences, vec![0, 1, 2]);
        let outcome = handle.await.unwrap();
        assert_eq!(outcome, BidiOutcome { received: 3, sent: 3 });
    }

    #[tokio::test]
    async fn response_stream_stays_open_until_inbound_closes() {
        let (in_tx, in_rx) = mpsc::channel::<Result<(), io::Error>>(8);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run(
            ReceiverStream::new(in_rx),
            out_tx,
            fast_plan(),
            CancellationToken::new(),
        ));

        for _ in 0..3 {
            tokio::time::timeout(WAIT, out_rx.recv()).await.unwrap().unwrap();
        }

        let early = tokio::time::timeout(Duration::from_millis(50), out_rx.recv()).await;
        assert!(early.is_err(), "outbound must not close while inbound is open");
        assert!(!handle.is_finished());

        drop(in_tx);
        assert!(tokio::time::timeout(WAIT, out_rx.recv()).await.unwrap().is_none());
        assert_eq!(handle.await.unwrap().sent, 3);
    }

    #[tokio::test]
    async fn inbound_error_ends_inbound_direction_only() {
        let inbound = tokio_stream::iter(vec![
            Ok(()),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken")),
        ]);
        let (out_tx, mut out_rx) = mpsc::channel(8);

        let outcome = run(inbound, out_tx, fast_plan(), CancellationToken::new()).await;

        assert_eq!(outcome, BidiOutcome { received: 1, sent: 3 });
        let mut replies = 0;
        while out_rx.try_recv().is_ok() {
            replies += 1;
        }
        assert_eq!(replies, 3);
    }

    #[tokio::test]
    async fn cancellation_stops_both_directions() {
        let (_in_tx, in_rx) = mpsc::channel::<Result<(), io::Error>>(8);
        let (out_tx, _out_rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let plan = BidiPlan {
            responses: 1_000,
            pacing: Duration::from_secs(1),
        };
        let handle = tokio::spawn(run(ReceiverStream::new(in_rx), out_tx, plan, cancel.clone()));

        cancel.cancel();
        let outcome = tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();
        assert!(outcome.sent <= 1);
    }
}
