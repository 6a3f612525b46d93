//! Line-oriented chat loop.
//!
//! Each submitted line is relayed on its own task so the prompt stays
//! responsive; replies are printed in submission order. Every spawned call
//! is watched through its `JoinHandle`, so a call that panics still settles
//! its sequence number and the loop can drain after EOF.

use std::future::Future;
use std::io::Write;

use dashboard::api::ChatRequest;
use dashboard::{ChatSession, Sender};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::warn;

use crate::relay_client::RelayClientError;
use crate::render;

type Settled = (u64, Result<String, RelayClientError>);

/// Read messages from `input` until EOF and all replies have settled,
/// writing bot replies to `out`.
///
/// # Errors
///
/// Returns read errors from `input` and write errors from `out`.
pub async fn run<I, W, F, Fut>(input: I, out: &mut W, relay: F) -> std::io::Result<()>
where
    I: AsyncBufRead + Unpin,
    W: Write,
    F: Fn(ChatRequest) -> Fut,
    Fut: Future<Output = Result<String, RelayClientError>> + Send + 'static,
{
    let mut session = ChatSession::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Settled>();
    let mut lines = input.lines();
    let mut input_open = true;
    let mut printed = 0;

    while input_open || session.in_flight() > 0 {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        session.set_input(line);
                        if let Some(pending) = session.key_down("Enter") {
                            spawn_relay(&tx, pending.seq, relay(pending.body()));
                        }
                    }
                    None => input_open = false,
                }
            }
            Some((seq, outcome)) = rx.recv() => {
                if let Err(e) = &outcome {
                    warn!(seq, error = %e, "chat: relay call failed");
                }
                session.settle(seq, outcome);
            }
            else => break,
        }

        for message in &session.messages()[printed..] {
            if message.sender == Sender::Bot {
                writeln!(out, "{}", render::render_message(message))?;
            }
        }
        out.flush()?;
        printed = session.messages().len();
    }
    Ok(())
}

fn spawn_relay<Fut>(tx: &mpsc::UnboundedSender<Settled>, seq: u64, call: Fut)
where
    Fut: Future<Output = Result<String, RelayClientError>> + Send + 'static,
{
    let tx = tx.clone();
    let task = tokio::spawn(call);
    tokio::spawn(async move {
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => Err(RelayClientError::Task(e.to_string())),
        };
        let _ = tx.send((seq, outcome));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn echo(request: ChatRequest) -> Result<String, RelayClientError> {
        match request.message.as_str() {
            "boom" => panic!("relay call blew up"),
            "slow" => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok("slow done".into())
            }
            "down" => Err(RelayClientError::Status { status: 500, message: "relay not configured".into() }),
            other => Ok(format!("echo: {other}")),
        }
    }

    async fn transcript(input: &str) -> Vec<String> {
        let mut out = Vec::new();
        tokio::time::timeout(Duration::from_secs(5), run(input.as_bytes(), &mut out, echo))
            .await
            .expect("chat loop did not finish after EOF")
            .unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_owned).collect()
    }

    #[tokio::test]
    async fn panicking_call_settles_with_fallback_and_loop_ends() {
        let lines = transcript("first\nboom\n\nthird\n").await;
        assert_eq!(lines, vec!["bot> echo: first", "bot> Sorry, something went wrong.", "bot> echo: third"]);
    }

    #[tokio::test]
    async fn replies_print_in_submission_order() {
        let lines = transcript("slow\nfast\n").await;
        assert_eq!(lines, vec!["bot> slow done", "bot> echo: fast"]);
    }

    #[tokio::test]
    async fn relay_error_prints_fallback() {
        let lines = transcript("down\n").await;
        assert_eq!(lines, vec!["bot> Sorry, something went wrong."]);
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        assert!(transcript("\n   \n").await.is_empty());
    }
}
