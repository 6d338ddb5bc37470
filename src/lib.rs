#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use app::{spawn_connectivity_polling, spawn_connectivity_watcher, AppController};
use commands::{dispatch, Command, Reply};
use domain::AppEvent;

const OUTBOUND_CAPACITY: usize = 256;

/// One stdout line.
#[derive(Debug, Serialize)]
#[serde(tag = "channel", content = "payload", rename_all = "snake_case")]
enum Outbound {
    Reply(Reply),
    Event(AppEvent),
}

/// Run the headless shell: JSON commands on stdin, replies and events on
/// stdout. Returns on Ctrl-C or when stdin closes.
pub async fn run() -> anyhow::Result<()> {
    let controller =
        Arc::new(AppController::new().context("Failed to initialize application")?);

    let (out_tx, out_rx) = mpsc::channel(OUTBOUND_CAPACITY);
    let writer = tokio::spawn(write_outbound(out_rx));
    let forwarder = tokio::spawn(forward_events(controller.subscribe(), out_tx.clone()));

    let watcher = spawn_connectivity_watcher(Arc::clone(&controller));
    let poll_secs = controller.config().connectivity.poll_interval_secs;
    let poller = (poll_secs > 0).then(|| {
        spawn_connectivity_polling(controller.connectivity(), Duration::from_secs(poll_secs))
    });

    let preload = Arc::clone(&controller);
    tokio::spawn(async move { preload.preload_recognizer().await });

    info!("Ready for commands");

    tokio::select! {
        result = read_commands(BufReader::new(tokio::io::stdin()), &controller, &out_tx) => {
            result.context("Failed to read commands")?;
            info!("Command input closed");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, shutting down");
        }
    }

    watcher.abort();
    if let Some(poller) = poller {
        poller.abort();
    }
    forwarder.abort();
    let _ = forwarder.await;

    // Writer finishes once every sender is gone
    drop(out_tx);
    let _ = writer.await;

    info!("CurrencySense stopped");
    Ok(())
}

async fn read_commands<R>(
    input: R,
    controller: &Arc<AppController>,
    out: &mpsc::Sender<Outbound>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Command>(line) {
            Ok(command) if command.is_slow() => {
                let controller = Arc::clone(controller);
                let out = out.clone();
                tokio::spawn(async move {
                    let reply = dispatch(&controller, command).await;
                    let _ = out.send(Outbound::Reply(reply)).await;
                });
                continue;
            }
            Ok(command) => dispatch(controller, command).await,
            Err(e) => {
                warn!(error = %e, "Rejected malformed command");
                Reply::Error {
                    message: format!("Invalid command: {}", e),
                }
            }
        };

        if out.send(Outbound::Reply(reply)).await.is_err() {
            break;
        }
    }
    Ok(())
}

async fn forward_events(mut events: broadcast::Receiver<AppEvent>, out: mpsc::Sender<Outbound>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if out.send(Outbound::Event(event)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped = skipped, "Event output fell behind, events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn write_outbound(mut messages: mpsc::Receiver<Outbound>) {
    let mut stdout = tokio::io::stdout();

    while let Some(message) = messages.recv().await {
        let mut line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to encode output");
                continue;
            }
        };
        line.push('\n');

        if let Err(e) = stdout.write_all(line.as_bytes()).await {
            error!(error = %e, "Failed to write output");
            break;
        }
        let _ = stdout.flush().await;
    }
}
