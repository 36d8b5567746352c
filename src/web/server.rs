//! WebSocket server: one game session per connection.

use super::registry::{parse_action, SessionRegistry};
use crate::core::constants::FRAME_MS;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message;

/// Snapshot push interval (about 30 Hz).
const SNAPSHOT_INTERVAL_MS: u64 = 33;

/// Tick every live session at the frame rate until the process exits.
pub async fn run_scheduler(registry: Arc<SessionRegistry>) {
    let mut ticker = interval(Duration::from_millis(FRAME_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        registry.tick_all(FRAME_MS).await;
    }
}

/// Start the scheduler and accept WebSocket connections on `port`.
pub async fn start_web_server(port: u16, registry: Arc<SessionRegistry>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on ws://localhost:{}", port);

    tokio::spawn(run_scheduler(Arc::clone(&registry)));

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, registry).await {
                        tracing::warn!("Connection error from {}: {}", addr, e);
                    }
                });
            }
            Err(e) => {
                tracing::warn!("Accept error: {}", e);
            }
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    registry: Arc<SessionRegistry>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let (id, session) = registry.create().await;
    tracing::info!("WebSocket connection from {} (session {})", addr, id);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let frames = Arc::clone(&session);
    let send_task = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(SNAPSHOT_INTERVAL_MS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let frame = frames.lock().await.take_frame(id);
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to encode frame for {}: {}", id, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match parse_action(&text) {
                Some(input) => session.lock().await.game.handle_input(input),
                None => tracing::debug!("Ignoring message from {}: {}", id, text),
            },
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    registry.remove(id).await;
    tracing::info!("WebSocket disconnected: {}", addr);

    Ok(())
}
