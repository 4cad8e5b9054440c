//! WebSocket transport for the gateway connection
//!
//! Thin wrapper over tokio-tungstenite: JSON text frames in, JSON text
//! frames out. Framing oddities (binary frames, pings) are absorbed here so
//! the bridge only sees parsed `ServerEvent`s.

use anyhow::{Context, Result};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use textlands_protocol::{ClientMessage, ServerEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One live socket to the gateway.
pub(crate) struct GatewaySocket {
    write: SplitSink<WsStream, Message>,
    read: SplitStream<WsStream>,
}

impl GatewaySocket {
    /// Open the socket and perform the WebSocket handshake.
    pub(crate) async fn connect(url: &str) -> Result<Self> {
        let (ws_stream, _) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to gateway at {url}"))?;
        tracing::info!(%url, "connected to gateway");

        let (write, read) = ws_stream.split();
        Ok(Self { write, read })
    }

    /// Serialize and send one outbound frame.
    pub(crate) async fn send(&mut self, message: &ClientMessage) -> Result<()> {
        let json = serde_json::to_string(message).context("failed to serialize frame")?;
        self.write
            .send(Message::Text(json))
            .await
            .context("failed to send frame")
    }

    /// Receive the next event frame.
    ///
    /// Returns `None` once the connection is closed or errored; a frame
    /// that fails to parse is returned as `Err` so the bridge can log and
    /// skip it without tearing the connection down.
    pub(crate) async fn next_event(&mut self) -> Option<Result<ServerEvent, serde_json::Error>> {
        loop {
            match self.read.next().await? {
                Ok(Message::Text(text)) => return Some(serde_json::from_str(&text)),
                Ok(Message::Close(_)) => {
                    tracing::info!("gateway closed the connection");
                    return None;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Ok(other) => {
                    tracing::debug!(frame = ?other, "ignoring non-text frame");
                }
                Err(e) => {
                    tracing::error!(error = %e, "gateway socket error");
                    return None;
                }
            }
        }
    }

    /// Close the socket gracefully. Errors are ignored; the connection is
    /// going away either way.
    pub(crate) async fn close(&mut self) {
        let _ = self.write.close().await;
    }
}
