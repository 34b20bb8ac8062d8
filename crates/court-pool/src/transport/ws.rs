//! WebSocket connector over `tokio-tungstenite`.
//!
//! Each connection gets two driver tasks: a write task draining
//! [`OutFrame`]s into the socket sink, and a read task mapping socket
//! traffic to [`LinkEvent`]s. Both terminate when either side goes away;
//! driver failures surface as events, never as panics.

use async_trait::async_trait;
use court_core::TransportError;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use super::{Connector, Link, LinkEvent, LinkPeer, OutFrame};

/// Production connector: one WebSocket per pooled session.
#[derive(Clone, Copy, Debug, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Link, TransportError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        let (mut sink, mut source) = stream.split();
        let (link, peer) = Link::channel();
        let LinkPeer { mut frames, events } = peer;

        // Write driver: link frames → socket.
        let _write = tokio::spawn(async move {
            while let Some(frame) = frames.recv().await {
                match frame {
                    OutFrame::Text(text) => {
                        if let Err(e) = sink.send(Message::Text(text.into())).await {
                            debug!(error = %e, "outbound frame dropped, stopping write driver");
                            break;
                        }
                    }
                    OutFrame::Close => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        });

        // Read driver: socket → link events. Exactly one terminal event.
        let _read = tokio::spawn(async move {
            loop {
                match source.next().await {
                    Some(Ok(Message::Text(text))) => {
                        if events.send(LinkEvent::Message(text.to_string())).is_err() {
                            return;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // Control and binary frames carry no courtroom traffic.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        let _ = events.send(LinkEvent::Error(e.to_string()));
                        return;
                    }
                }
            }
            let _ = events.send(LinkEvent::Closed);
        });

        Ok(link)
    }
}
