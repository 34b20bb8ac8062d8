//! Transport boundary: one bidirectional streaming connection per slot.
//!
//! The pool talks to the network through the [`Connector`] trait and the
//! [`Link`] handle it returns, never through a socket type directly. The
//! production connector ([`ws::WsConnector`]) bridges a WebSocket to the
//! link's channels; tests drive the same channels from a mock.

pub mod ws;

use async_trait::async_trait;
use court_core::TransportError;
use tokio::sync::mpsc;

/// An event surfaced by a live connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// A text frame arrived from the peer.
    Message(String),
    /// The connection failed mid-session.
    Error(String),
    /// The peer or network closed the connection.
    Closed,
}

/// An outbound instruction to the connection driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutFrame {
    /// Transmit a text frame.
    Text(String),
    /// Close the connection and stop the driver.
    Close,
}

/// Owned handle for one live connection.
///
/// Ownership is exclusive to the slot holding it. Sending is best-effort
/// and never blocks; closing is fire-and-forget (the eventual [`LinkEvent::
/// Closed`] against an already-cleared slot is a no-op).
#[derive(Debug)]
pub struct Link {
    frames: mpsc::UnboundedSender<OutFrame>,
    events: mpsc::UnboundedReceiver<LinkEvent>,
}

/// The far side of a [`Link`].
///
/// Driven by the WebSocket bridge in production and by mock connectors in
/// tests: read outbound frames from `frames`, feed inbound events into
/// `events`.
#[derive(Debug)]
pub struct LinkPeer {
    /// Outbound frames written through the link.
    pub frames: mpsc::UnboundedReceiver<OutFrame>,
    /// Inbound events for the link's owner to drain.
    pub events: mpsc::UnboundedSender<LinkEvent>,
}

impl Link {
    /// Build a connected `(Link, LinkPeer)` pair.
    pub fn channel() -> (Link, LinkPeer) {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (
            Link {
                frames: frame_tx,
                events: event_rx,
            },
            LinkPeer {
                frames: frame_rx,
                events: event_tx,
            },
        )
    }

    /// Queue a text frame. Returns false when the driver side is gone.
    pub fn send_text(&self, text: String) -> bool {
        self.frames.send(OutFrame::Text(text)).is_ok()
    }

    /// Ask the driver to close the connection. Never fails.
    pub fn close(&self) {
        let _ = self.frames.send(OutFrame::Close);
    }

    /// Drain one pending event, if any. Never blocks.
    pub(crate) fn poll_event(&mut self) -> Option<LinkEvent> {
        self.events.try_recv().ok()
    }
}

/// Opens connections to the court endpoint.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish a new connection and hand back its owning link.
    async fn connect(&self, url: &str) -> Result<Link, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_reach_the_peer_in_order() {
        let (link, mut peer) = Link::channel();
        assert!(link.send_text("one".into()));
        assert!(link.send_text("two".into()));
        link.close();
        assert_eq!(peer.frames.try_recv().unwrap(), OutFrame::Text("one".into()));
        assert_eq!(peer.frames.try_recv().unwrap(), OutFrame::Text("two".into()));
        assert_eq!(peer.frames.try_recv().unwrap(), OutFrame::Close);
    }

    #[test]
    fn send_fails_once_the_peer_is_gone() {
        let (link, peer) = Link::channel();
        drop(peer);
        assert!(!link.send_text("lost".into()));
        // close stays infallible
        link.close();
    }

    #[test]
    fn events_are_polled_without_blocking() {
        let (mut link, peer) = Link::channel();
        assert_eq!(link.poll_event(), None);
        peer.events.send(LinkEvent::Message("hi".into())).unwrap();
        peer.events.send(LinkEvent::Closed).unwrap();
        assert_eq!(link.poll_event(), Some(LinkEvent::Message("hi".into())));
        assert_eq!(link.poll_event(), Some(LinkEvent::Closed));
        assert_eq!(link.poll_event(), None);
    }
}
