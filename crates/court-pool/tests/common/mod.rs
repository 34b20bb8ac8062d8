#![allow(dead_code)]

//! Shared test fixtures: a channel-backed connector that records every
//! link it hands out, so tests can inspect outbound frames and inject
//! peer events.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use court_core::TransportError;
use court_pool::{Connector, Link, LinkEvent, LinkPeer, OutFrame};

/// Connector whose connections are in-memory channel pairs.
///
/// Peers are indexed in successful-connect order.
pub struct MockConnector {
    peers: Mutex<Vec<Option<LinkPeer>>>,
    fail_next: AtomicBool,
    attempts: AtomicUsize,
}

impl MockConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            peers: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
            attempts: AtomicUsize::new(0),
        })
    }

    /// Make the next connect attempt fail.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Total connect attempts, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Number of links handed out.
    pub fn peer_count(&self) -> usize {
        self.peers.lock().unwrap().len()
    }

    /// Drain all outbound frames queued on peer `index`.
    pub fn drain_frames(&self, index: usize) -> Vec<OutFrame> {
        let mut peers = self.peers.lock().unwrap();
        let Some(Some(peer)) = peers.get_mut(index) else {
            return Vec::new();
        };
        let mut frames = Vec::new();
        while let Ok(frame) = peer.frames.try_recv() {
            frames.push(frame);
        }
        frames
    }

    /// Drain outbound text frames on peer `index`, parsed as JSON.
    pub fn drain_json(&self, index: usize) -> Vec<serde_json::Value> {
        self.drain_frames(index)
            .into_iter()
            .filter_map(|frame| match frame {
                OutFrame::Text(text) => serde_json::from_str(&text).ok(),
                OutFrame::Close => None,
            })
            .collect()
    }

    /// Inject an inbound event on peer `index`.
    pub fn push_event(&self, index: usize, event: LinkEvent) {
        let peers = self.peers.lock().unwrap();
        if let Some(Some(peer)) = peers.get(index) {
            peer.events.send(event).unwrap();
        }
    }

    /// Drop peer `index`, simulating a dead transport driver.
    pub fn drop_peer(&self, index: usize) {
        let mut peers = self.peers.lock().unwrap();
        if let Some(slot) = peers.get_mut(index) {
            *slot = None;
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, _url: &str) -> Result<Link, TransportError> {
        let _ = self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(TransportError::Connect("refused".into()));
        }
        let (link, peer) = Link::channel();
        self.peers.lock().unwrap().push(Some(peer));
        Ok(link)
    }
}

/// Route test logs through the captured test writer.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}
