//! # court-pool
//!
//! Fixed-capacity pool of real-time courtroom sessions: connection
//! lifecycle, role binding, speaking permissions, moderation actions,
//! and an append-only event transcript.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `transport` | Connector seam, link handles, WebSocket drivers |
//! | `slot` | One pooled connection attempt bound to an index |
//! | `pool` | Slot array, role directory, connect/disconnect/send |
//! | `state` | Moderation overlay: open/mute/verdict/visibility |
//! | `transcript` | Append-only audit log of all pool/state events |
//! | `dispatch` | Role-scoped verbs gated by the state machine |
//!
//! ## Data Flow
//!
//! `connect` → transport open → handshake → slot marked + directory
//! updated. Commands resolve role → directory → `send`; the state
//! machine gates before any I/O. Every transition appends a transcript
//! entry.
//!
//! ## Failure model
//!
//! No public operation returns an error. Admission violations become
//! slot `Error` state, transport failures are downgraded the same way,
//! and disallowed commands are no-ops — all traced, all observable via
//! slot status and the transcript.

#![deny(unsafe_code)]

pub mod dispatch;
pub mod pool;
pub mod slot;
pub mod state;
pub mod transcript;
pub mod transport;

pub use pool::{
    CONNECT_FAILED, CONNECTION_ERROR, CourtPool, PoolConfig, REFUSED_CASE_CLOSED,
    REFUSED_PRIVATE_AUDIENCE,
};
pub use slot::{SessionSlot, SlotStatus};
pub use state::CourtState;
pub use transcript::{Transcript, TranscriptEvent, TranscriptKind};
pub use transport::{Connector, Link, LinkEvent, LinkPeer, OutFrame, ws::WsConnector};
