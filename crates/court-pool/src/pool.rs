//! The fixed-capacity session pool.
//!
//! Owns the slot array, the role directory, the courtroom state, and the
//! transcript. All mutation goes through the operations here and in
//! [`crate::dispatch`]; no error ever escapes them — failure is
//! represented as slot state (`Error` + `last_error`) or as a silent
//! no-op, and every swallowed failure is traced so it stays observable.

use std::collections::HashMap;
use std::sync::Arc;

use court_core::{ClientPayload, Role, Visibility};
use court_settings::CourtSettings;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::slot::{SessionSlot, SlotStatus};
use crate::state::CourtState;
use crate::transcript::{Transcript, TranscriptKind};
use crate::transport::{Connector, LinkEvent};
use crate::transport::ws::WsConnector;

/// Refusal diagnostic: the case has a verdict, no new connections.
pub const REFUSED_CASE_CLOSED: &str = "案件已结案，禁止新连接";
/// Refusal diagnostic: private cases do not admit the audience.
pub const REFUSED_PRIVATE_AUDIENCE: &str = "私有案件不允许观众";
/// Fixed diagnostic for a connection that failed to establish.
pub const CONNECT_FAILED: &str = "连接失败";
/// Fixed diagnostic for a connection that failed mid-session.
pub const CONNECTION_ERROR: &str = "连接错误";

/// Resolved inputs the pool needs; injected, never read from ambient
/// globals inside core logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Full court endpoint URL.
    pub endpoint: String,
    /// Number of slots, fixed for the pool's lifetime.
    pub capacity: usize,
}

impl From<&CourtSettings> for PoolConfig {
    fn from(settings: &CourtSettings) -> Self {
        Self {
            endpoint: settings.ws_url(),
            capacity: settings.capacity,
        }
    }
}

/// Fixed-capacity manager of courtroom sessions.
pub struct CourtPool {
    pub(crate) endpoint: String,
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) slots: Vec<SessionSlot>,
    pub(crate) last_of_role: HashMap<Role, usize>,
    pub(crate) state: CourtState,
    pub(crate) transcript: Transcript,
}

impl CourtPool {
    /// Build a pool over the given connector.
    ///
    /// Slots are created once here and reused across connect/disconnect
    /// cycles, never reallocated.
    pub fn new(config: PoolConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            endpoint: config.endpoint,
            connector,
            slots: (0..config.capacity).map(SessionSlot::new).collect(),
            last_of_role: HashMap::new(),
            state: CourtState::new(),
            transcript: Transcript::new(),
        }
    }

    /// Build a pool over the production WebSocket connector.
    pub fn over_websocket(settings: &CourtSettings) -> Self {
        Self::new(PoolConfig::from(settings), Arc::new(WsConnector))
    }

    /// Connect slot `index` as `role` with the given credential.
    ///
    /// Out-of-range indexes are ignored. A terminal verdict or a
    /// private/audience combination refuses synchronously: the slot goes
    /// to `Error` with a diagnostic and no connection attempt is made.
    /// Otherwise any live connection on the slot is closed first, the
    /// pool-wide visibility takes the passed value, and a transport is
    /// opened. On open the auth handshake goes out, the slot is marked,
    /// and the role directory points at this index.
    pub async fn connect(
        &mut self,
        index: usize,
        role: Role,
        secret: impl Into<String>,
        visibility: Visibility,
    ) {
        if index >= self.slots.len() {
            debug!(index, "connect ignored: index out of range");
            return;
        }
        if self.state.is_terminal() {
            warn!(index, role = %role, "connect refused: case closed");
            self.slots[index].refuse(REFUSED_CASE_CLOSED);
            return;
        }
        if visibility == Visibility::Private && role == Role::Audience {
            warn!(index, "connect refused: private case bars the audience");
            self.slots[index].refuse(REFUSED_PRIVATE_AUDIENCE);
            return;
        }

        self.state.set_visibility(visibility);
        // At most one live connection per slot.
        if let Some(link) = self.slots[index].take_link() {
            link.close();
        }
        // The directory never keys a role to a slot that no longer holds it.
        if let Some(prev) = self.slots[index].role() {
            if prev != role && self.last_of_role.get(&prev) == Some(&index) {
                let _ = self.last_of_role.remove(&prev);
            }
        }
        let secret = secret.into();
        self.slots[index].begin_connect(role, secret.clone(), visibility);

        let connector = Arc::clone(&self.connector);
        let endpoint = self.endpoint.clone();
        match connector.connect(&endpoint).await {
            Ok(link) => {
                let auth = ClientPayload::Auth {
                    role,
                    secret,
                    visibility,
                };
                match serde_json::to_string(&auth) {
                    Ok(frame) => {
                        if !link.send_text(frame) {
                            debug!(index, "auth frame dropped: transport gone at handshake");
                        }
                    }
                    Err(e) => warn!(index, error = %e, "failed to serialize auth handshake"),
                }
                self.slots[index].complete_open(link);
                let _ = self.last_of_role.insert(role, index);
                self.transcript
                    .record(TranscriptKind::Connect, Some(role), Some(json!({ "index": index })));
            }
            Err(e) => {
                warn!(index, role = %role, error = %e, "connect failed");
                self.slots[index].fail(CONNECT_FAILED);
                self.transcript
                    .record(TranscriptKind::Error, Some(role), Some(Value::from(CONNECT_FAILED)));
            }
        }
    }

    /// Disconnect slot `index`. Idempotent; out-of-range is a no-op.
    ///
    /// Close-time transport errors are swallowed. The role-directory
    /// entry is removed only if it still points at this index; the
    /// slot's own role field is retained for the transcript.
    pub fn disconnect(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        let role = slot.role();
        if let Some(link) = slot.take_link() {
            link.close();
        }
        slot.mark_closed();
        if let Some(role) = role {
            if self.last_of_role.get(&role) == Some(&index) {
                let _ = self.last_of_role.remove(&role);
            }
        }
        self.transcript
            .record(TranscriptKind::Disconnect, role, Some(json!({ "index": index })));
    }

    /// Disconnect every slot, in index order.
    pub fn disconnect_all(&mut self) {
        for index in 0..self.slots.len() {
            self.disconnect(index);
        }
    }

    /// Transmit a typed protocol payload through slot `index`.
    ///
    /// No-op unless the slot is open, marked, and the case has no
    /// verdict. Serialization happens here, at the boundary.
    pub fn send(&mut self, index: usize, payload: &ClientPayload) {
        match serde_json::to_string(payload) {
            Ok(frame) => {
                let content = serde_json::to_value(payload).ok();
                self.transmit(index, frame, content, false);
            }
            Err(e) => warn!(index, error = %e, "failed to serialize payload"),
        }
    }

    /// Transmit a raw text frame through slot `index`, same gates as
    /// [`send`](Self::send).
    pub fn send_text(&mut self, index: usize, text: impl Into<String>) {
        let text = text.into();
        let content = Some(Value::from(text.clone()));
        self.transmit(index, text, content, false);
    }

    /// Shared transmission path. `bypass_verdict` exists solely for the
    /// verdict's own notification, which goes out after the terminal
    /// marker is set.
    pub(crate) fn transmit(
        &mut self,
        index: usize,
        frame: String,
        content: Option<Value>,
        bypass_verdict: bool,
    ) {
        if self.state.is_terminal() && !bypass_verdict {
            return;
        }
        let Some(slot) = self.slots.get(index) else {
            return;
        };
        if slot.status() != SlotStatus::Open || !slot.marked() {
            return;
        }
        let Some(link) = slot.link() else {
            return;
        };
        // Best-effort delivery: a dropped frame is traced, not retried,
        // and leaves no transcript entry.
        if !link.send_text(frame) {
            debug!(index, "frame dropped: transport gone");
            return;
        }
        let role = slot.role();
        self.transcript.record(TranscriptKind::Send, role, content);
    }

    /// Lowest reusable slot index (idle, closed, or error), if any.
    pub fn next_available(&self) -> Option<usize> {
        self.slots.iter().position(SessionSlot::is_reusable)
    }

    /// Drain pending transport events from every slot.
    ///
    /// This is the event-loop edge: peer messages land in the
    /// transcript, mid-session errors and closes transition the slot.
    /// Run-to-completion — no other mutation interleaves with a drain.
    pub fn process_events(&mut self) {
        for index in 0..self.slots.len() {
            loop {
                let Some(slot) = self.slots.get_mut(index) else {
                    break;
                };
                let Some(event) = slot.poll_event() else {
                    break;
                };
                let role = slot.role();
                match event {
                    LinkEvent::Message(text) => {
                        self.transcript
                            .record(TranscriptKind::Message, role, Some(Value::from(text)));
                    }
                    LinkEvent::Error(reason) => {
                        warn!(index, error = %reason, "transport error");
                        self.slots[index].fail(CONNECTION_ERROR);
                        self.transcript
                            .record(TranscriptKind::Error, role, Some(Value::from(CONNECTION_ERROR)));
                        break;
                    }
                    LinkEvent::Closed => {
                        self.slots[index].mark_closed();
                        self.transcript
                            .record(TranscriptKind::Close, role, Some(json!({ "index": index })));
                        break;
                    }
                }
            }
        }
    }

    /// All slots, in index order.
    pub fn sessions(&self) -> &[SessionSlot] {
        &self.slots
    }

    /// One slot by index.
    pub fn slot(&self, index: usize) -> Option<&SessionSlot> {
        self.slots.get(index)
    }

    /// The slot currently addressable as `role`, if any.
    pub fn slot_of_role(&self, role: Role) -> Option<usize> {
        self.last_of_role.get(&role).copied()
    }

    /// The append-only transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The courtroom moderation state.
    pub fn state(&self) -> &CourtState {
        &self.state
    }

    /// Whether a role is currently muted.
    pub fn is_muted(&self, role: Role) -> bool {
        self.state.is_muted(role)
    }

    /// Whether the verdict has been rendered (the pool is frozen).
    pub fn is_case_closed(&self) -> bool {
        self.state.is_terminal()
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fixed slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
