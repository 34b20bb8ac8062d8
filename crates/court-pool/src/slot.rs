//! One pooled connection attempt, bound to a stable index.
//!
//! Slots are created once at pool construction and reused across
//! connect/disconnect cycles. Two invariants hold across every
//! transition:
//!
//! - the link is present iff the status is `Connecting` or `Open`
//! - `marked` implies status `Open`
//!
//! Fields are private; external callers read through getters and mutate
//! only through the pool's documented operations.

use court_core::{Role, Visibility};
use serde::Serialize;

use crate::transport::{Link, LinkEvent};

/// Usability of a slot — the single source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Never used since construction.
    Idle,
    /// Transport open in flight.
    Connecting,
    /// Live, handshake sent.
    Open,
    /// Disconnected (explicitly or by the peer).
    Closed,
    /// Admission refused or transport failed.
    Error,
}

/// A pooled session slot.
#[derive(Debug)]
pub struct SessionSlot {
    index: usize,
    link: Option<Link>,
    status: SlotStatus,
    role: Option<Role>,
    secret: Option<String>,
    marked: bool,
    visibility: Option<Visibility>,
    last_error: Option<String>,
}

impl SessionSlot {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            link: None,
            status: SlotStatus::Idle,
            role: None,
            secret: None,
            marked: false,
            visibility: None,
            last_error: None,
        }
    }

    /// Stable identity within the pool.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current slot status.
    pub fn status(&self) -> SlotStatus {
        self.status
    }

    /// Role assigned at connect time (mutable via witness promotion).
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Credential supplied at connect time, retained for the session.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Whether the handshake has been sent; gates protocol payloads.
    pub fn marked(&self) -> bool {
        self.marked
    }

    /// Case visibility snapshot taken at connect time.
    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    /// Last human-readable failure reason, for diagnostics.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the slot currently owns a transport handle.
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Whether a new connect attempt may reuse this slot.
    pub fn is_reusable(&self) -> bool {
        matches!(
            self.status,
            SlotStatus::Idle | SlotStatus::Closed | SlotStatus::Error
        )
    }

    /// Synchronous admission refusal: no connection attempt was made.
    pub(crate) fn refuse(&mut self, message: &str) {
        if let Some(link) = self.link.take() {
            link.close();
        }
        self.marked = false;
        self.status = SlotStatus::Error;
        self.last_error = Some(message.to_string());
    }

    /// Enter the connecting state with fresh session parameters.
    pub(crate) fn begin_connect(&mut self, role: Role, secret: String, visibility: Visibility) {
        self.status = SlotStatus::Connecting;
        self.role = Some(role);
        self.secret = Some(secret);
        self.visibility = Some(visibility);
        self.marked = false;
        self.last_error = None;
    }

    /// Take ownership of an established link; the handshake is out.
    pub(crate) fn complete_open(&mut self, link: Link) {
        self.link = Some(link);
        self.marked = true;
        self.status = SlotStatus::Open;
    }

    /// Transport-level failure, during setup or mid-session.
    pub(crate) fn fail(&mut self, message: &str) {
        self.link = None;
        self.marked = false;
        self.status = SlotStatus::Error;
        self.last_error = Some(message.to_string());
    }

    /// The connection is gone (explicit disconnect or peer close).
    pub(crate) fn mark_closed(&mut self) {
        self.link = None;
        self.marked = false;
        self.status = SlotStatus::Closed;
    }

    /// Reassign the role, returning the previous one.
    pub(crate) fn set_role(&mut self, role: Role) -> Option<Role> {
        self.role.replace(role)
    }

    pub(crate) fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub(crate) fn take_link(&mut self) -> Option<Link> {
        self.link.take()
    }

    pub(crate) fn poll_event(&mut self) -> Option<LinkEvent> {
        self.link.as_mut()?.poll_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_slot() -> SessionSlot {
        let mut slot = SessionSlot::new(0);
        slot.begin_connect(Role::Plaintiff, "P-12345-67890-x".into(), Visibility::Public);
        let (link, _peer) = Link::channel();
        slot.complete_open(link);
        slot
    }

    #[test]
    fn fresh_slot_is_idle_and_unmarked() {
        let slot = SessionSlot::new(3);
        assert_eq!(slot.index(), 3);
        assert_eq!(slot.status(), SlotStatus::Idle);
        assert!(!slot.marked());
        assert!(!slot.is_connected());
        assert!(slot.is_reusable());
    }

    #[test]
    fn begin_connect_resets_marked_and_error() {
        let mut slot = SessionSlot::new(0);
        slot.refuse("nope");
        assert_eq!(slot.last_error(), Some("nope"));

        slot.begin_connect(Role::Judge, "J-a".into(), Visibility::Public);
        assert_eq!(slot.status(), SlotStatus::Connecting);
        assert_eq!(slot.role(), Some(Role::Judge));
        assert_eq!(slot.secret(), Some("J-a"));
        assert_eq!(slot.visibility(), Some(Visibility::Public));
        assert!(!slot.marked());
        assert_eq!(slot.last_error(), None);
        assert!(!slot.is_reusable());
    }

    #[test]
    fn open_slot_is_marked_and_not_reusable() {
        let slot = live_slot();
        assert_eq!(slot.status(), SlotStatus::Open);
        assert!(slot.marked());
        assert!(slot.is_connected());
        assert!(!slot.is_reusable());
    }

    #[test]
    fn leaving_open_always_clears_mark_and_link() {
        let mut closed = live_slot();
        closed.mark_closed();
        assert_eq!(closed.status(), SlotStatus::Closed);
        assert!(!closed.marked());
        assert!(!closed.is_connected());

        let mut failed = live_slot();
        failed.fail("连接错误");
        assert_eq!(failed.status(), SlotStatus::Error);
        assert!(!failed.marked());
        assert!(!failed.is_connected());
        assert_eq!(failed.last_error(), Some("连接错误"));

        let mut refused = live_slot();
        refused.refuse("案件已结案，禁止新连接");
        assert_eq!(refused.status(), SlotStatus::Error);
        assert!(!refused.marked());
        assert!(!refused.is_connected());
    }

    #[test]
    fn closed_and_error_slots_are_reusable() {
        let mut slot = live_slot();
        slot.mark_closed();
        assert!(slot.is_reusable());
        slot.fail("x");
        assert!(slot.is_reusable());
    }

    #[test]
    fn role_reassignment_returns_previous() {
        let mut slot = live_slot();
        assert_eq!(slot.set_role(Role::Witness), Some(Role::Plaintiff));
        assert_eq!(slot.role(), Some(Role::Witness));
    }

    #[test]
    fn disconnect_retains_role_and_secret() {
        let mut slot = live_slot();
        slot.mark_closed();
        assert_eq!(slot.role(), Some(Role::Plaintiff));
        assert_eq!(slot.secret(), Some("P-12345-67890-x"));
    }
}
