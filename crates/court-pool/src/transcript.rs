//! Append-only record of all lifecycle and protocol events.
//!
//! Every state-changing pool operation appends here, in event-loop
//! delivery order. Entries are never mutated, reordered, or deleted by
//! this core; retention is an external concern. The serialized form
//! (camelCase fields, dotted type tags) is the audit/UI contract.

use chrono::{DateTime, Utc};
use court_core::Role;
use serde::Serialize;
use serde_json::Value;

/// Event type tags, matching the courtroom wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TranscriptKind {
    /// Slot handshake acknowledged.
    #[serde(rename = "connect")]
    Connect,
    /// Inbound frame from the peer.
    #[serde(rename = "message")]
    Message,
    /// Transport failure, during setup or mid-session.
    #[serde(rename = "error")]
    Error,
    /// Asynchronous close by peer or network.
    #[serde(rename = "close")]
    Close,
    /// Explicit disconnect.
    #[serde(rename = "disconnect")]
    Disconnect,
    /// Outbound protocol payload transmitted.
    #[serde(rename = "send")]
    Send,
    /// Judge muted a role.
    #[serde(rename = "judge.mute")]
    JudgeMute,
    /// Judge unmuted a role.
    #[serde(rename = "judge.unmute")]
    JudgeUnmute,
    /// Judge rendered the verdict.
    #[serde(rename = "judge.verdict")]
    JudgeVerdict,
    /// Judge changed the procedural case status.
    #[serde(rename = "judge.caseStatus")]
    JudgeCaseStatus,
    /// Judge announcement.
    #[serde(rename = "judge.announcement")]
    JudgeAnnouncement,
    /// Judge force-disconnected a session.
    #[serde(rename = "judge.kick")]
    JudgeKick,
    /// Judge promoted a slot to witness.
    #[serde(rename = "judge.makeWitness")]
    JudgeMakeWitness,
    /// Judge revoked a witness back to audience.
    #[serde(rename = "judge.revokeWitness")]
    JudgeRevokeWitness,
    /// Case opened for speech.
    #[serde(rename = "case.open")]
    CaseOpen,
    /// Case closed for speech.
    #[serde(rename = "case.close")]
    CaseClose,
}

/// One transcript entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptEvent {
    /// Wall-clock append time.
    pub ts: DateTime<Utc>,
    /// Event type tag.
    #[serde(rename = "type")]
    pub kind: TranscriptKind,
    /// Acting or affected role, when one is bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Free-form event content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

/// The append-only transcript log.
#[derive(Debug, Default)]
pub struct Transcript {
    events: Vec<TranscriptEvent>,
}

impl Transcript {
    /// An empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry stamped with the current time.
    pub(crate) fn record(&mut self, kind: TranscriptKind, role: Option<Role>, content: Option<Value>) {
        self.events.push(TranscriptEvent {
            ts: Utc::now(),
            kind,
            role,
            content,
        });
    }

    /// All entries, in append order.
    pub fn events(&self) -> &[TranscriptEvent] {
        &self.events
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&TranscriptEvent> {
        self.events.last()
    }

    /// Number of entries with the given tag.
    pub fn count_of(&self, kind: TranscriptKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
