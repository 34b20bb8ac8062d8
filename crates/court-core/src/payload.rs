//! Outbound protocol payloads.
//!
//! One closed, internally tagged enum per message the pool can transmit.
//! The tag names (`auth`, `court.speak`, …) are the wire contract; the
//! core never builds payloads from loose JSON. Serialization happens only
//! at the transport boundary.

use serde::{Deserialize, Serialize};

use crate::roles::{CaseStatus, Role, Visibility};

/// A message sent from a pooled session to the court server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientPayload {
    /// Handshake sent immediately after the transport opens.
    #[serde(rename = "auth")]
    Auth {
        /// Role the session is connecting as.
        role: Role,
        /// Opaque role credential; validated client-side only.
        secret: String,
        /// Case visibility snapshot at connect time.
        visibility: Visibility,
    },

    /// A spoken statement.
    #[serde(rename = "court.speak")]
    Speak {
        /// Speaking role.
        role: Role,
        /// Statement text.
        text: String,
    },

    /// An evidence submission (parties only).
    #[serde(rename = "court.evidence")]
    Evidence {
        /// Submitting role.
        role: Role,
        /// Evidence body.
        data: String,
    },

    /// The judge's verdict notification.
    #[serde(rename = "court.verdict")]
    Verdict {
        /// Always the judge.
        role: Role,
        /// Verdict text; empty string is a valid verdict.
        text: String,
    },

    /// A case status change notification.
    #[serde(rename = "court.caseStatus")]
    CaseStatus {
        /// Always the judge.
        role: Role,
        /// New procedural status.
        status: CaseStatus,
    },

    /// A judge announcement, independent of mute/open state.
    #[serde(rename = "court.announcement")]
    Announcement {
        /// Always the judge.
        role: Role,
        /// Announcement text.
        text: String,
    },
}
