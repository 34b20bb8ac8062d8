//! Courtroom role and moderation enums.
//!
//! All enums serialize to the exact wire strings of the original courtroom
//! protocol (Chinese role and visibility names, lowercase case statuses).
//! The rest of the codebase manipulates the typed variants; the strings
//! appear only at serialization boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A courtroom participant role.
///
/// A role is a capability tag, not an identity: the same peer may hold
/// different roles across connections, and moderation (witness promotion)
/// can reassign a role mid-session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// 法官 — presides over the case; immune to muting and kicking-by-promotion.
    #[serde(rename = "法官")]
    Judge,
    /// 原告 — may speak and submit evidence.
    #[serde(rename = "原告")]
    Plaintiff,
    /// 被告 — may speak and submit evidence.
    #[serde(rename = "被告")]
    Defendant,
    /// 观众 — may observe only; never initiates speech.
    #[serde(rename = "观众")]
    Audience,
    /// 证人 — granted and revoked by the judge at runtime.
    #[serde(rename = "证人")]
    Witness,
}

impl Role {
    /// All roles, in protocol order.
    pub const ALL: [Role; 5] = [
        Role::Judge,
        Role::Plaintiff,
        Role::Defendant,
        Role::Audience,
        Role::Witness,
    ];

    /// The wire name used on the protocol and in transcripts.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::Judge => "法官",
            Role::Plaintiff => "原告",
            Role::Defendant => "被告",
            Role::Audience => "观众",
            Role::Witness => "证人",
        }
    }

    /// Whether this role is a litigating party (plaintiff or defendant).
    ///
    /// Only parties may submit evidence.
    pub fn is_party(self) -> bool {
        matches!(self, Role::Plaintiff | Role::Defendant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Case visibility.
///
/// Private cases refuse audience connections at admission time. Existing
/// sessions are unaffected by later visibility changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// 公开 — anyone may connect in any role.
    #[serde(rename = "公开")]
    Public,
    /// 私有 — audience connections are refused.
    #[serde(rename = "私有")]
    Private,
}

impl Visibility {
    /// The wire name used on the protocol and in transcripts.
    pub fn wire_name(self) -> &'static str {
        match self {
            Visibility::Public => "公开",
            Visibility::Private => "私有",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Procedural status of the case, set by the judge.
///
/// Distinct from the verdict: case status may change while the case is
/// live, the verdict is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Case filed, not yet accepted.
    Pending,
    /// Case accepted for hearing.
    Accepted,
    /// Case rejected.
    Rejected,
}
