//! Global moderation state and the rules governing who may act.
//!
//! Not a set of mutually exclusive states but an overlay on the pool:
//! `open` gates speech, per-role mute flags silence independently, and
//! the verdict is an absorbing terminal marker. Visibility affects only
//! new connection admission, never existing sessions.

use std::collections::HashMap;

use court_core::{CaseStatus, Role, Visibility};

/// Courtroom moderation state, mutated only by judge-privileged commands
/// (visibility being the exception: it tracks the last successful connect).
#[derive(Debug)]
pub struct CourtState {
    open: bool,
    visibility: Visibility,
    muted: HashMap<Role, bool>,
    verdict: Option<String>,
    case_status: Option<CaseStatus>,
}

impl CourtState {
    /// A freshly convened courtroom: open, public, nobody muted.
    pub fn new() -> Self {
        Self {
            open: true,
            visibility: Visibility::Public,
            muted: Role::ALL.iter().map(|&r| (r, false)).collect(),
            verdict: None,
            case_status: None,
        }
    }

    /// Whether `role` may currently initiate speech.
    ///
    /// The audience can never speak, regardless of mute state.
    pub fn can_speak(&self, role: Role) -> bool {
        if !self.open {
            return false;
        }
        if self.is_muted(role) {
            return false;
        }
        role != Role::Audience
    }

    /// Silence a role. The judge is immune; returns whether the flag was set.
    pub fn mute(&mut self, role: Role) -> bool {
        if role == Role::Judge {
            return false;
        }
        let _ = self.muted.insert(role, true);
        true
    }

    /// Lift a role's mute. The judge is immune; returns whether applied.
    pub fn unmute(&mut self, role: Role) -> bool {
        if role == Role::Judge {
            return false;
        }
        let _ = self.muted.insert(role, false);
        true
    }

    /// Whether a role is currently muted.
    pub fn is_muted(&self, role: Role) -> bool {
        self.muted.get(&role).copied().unwrap_or(false)
    }

    /// Render the verdict. Empty text is a valid verdict; absence means
    /// "not yet rendered". Once set it is never cleared.
    pub fn record_verdict(&mut self, text: String) {
        self.verdict = Some(text);
    }

    /// The rendered verdict, if any.
    pub fn verdict(&self) -> Option<&str> {
        self.verdict.as_deref()
    }

    /// Whether the case is permanently closed for this pool's lifetime.
    pub fn is_terminal(&self) -> bool {
        self.verdict.is_some()
    }

    /// Set the procedural case status.
    pub fn set_case_status(&mut self, status: CaseStatus) {
        self.case_status = Some(status);
    }

    /// Current procedural case status.
    pub fn case_status(&self) -> Option<CaseStatus> {
        self.case_status
    }

    /// Record the visibility of the most recent connect (last-connect-wins).
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// Current case visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Open the case for speech. Does not touch the verdict.
    pub fn open_case(&mut self) {
        self.open = true;
    }

    /// Close the case for speech. Does not touch the verdict.
    pub fn close_case(&mut self) {
        self.open = false;
    }

    /// Whether non-audience, non-muted roles may speak.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Default for CourtState {
    fn default() -> Self {
        Self::new()
    }
}
