//! Role-scoped action verbs, validated against the courtroom state
//! before any network I/O.
//!
//! Commands resolve the acting role through the role directory; an
//! unbound role is silently dropped (roles are ephemeral, the surface
//! is best-effort by design). Disallowed commands — muted speaker,
//! non-party evidence, moderating the judge — are no-ops, traced for
//! observability.

use court_core::{CaseStatus, ClientPayload, Role};
use serde_json::{Value, json};
use tracing::debug;

use crate::pool::CourtPool;
use crate::transcript::TranscriptKind;

impl CourtPool {
    /// Speak as `role`. Requires non-empty text and speaking permission.
    pub fn speak_by_role(&mut self, role: Role, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let Some(index) = self.slot_of_role(role) else {
            debug!(role = %role, "speak dropped: role unbound");
            return;
        };
        if !self.state.can_speak(role) {
            debug!(role = %role, "speak dropped: not permitted");
            return;
        }
        self.send(index, &ClientPayload::Speak { role, text });
    }

    /// Submit evidence as `role`. Parties only, same speaking gate.
    pub fn submit_evidence_by_role(&mut self, role: Role, data: impl Into<String>) {
        let data = data.into();
        if data.is_empty() {
            return;
        }
        let Some(index) = self.slot_of_role(role) else {
            debug!(role = %role, "evidence dropped: role unbound");
            return;
        };
        if !role.is_party() {
            debug!(role = %role, "evidence dropped: not a party");
            return;
        }
        if !self.state.can_speak(role) {
            debug!(role = %role, "evidence dropped: not permitted");
            return;
        }
        self.send(index, &ClientPayload::Evidence { role, data });
    }

    /// Mute a role. The judge is immune; immune targets leave no trace.
    pub fn judge_mute(&mut self, role: Role) {
        if self.state.mute(role) {
            self.transcript
                .record(TranscriptKind::JudgeMute, None, role_content(role));
        }
    }

    /// Unmute a role. The judge is immune.
    pub fn judge_unmute(&mut self, role: Role) {
        if self.state.unmute(role) {
            self.transcript
                .record(TranscriptKind::JudgeUnmute, None, role_content(role));
        }
    }

    /// Render the verdict, freezing the pool.
    ///
    /// Empty text is a valid verdict. If a judge slot is bound, the
    /// notification is pushed through it directly — the one transmission
    /// allowed past the terminal gate it just set.
    pub fn judge_verdict(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.record_verdict(text.clone());
        self.transcript
            .record(TranscriptKind::JudgeVerdict, None, Some(Value::from(text.clone())));
        if let Some(index) = self.slot_of_role(Role::Judge) {
            let payload = ClientPayload::Verdict {
                role: Role::Judge,
                text,
            };
            match serde_json::to_string(&payload) {
                Ok(frame) => {
                    let content = serde_json::to_value(&payload).ok();
                    self.transmit(index, frame, content, true);
                }
                Err(e) => debug!(error = %e, "failed to serialize verdict notification"),
            }
        }
    }

    /// Set the procedural case status and notify the judge slot.
    pub fn judge_set_case_status(&mut self, status: CaseStatus) {
        self.state.set_case_status(status);
        self.transcript.record(
            TranscriptKind::JudgeCaseStatus,
            None,
            serde_json::to_value(status).ok(),
        );
        if let Some(index) = self.slot_of_role(Role::Judge) {
            self.send(
                index,
                &ClientPayload::CaseStatus {
                    role: Role::Judge,
                    status,
                },
            );
        }
    }

    /// Judge announcement, independent of mute and open state. Routed to
    /// the judge's own slot as an acknowledgment channel.
    pub fn judge_announcement(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.transcript
            .record(TranscriptKind::JudgeAnnouncement, None, Some(Value::from(text.clone())));
        if let Some(index) = self.slot_of_role(Role::Judge) {
            self.send(
                index,
                &ClientPayload::Announcement {
                    role: Role::Judge,
                    text,
                },
            );
        }
    }

    /// Open the case for speech. Does not touch the verdict.
    pub fn open_case(&mut self) {
        self.state.open_case();
        self.transcript.record(TranscriptKind::CaseOpen, None, None);
    }

    /// Close the case for speech. Does not touch the verdict.
    pub fn close_case(&mut self) {
        self.state.close_case();
        self.transcript.record(TranscriptKind::CaseClose, None, None);
    }

    /// Force-disconnect a specific slot, logging the role it held.
    pub fn judge_kick_session(&mut self, index: usize) {
        let Some(slot) = self.slot(index) else {
            return;
        };
        let role = slot.role();
        self.disconnect(index);
        self.transcript.record(
            TranscriptKind::JudgeKick,
            None,
            Some(json!({ "index": index, "role": role })),
        );
    }

    /// Force-disconnect the slot currently bound to `role`.
    pub fn judge_kick_role(&mut self, role: Role) {
        if let Some(index) = self.slot_of_role(role) {
            self.judge_kick_session(index);
        }
    }

    /// Promote a slot to witness. The judge cannot be converted.
    ///
    /// The prior role's directory entry is removed only if it still
    /// points at this index, so a newer holder of that role is never
    /// clobbered. The witness entry always moves to this index; a
    /// previously promoted slot keeps its role field and simply becomes
    /// unaddressable as the witness.
    pub fn judge_make_witness(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.role() == Some(Role::Judge) {
            return;
        }
        let prev = slot.set_role(Role::Witness);
        if let Some(prev) = prev {
            if self.last_of_role.get(&prev) == Some(&index) {
                let _ = self.last_of_role.remove(&prev);
            }
        }
        let _ = self.last_of_role.insert(Role::Witness, index);
        self.transcript
            .record(TranscriptKind::JudgeMakeWitness, None, Some(json!({ "index": index })));
    }

    /// Revoke a witness back to the audience. No-op unless the slot
    /// currently holds the witness role.
    pub fn judge_revoke_witness(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.role() != Some(Role::Witness) {
            return;
        }
        let _ = slot.set_role(Role::Audience);
        if self.last_of_role.get(&Role::Witness) == Some(&index) {
            let _ = self.last_of_role.remove(&Role::Witness);
        }
        let _ = self.last_of_role.insert(Role::Audience, index);
        self.transcript
            .record(TranscriptKind::JudgeRevokeWitness, None, Some(json!({ "index": index })));
    }
}

/// Transcript content for a moderation action targeting a role.
fn role_content(role: Role) -> Option<Value> {
    serde_json::to_value(role).ok()
}
