//! Error types shared across the court crates.
//!
//! The pool itself never surfaces these to callers — failures become slot
//! state or silent no-ops (best-effort moderation surface). They exist at
//! the seams: the transport connector and the pre-connect secret gate.

use thiserror::Error;

use crate::roles::Role;

/// Failure at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("failed to establish connection: {0}")]
    Connect(String),
}

/// Failure of the pre-connect role-secret format gate.
///
/// This is a client-side syntactic check, not a trust boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The secret was empty or whitespace.
    #[error("missing secret")]
    MissingSecret,
    /// The secret did not match the role's required format.
    #[error("invalid secret for role {role}")]
    InvalidSecret {
        /// Role whose pattern was not matched.
        role: Role,
    },
}
