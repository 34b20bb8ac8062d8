//! # court-core
//!
//! Foundation types for the court session pool.
//!
//! This crate provides the shared vocabulary the other court crates depend on:
//!
//! - **Roles**: [`roles::Role`], [`roles::Visibility`], [`roles::CaseStatus`]
//!   as closed enums carrying the exact wire names of the courtroom protocol
//! - **Payloads**: [`payload::ClientPayload`] — the tagged outbound message
//!   type, serialized only at the transport boundary
//! - **Errors**: [`errors::TransportError`], [`errors::ValidationError`] via
//!   `thiserror`
//! - **Validators**: [`validators::validate_secret`] — the per-role secret
//!   format gate applied by callers before connecting
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `court-settings` and `court-pool`.

#![deny(unsafe_code)]

pub mod errors;
pub mod payload;
pub mod roles;
pub mod validators;

pub use errors::{TransportError, ValidationError};
pub use payload::ClientPayload;
pub use roles::{CaseStatus, Role, Visibility};
