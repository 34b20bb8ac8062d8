//! Role-secret format validation.
//!
//! Applied by callers as a pre-connect gate; the pool never consults it.
//! One anchored, case-insensitive pattern per role. The witness role has
//! no format constraint beyond a non-empty secret.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::ValidationError;
use crate::roles::Role;

static JUDGE_SECRET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^J-[a-z0-9]+$").expect("hard-coded pattern"));
static PLAINTIFF_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^P-(\d{5,12})-(\d{5,12})-[a-z0-9]+$").expect("hard-coded pattern")
});
static DEFENDANT_SECRET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^D-(\d{5,12})-[a-z0-9]+$").expect("hard-coded pattern"));
static AUDIENCE_SECRET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^A-[a-z0-9]+$").expect("hard-coded pattern"));

/// Check a candidate secret against the format required for `role`.
///
/// Leading/trailing whitespace is ignored. An empty secret fails for every
/// role; beyond that, witnesses accept any secret.
pub fn validate_secret(role: Role, secret: &str) -> Result<(), ValidationError> {
    let s = secret.trim();
    if s.is_empty() {
        return Err(ValidationError::MissingSecret);
    }
    let ok = match role {
        Role::Judge => JUDGE_SECRET.is_match(s),
        Role::Plaintiff => PLAINTIFF_SECRET.is_match(s),
        Role::Defendant => DEFENDANT_SECRET.is_match(s),
        Role::Audience => AUDIENCE_SECRET.is_match(s),
        Role::Witness => true,
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidSecret { role })
    }
}
