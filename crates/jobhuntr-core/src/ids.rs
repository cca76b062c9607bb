//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{8 hex chars}`, e.g. `opp-a3f8b2c1`.

pub const PREFIX_OPPORTUNITY: &str = "opp";
pub const PREFIX_APPLICATION: &str = "app";
pub const PREFIX_INTERVIEW: &str = "int";

/// Every prefix the store hands out.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_OPPORTUNITY, PREFIX_APPLICATION, PREFIX_INTERVIEW];

/// Check that `id` looks like `{prefix}-{8 lowercase hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| {
            hex.len() == 8
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
}
