// Shared prompt fragments. Each module that calls the oracle keeps its own
// prompts.rs next to it and pulls cross-cutting pieces from here.

/// Sentinel rendered for optional profile fields the student left blank.
pub const NOT_PROVIDED: &str = "Not provided";

/// Renders an optional free-text field, substituting `NOT_PROVIDED` when blank.
pub fn or_not_provided(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_PROVIDED,
    }
}
