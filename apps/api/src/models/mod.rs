pub mod guidance;
pub mod profile;
pub mod scholarship;
pub mod scholarship_match;
pub mod tags;

/// Raised when a stored or submitted string does not name a known enum variant.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
