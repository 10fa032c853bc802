// Application guidance: per (profile, scholarship) essay tips, checklist and
// improvement suggestions, generated once and then served from the store.

pub mod advisor;
pub mod handlers;
pub mod prompts;
