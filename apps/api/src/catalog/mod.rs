// Scholarship catalog: listing, search, and the built-in seed data.
// The matching pipeline only ever reads from it.

pub mod handlers;
pub mod search;
pub mod seed;
