// Student profiles: form validation and CRUD handlers.
// Validation runs before anything is stored or any oracle is called.

pub mod handlers;
pub mod validation;
