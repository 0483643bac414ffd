// Job store and the HTTP surface residents and volunteers use.
// Triage happens inside `JobStore::submit`; handlers only validate and shape responses.

pub mod handlers;
pub mod seed;
pub mod store;
pub mod validation;
