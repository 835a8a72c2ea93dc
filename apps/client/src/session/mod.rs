// Session state: the key-value persistence port and the auth session built on it.
// The store is the single source of truth for everything that outlives a process.

pub mod auth;
pub mod handlers;
pub mod store;
