// Client-side skill analysis: gap against a target role, difficulty-bucketed
// learning phases, and per-category coverage for the radar view.
// All pure functions; no network, no I/O.

pub mod difficulty;
pub mod gap;
pub mod handlers;
pub mod radar;
pub mod roadmap;
pub mod roles;
