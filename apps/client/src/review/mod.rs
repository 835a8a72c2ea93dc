// Résumé review: confidence policy, user corrections, and local input checks.
// Nothing in here talks to the network.

pub mod confidence;
pub mod corrections;
pub mod handlers;
pub mod validation;
