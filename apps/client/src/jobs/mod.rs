// Job listing view logic: filter state, ranking and the persisted saved-jobs set.

pub mod filters;
pub mod handlers;
pub mod ranking;
pub mod saved;
