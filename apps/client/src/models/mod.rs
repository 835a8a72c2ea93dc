pub mod job;
pub mod matching;
pub mod resume;
pub mod roadmap;
pub mod user;
