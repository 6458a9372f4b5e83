pub mod study_log;
pub mod tag;
pub mod user;
