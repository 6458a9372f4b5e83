pub mod reminder;
pub mod study_log;
pub mod tag;
