pub mod prelude;

pub mod study_log_tags;
pub mod study_logs;
pub mod tags;
pub mod users;
