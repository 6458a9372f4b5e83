pub use super::study_log_tags::Entity as StudyLogTags;
pub use super::study_logs::Entity as StudyLogs;
pub use super::tags::Entity as Tags;
pub use super::users::Entity as Users;
