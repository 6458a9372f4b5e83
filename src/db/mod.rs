use crate::config::{BootstrapConfig, SecurityConfig};
use crate::models::study_log::{NewStudyLog, Page, SearchFilter, StudyLog};
use crate::models::tag::{MoveDirection, Tag};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub mod migrator;
pub mod repositories;

pub use repositories::study_log::StudyLogChanges;
pub use repositories::tag::MoveOutcome;
pub use repositories::user::User;

/// Password seeded when no bootstrap password is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "password";

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            if !tokio::fs::try_exists(path_str).await.unwrap_or(false) {
                tokio::fs::File::create(path_str)
                    .await
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn tag_repo(&self) -> repositories::tag::TagRepository {
        repositories::tag::TagRepository::new(self.conn.clone())
    }

    fn study_log_repo(&self) -> repositories::study_log::StudyLogRepository {
        repositories::study_log::StudyLogRepository::new(self.conn.clone())
    }

    /// Seeds a single admin account when the users table is empty.
    /// Returns `true` if an account was created.
    pub async fn ensure_admin_user(
        &self,
        bootstrap: &BootstrapConfig,
        security: &SecurityConfig,
    ) -> Result<bool> {
        if self.user_repo().count().await? > 0 {
            return Ok(false);
        }

        let password = bootstrap
            .admin_password
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_PASSWORD);
        if password == DEFAULT_ADMIN_PASSWORD {
            warn!(
                "Seeding admin user '{}' with the default password; set ADMIN_PASSWORD",
                bootstrap.admin_username
            );
        }

        self.user_repo()
            .create(&bootstrap.admin_username, password, security)
            .await?;
        info!("Created admin user '{}'", bootstrap.admin_username);
        Ok(true)
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(username, password, security).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn update_user_password(
        &self,
        username: &str,
        new_password: &str,
        security: &SecurityConfig,
    ) -> Result<()> {
        self.user_repo()
            .update_password(username, new_password, security)
            .await
    }

    pub async fn get_tag(&self, id: i32) -> Result<Option<Tag>> {
        self.tag_repo().get(id).await
    }

    pub async fn count_tags(&self) -> Result<u64> {
        self.tag_repo().count().await
    }

    pub async fn list_tags_by_type(&self, tag_type: &str) -> Result<Vec<Tag>> {
        self.tag_repo().list_by_type(tag_type).await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.tag_repo().list_all().await
    }

    pub async fn create_tag(&self, name: &str, tag_type: &str) -> Result<Option<Tag>> {
        self.tag_repo().create(name, tag_type).await
    }

    pub async fn delete_tag(&self, id: i32) -> Result<bool> {
        self.tag_repo().delete(id).await
    }

    pub async fn move_tag(&self, id: i32, direction: MoveDirection) -> Result<MoveOutcome> {
        self.tag_repo().move_tag(id, direction).await
    }

    pub async fn create_study_log(&self, log: &NewStudyLog) -> Result<i32> {
        self.study_log_repo().create(log).await
    }

    pub async fn get_study_log(&self, id: i32) -> Result<Option<StudyLog>> {
        self.study_log_repo().get(id).await
    }

    pub async fn update_study_log(&self, id: i32, changes: StudyLogChanges) -> Result<bool> {
        self.study_log_repo().update(id, changes).await
    }

    pub async fn delete_study_log(&self, id: i32) -> Result<bool> {
        self.study_log_repo().delete(id).await
    }

    pub async fn search_study_logs(
        &self,
        filter: &SearchFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<StudyLog>> {
        self.study_log_repo().search(filter, page, page_size).await
    }

    pub async fn search_all_study_logs(&self, filter: &SearchFilter) -> Result<Vec<StudyLog>> {
        self.study_log_repo().search_all(filter).await
    }

    pub async fn recent_study_logs(&self, limit: u64) -> Result<Vec<StudyLog>> {
        self.study_log_repo().recent(limit).await
    }

    pub async fn study_logs_on(&self, dates: &[NaiveDate]) -> Result<Vec<StudyLog>> {
        self.study_log_repo().on_dates(dates).await
    }
}

/// File path behind a `sqlite:` URL, or `None` for in-memory databases.
#[must_use]
pub fn sqlite_file_path(db_url: &str) -> Option<&str> {
    if db_url.contains(":memory:") || db_url.contains("mode=memory") {
        return None;
    }

    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() { None } else { Some(path) }
}
