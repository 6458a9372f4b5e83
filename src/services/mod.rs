pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod log_service;
pub mod log_service_impl;
pub use log_service::{LogError, LogService};
pub use log_service_impl::SeaOrmLogService;

pub mod tag_service;
pub mod tag_service_impl;
pub use tag_service::{TagError, TagService};
pub use tag_service_impl::SeaOrmTagService;
