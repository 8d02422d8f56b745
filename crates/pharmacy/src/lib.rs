//! Medicine Order Desk Domain

/// Order composer aggregate
pub mod orders;

/// Medicine catalog
pub mod catalog;

/// External HTTP collaborator
pub mod backend;

/// Environment configuration
pub mod config;

/// User feedback
pub mod notifications;

/// Domain errors
pub mod errors;

pub use config::Config;
pub use errors::Error;
pub use notifications::{Notification, NotificationLevel};
