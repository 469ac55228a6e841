pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod service;

pub use config::{Config, UpdatePolicy};
pub use db::{init_db, DbSettings, Repository};
pub use domain::{Item, ItemFilter, ItemId};
pub use error::AppError;
pub use service::{ItemChanges, ItemService, ServiceError};
