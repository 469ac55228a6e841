//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization with startup retry and table creation
//! - SQLite pragma configuration
//! - Repository layer over the `items` table

pub mod migrations;
pub mod repo;

pub use migrations::{init_db, DbSettings};
pub use repo::Repository;
