//! Domain types for the to-do item service.
//!
//! This module provides:
//! - The `Item` entity and its `ItemId` primitive
//! - `ItemFilter` for completion-state listing
//! - Lenient boolean flag parsing for form values

pub mod flag;
pub mod item;

pub use flag::{parse_flag, FlagError};
pub use item::{Item, ItemFilter, ItemId, ItemIdParseError};
