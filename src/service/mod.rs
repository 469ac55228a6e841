//! Item service: existence checks and update merging above the repository.

pub mod merge;

use crate::config::UpdatePolicy;
use crate::db::Repository;
use crate::domain::{Item, ItemFilter, ItemId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub use merge::{apply_changes, ItemChanges};

#[derive(Clone)]
pub struct ItemService {
    repo: Arc<Repository>,
    policy: UpdatePolicy,
}

impl ItemService {
    pub fn new(repo: Arc<Repository>, policy: UpdatePolicy) -> Self {
        Self { repo, policy }
    }

    pub async fn get_item(&self, id: ItemId) -> Result<Item, ServiceError> {
        info!(id = %id, "Fetching item");
        self.require(id).await
    }

    pub async fn create_item(&self, description: &str) -> Result<Item, ServiceError> {
        info!(description = %description, "Adding new item");
        let item = self.repo.create(description).await?;
        Ok(item)
    }

    /// Merge `changes` into an existing item and persist it.
    ///
    /// A row deleted between the lookup and the save is reported as not found.
    pub async fn update_item(
        &self,
        id: ItemId,
        changes: &ItemChanges,
    ) -> Result<Item, ServiceError> {
        let mut item = self.require(id).await?;

        info!(
            id = %id,
            description = ?changes.description,
            completed = ?changes.completed,
            policy = ?self.policy,
            "Updating item"
        );
        apply_changes(&mut item, changes, self.policy)
            .map_err(|e| ServiceError::MalformedInput(e.to_string()))?;

        if !self.repo.save(&item).await? {
            warn!(id = %id, "Item vanished before update was saved");
            return Err(ServiceError::NotFound(id));
        }

        Ok(item)
    }

    pub async fn delete_item(&self, id: ItemId) -> Result<(), ServiceError> {
        info!(id = %id, "Deleting item");
        if !self.repo.delete(id).await? {
            warn!(id = %id, "Item not found in the database");
            return Err(ServiceError::NotFound(id));
        }
        Ok(())
    }

    pub async fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>, ServiceError> {
        info!(filter = %filter, "Listing items");
        let items = self.repo.find_all(filter).await?;
        Ok(items)
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.repo.ping().await?;
        Ok(())
    }

    async fn require(&self, id: ItemId) -> Result<Item, ServiceError> {
        match self.repo.find_by_id(id).await? {
            Some(item) => Ok(item),
            None => {
                warn!(id = %id, "Item not found in the database");
                Err(ServiceError::NotFound(id))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("item {0} not found")]
    NotFound(ItemId),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}
