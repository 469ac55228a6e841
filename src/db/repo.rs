//! Repository layer over the `items` table.

use crate::domain::{Item, ItemFilter, ItemId};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

/// Repository for item persistence.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Close the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Lightweight connectivity probe.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a new, incomplete item and return it with its generated id.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn create(&self, description: &str) -> Result<Item, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO items (description, completed)
            VALUES (?, 0)
            RETURNING id, description, completed
            "#,
        )
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(item_from_row(&row))
    }

    /// Fetch a single item by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, sqlx::Error> {
        let row = sqlx::query("SELECT id, description, completed FROM items WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(item_from_row))
    }

    /// Fetch all items matching the filter, in insertion order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_all(&self, filter: ItemFilter) -> Result<Vec<Item>, sqlx::Error> {
        let rows = match filter.completed() {
            Some(completed) => {
                sqlx::query(
                    r#"
                    SELECT id, description, completed
                    FROM items
                    WHERE completed = ?
                    ORDER BY id ASC
                    "#,
                )
                .bind(completed)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT id, description, completed FROM items ORDER BY id ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.iter().map(item_from_row).collect())
    }

    /// Overwrite the mutable fields of an existing item.
    ///
    /// Returns `false` when no row with the item's id exists anymore.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn save(&self, item: &Item) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE items SET description = ?, completed = ? WHERE id = ?")
            .bind(item.description.as_str())
            .bind(item.completed)
            .bind(item.id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an item by id.
    ///
    /// Returns `false` when there was nothing to delete.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub async fn delete(&self, id: ItemId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn item_from_row(row: &SqliteRow) -> Item {
    Item {
        id: ItemId::new(row.get("id")),
        description: row.get("description"),
        completed: row.get("completed"),
    }
}
