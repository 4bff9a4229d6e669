use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};
use crate::shared::memory_store::MemoryTable;

/// Persistence for categories
///
/// Every lookup except `find_with_trashed` excludes soft-deleted rows.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, new: NewCategory) -> Result<Category>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;
    async fn find_with_trashed(&self, id: Uuid) -> Result<Option<Category>>;
    async fn list_active(&self) -> Result<Vec<Category>>;
    async fn update_fields(&self, id: Uuid, changes: CategoryChanges) -> Result<Option<Category>>;
    /// Returns false when no live row matched
    async fn soft_delete(&self, id: Uuid) -> Result<bool>;
}

const CATEGORY_COLUMNS: &str =
    "id, name, description, is_active, created_at, updated_at, deleted_at";

/// PostgreSQL-backed category repository
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, new: NewCategory) -> Result<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (id, name, description, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(Uuid::new_v4())
            .bind(&new.name)
            .bind(&new.description)
            .bind(new.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert category: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE id = $1 AND deleted_at IS NULL
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_with_trashed(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            WHERE deleted_at IS NULL
            ORDER BY created_at, id
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update_fields(&self, id: Uuid, changes: CategoryChanges) -> Result<Option<Category>> {
        // $3 flags whether description was provided at all, so an explicit
        // null can clear the column while an omitted one keeps it
        let query = format!(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let description_provided = changes.description.is_some();
        let description = changes.description.flatten();

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(description_provided)
            .bind(description)
            .bind(changes.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Category repository for the `memory` storage driver and tests
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    table: MemoryTable<Category>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, new: NewCategory) -> Result<Category> {
        Ok(self.table.insert(Category::from_new(new, Utc::now())).await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.table.find(id).await)
    }

    async fn find_with_trashed(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.table.find_with_trashed(id).await)
    }

    async fn list_active(&self) -> Result<Vec<Category>> {
        Ok(self.table.list_active().await)
    }

    async fn update_fields(&self, id: Uuid, changes: CategoryChanges) -> Result<Option<Category>> {
        Ok(self.table.update(id, |c| c.apply(changes)).await)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.table.soft_delete(id).await)
    }
}
