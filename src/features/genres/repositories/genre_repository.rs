use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::genres::models::{Genre, GenreChanges, NewGenre};
use crate::shared::memory_store::MemoryTable;

/// Persistence for genres
///
/// Every lookup except `find_with_trashed` excludes soft-deleted rows.
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn insert(&self, new: NewGenre) -> Result<Genre>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Genre>>;
    async fn find_with_trashed(&self, id: Uuid) -> Result<Option<Genre>>;
    async fn list_active(&self) -> Result<Vec<Genre>>;
    async fn update_fields(&self, id: Uuid, changes: GenreChanges) -> Result<Option<Genre>>;
    async fn soft_delete(&self, id: Uuid) -> Result<bool>;
}

const GENRE_COLUMNS: &str = "id, name, is_active, created_at, updated_at, deleted_at";

pub struct PgGenreRepository {
    pool: PgPool,
}

impl PgGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    async fn insert(&self, new: NewGenre) -> Result<Genre> {
        let query = format!(
            r#"
            INSERT INTO genres (id, name, is_active)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            GENRE_COLUMNS
        );

        sqlx::query_as::<_, Genre>(&query)
            .bind(Uuid::new_v4())
            .bind(&new.name)
            .bind(new.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert genre: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Genre>> {
        let query = format!(
            "SELECT {} FROM genres WHERE id = $1 AND deleted_at IS NULL",
            GENRE_COLUMNS
        );

        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get genre by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_with_trashed(&self, id: Uuid) -> Result<Option<Genre>> {
        let query = format!("SELECT {} FROM genres WHERE id = $1", GENRE_COLUMNS);

        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<Genre>> {
        let query = format!(
            r#"
            SELECT {}
            FROM genres
            WHERE deleted_at IS NULL
            ORDER BY created_at, id
            "#,
            GENRE_COLUMNS
        );

        sqlx::query_as::<_, Genre>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list genres: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update_fields(&self, id: Uuid, changes: GenreChanges) -> Result<Option<Genre>> {
        let query = format!(
            r#"
            UPDATE genres
            SET name = COALESCE($2, name),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            GENRE_COLUMNS
        );

        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update genre: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE genres
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete genre: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Default)]
pub struct InMemoryGenreRepository {
    table: MemoryTable<Genre>,
}

impl InMemoryGenreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenreRepository for InMemoryGenreRepository {
    async fn insert(&self, new: NewGenre) -> Result<Genre> {
        Ok(self.table.insert(Genre::from_new(new, Utc::now())).await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Genre>> {
        Ok(self.table.find(id).await)
    }

    async fn find_with_trashed(&self, id: Uuid) -> Result<Option<Genre>> {
        Ok(self.table.find_with_trashed(id).await)
    }

    async fn list_active(&self) -> Result<Vec<Genre>> {
        Ok(self.table.list_active().await)
    }

    async fn update_fields(&self, id: Uuid, changes: GenreChanges) -> Result<Option<Genre>> {
        Ok(self.table.update(id, |g| g.apply(changes)).await)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.table.soft_delete(id).await)
    }
}
