use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::genres::dtos::{GenrePayloadDto, GenreResponseDto};
use crate::features::genres::repositories::GenreRepository;

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Genre {} not found", id))
}

/// Service for genre operations
pub struct GenreService {
    repository: Arc<dyn GenreRepository>,
}

impl GenreService {
    pub fn new(repository: Arc<dyn GenreRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<GenreResponseDto>> {
        let genres = self.repository.list_active().await?;
        Ok(genres.into_iter().map(|g| g.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<GenreResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|g| g.into())
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: GenrePayloadDto) -> Result<GenreResponseDto> {
        dto.validate()?;

        let genre = self.repository.insert(dto.into_new_genre()).await?;
        tracing::info!("Genre {} created", genre.id);

        Ok(genre.into())
    }

    pub async fn update(&self, id: Uuid, dto: GenrePayloadDto) -> Result<GenreResponseDto> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        dto.validate()?;

        let genre = self
            .repository
            .update_fields(id, dto.into_changes())
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Genre {} updated", id);

        Ok(genre.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Genre {} deleted", id);

        Ok(())
    }
}
