use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryPayloadDto, CategoryResponseDto};
use crate::features::categories::repositories::CategoryRepository;

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Category {} not found", id))
}

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// List all categories that are not soft-deleted
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repository.list_active().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| not_found(id))
    }

    /// Validate, apply defaults and insert
    pub async fn create(&self, dto: CategoryPayloadDto) -> Result<CategoryResponseDto> {
        dto.validate()?;

        let category = self.repository.insert(dto.into_new_category()).await?;
        tracing::info!("Category {} created", category.id);

        Ok(category.into())
    }

    /// Replace only the fields present in the payload
    ///
    /// The lookup happens before validation, so an unknown id is a 404 even
    /// with an invalid body.
    pub async fn update(&self, id: Uuid, dto: CategoryPayloadDto) -> Result<CategoryResponseDto> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        dto.validate()?;

        let category = self
            .repository
            .update_fields(id, dto.into_changes())
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Category {} updated", id);

        Ok(category.into())
    }

    /// Soft delete; the row stays in storage with `deleted_at` set
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Category {} deleted", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::NewCategory;
    use crate::features::categories::repositories::InMemoryCategoryRepository;
    use serde_json::{json, Value};

    fn setup() -> (CategoryService, Arc<InMemoryCategoryRepository>) {
        let repository = Arc::new(InMemoryCategoryRepository::new());
        (CategoryService::new(repository.clone()), repository)
    }

    fn payload(value: Value) -> CategoryPayloadDto {
        serde_json::from_value(value).unwrap()
    }

    async fn seed(repository: &InMemoryCategoryRepository, is_active: bool) -> Uuid {
        repository
            .insert(NewCategory {
                name: "seeded".to_string(),
                description: Some("description".to_string()),
                is_active,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (service, _) = setup();

        let category = service.create(payload(json!({"name": "test"}))).await.unwrap();

        assert_eq!(category.name, "test");
        assert!(category.is_active);
        assert_eq!(category.description, None);
        assert_eq!(category.deleted_at, None);
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_fields() {
        let (service, _) = setup();

        let category = service
            .create(payload(json!({
                "name": "test",
                "is_active": false,
                "description": "description"
            })))
            .await
            .unwrap();

        assert!(!category.is_active);
        assert_eq!(category.description.as_deref(), Some("description"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let (service, repository) = setup();

        let err = service.create(payload(json!({}))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(repository.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (service, repository) = setup();
        let id = seed(&repository, false).await;

        let category = service
            .update(
                id,
                payload(json!({"name": "test", "is_active": true, "description": "test"})),
            )
            .await
            .unwrap();

        assert_eq!(category.id, id);
        assert_eq!(category.name, "test");
        assert!(category.is_active);
        assert_eq!(category.description.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn test_update_description_clearing_and_omission() {
        let (service, repository) = setup();
        let id = seed(&repository, true).await;

        let kept = service
            .update(id, payload(json!({"name": "test"})))
            .await
            .unwrap();
        assert_eq!(kept.description.as_deref(), Some("description"));

        let cleared = service
            .update(id, payload(json!({"name": "test", "description": ""})))
            .await
            .unwrap();
        assert_eq!(cleared.description, None);

        service
            .update(id, payload(json!({"name": "test", "description": "test"})))
            .await
            .unwrap();
        let cleared = service
            .update(id, payload(json!({"name": "test", "description": null})))
            .await
            .unwrap();
        assert_eq!(cleared.description, None);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_before_validation() {
        let (service, _) = setup();

        let err = service
            .update(Uuid::new_v4(), payload(json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_requires_name() {
        let (service, repository) = setup();
        let id = seed(&repository, true).await;

        let err = service.update(id, payload(json!({}))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let (service, repository) = setup();
        let id = seed(&repository, true).await;

        service.delete(id).await.unwrap();

        assert!(matches!(service.get(id).await, Err(AppError::NotFound(_))));
        assert!(service.list().await.unwrap().is_empty());

        let trashed = repository.find_with_trashed(id).await.unwrap().unwrap();
        assert!(trashed.deleted_at.is_some());
        assert_eq!(trashed.name, "seeded");

        assert!(matches!(service.delete(id).await, Err(AppError::NotFound(_))));
    }
}
