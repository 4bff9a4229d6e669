use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::genres::models::{Genre, GenreChanges, NewGenre};
use crate::shared::validation::{
    coerce_bool, normalize_name, present, validate_is_active, validate_name,
};

/// Request body for creating or updating a genre
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct GenrePayloadDto {
    #[validate(
        required(message = "The name field is required."),
        custom(function = "validate_name")
    )]
    #[schema(value_type = String, max_length = 255)]
    pub name: Option<Value>,

    /// Defaults to true on create when omitted; an explicit null is rejected
    #[serde(default, deserialize_with = "present")]
    #[validate(custom(function = "validate_is_active"))]
    #[schema(value_type = Option<bool>)]
    pub is_active: Option<Value>,
}

impl GenrePayloadDto {
    pub fn into_new_genre(self) -> NewGenre {
        NewGenre {
            name: self.name.as_ref().map(normalize_name).unwrap_or_default(),
            is_active: self.is_active.as_ref().and_then(coerce_bool).unwrap_or(true),
        }
    }

    pub fn into_changes(self) -> GenreChanges {
        GenreChanges {
            name: self.name.as_ref().map(normalize_name),
            is_active: self.is_active.as_ref().and_then(coerce_bool),
        }
    }
}

/// Response DTO for genre
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenreResponseDto {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Genre> for GenreResponseDto {
    fn from(g: Genre) -> Self {
        Self {
            id: g.id,
            name: g.name,
            is_active: g.is_active,
            created_at: g.created_at,
            updated_at: g.updated_at,
            deleted_at: g.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::MSG_NAME_REQUIRED;
    use serde_json::json;

    #[test]
    fn test_description_is_not_part_of_a_genre() {
        let dto: GenrePayloadDto =
            serde_json::from_value(json!({"name": "Drama", "description": "ignored"})).unwrap();
        assert!(dto.validate().is_ok());

        let genre = Genre::from_new(dto.into_new_genre(), Utc::now());
        let value = serde_json::to_value(GenreResponseDto::from(genre)).unwrap();

        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["created_at", "deleted_at", "id", "is_active", "name", "updated_at"]
        );
    }

    #[test]
    fn test_omitted_is_active_keeps_current_value() {
        let dto: GenrePayloadDto = serde_json::from_value(json!({"name": "Drama"})).unwrap();
        let changes = dto.into_changes();
        assert_eq!(changes.name.as_deref(), Some("Drama"));
        assert_eq!(changes.is_active, None);
    }

    #[test]
    fn test_required_message_matches_shared_constant() {
        let dto: GenrePayloadDto = serde_json::from_value(json!({"is_active": true})).unwrap();
        let messages = crate::core::error::field_messages(&dto.validate().unwrap_err());
        assert_eq!(messages.get("name"), Some(&vec![MSG_NAME_REQUIRED.to_string()]));
        assert!(!messages.contains_key("is_active"));
    }

    #[test]
    fn test_explicit_null_is_active_is_not_a_boolean() {
        let dto: GenrePayloadDto =
            serde_json::from_value(json!({"name": "Drama", "is_active": null})).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.keys().any(|k| *k == "is_active"));
    }

    #[test]
    fn test_invalid_genre_payload() {
        let dto: GenrePayloadDto =
            serde_json::from_value(json!({"name": "a".repeat(256), "is_active": "a"})).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
        assert!(fields.keys().any(|k| *k == "name"));
        assert!(fields.keys().any(|k| *k == "is_active"));
    }
}
