use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryChanges, NewCategory};
use crate::shared::validation::{
    coerce_bool, normalize_description, normalize_name, present, validate_description,
    validate_is_active, validate_name,
};

/// Request body for creating or updating a category
///
/// Fields stay raw JSON until validated so wrongly typed values are reported
/// per field.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CategoryPayloadDto {
    #[validate(
        required(message = "The name field is required."),
        custom(function = "validate_name")
    )]
    #[schema(value_type = String, max_length = 255)]
    pub name: Option<Value>,

    /// Empty string or null clears the description
    #[serde(default, deserialize_with = "present")]
    #[validate(custom(function = "validate_description"))]
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,

    /// Defaults to true on create when omitted; an explicit null is rejected
    #[serde(default, deserialize_with = "present")]
    #[validate(custom(function = "validate_is_active"))]
    #[schema(value_type = Option<bool>)]
    pub is_active: Option<Value>,
}

impl CategoryPayloadDto {
    /// Normalized insert fields; call after `validate()`
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name.as_ref().map(normalize_name).unwrap_or_default(),
            description: self.description.as_ref().and_then(normalize_description),
            is_active: self.is_active.as_ref().and_then(coerce_bool).unwrap_or(true),
        }
    }

    /// Normalized partial update; omitted fields stay `None`
    pub fn into_changes(self) -> CategoryChanges {
        CategoryChanges {
            name: self.name.as_ref().map(normalize_name),
            description: self.description.as_ref().map(normalize_description),
            is_active: self.is_active.as_ref().and_then(coerce_bool),
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
            deleted_at: c.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::MSG_NAME_REQUIRED;
    use serde_json::json;

    fn payload(value: Value) -> CategoryPayloadDto {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    fn codes(dto: &CategoryPayloadDto, field: &str) -> Vec<String> {
        let errors = dto.validate().expect_err("payload should be invalid");
        errors
            .field_errors()
            .into_iter()
            .filter(|(name, _)| *name == field)
            .flat_map(|(_, errs)| errs.iter().map(|e| e.code.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_name_is_required_without_is_active_error() {
        let dto = payload(json!({}));
        assert_eq!(codes(&dto, "name"), vec!["required"]);
        assert!(codes(&dto, "is_active").is_empty());
    }

    #[test]
    fn test_required_message_matches_shared_constant() {
        let errors = payload(json!({})).validate().unwrap_err();
        let messages = crate::core::error::field_messages(&errors);
        assert_eq!(messages.get("name"), Some(&vec![MSG_NAME_REQUIRED.to_string()]));

        let errors = payload(json!({"name": " "})).validate().unwrap_err();
        let messages = crate::core::error::field_messages(&errors);
        assert_eq!(messages.get("name"), Some(&vec![MSG_NAME_REQUIRED.to_string()]));
    }

    #[test]
    fn test_explicit_null_is_active_is_not_a_boolean() {
        let dto = payload(json!({"name": "test", "is_active": null}));
        assert_eq!(dto.is_active, Some(Value::Null));
        assert_eq!(codes(&dto, "is_active"), vec!["boolean"]);

        assert!(payload(json!({"name": "test"})).validate().is_ok());
    }

    #[test]
    fn test_null_and_blank_name_are_required() {
        assert_eq!(codes(&payload(json!({"name": null})), "name"), vec!["required"]);
        assert_eq!(codes(&payload(json!({"name": ""})), "name"), vec!["required"]);
    }

    #[test]
    fn test_too_long_name_and_bad_boolean() {
        let dto = payload(json!({"name": "a".repeat(256), "is_active": "a"}));
        assert_eq!(codes(&dto, "name"), vec!["max_length"]);
        assert_eq!(codes(&dto, "is_active"), vec!["boolean"]);
    }

    #[test]
    fn test_non_string_description_is_rejected() {
        let dto = payload(json!({"name": "test", "description": 12}));
        assert_eq!(codes(&dto, "description"), vec!["string"]);
    }

    #[test]
    fn test_defaults_on_create() {
        let dto = payload(json!({"name": "test"}));
        assert!(dto.validate().is_ok());

        let new = dto.into_new_category();
        assert_eq!(new.name, "test");
        assert_eq!(new.description, None);
        assert!(new.is_active);
    }

    #[test]
    fn test_boolean_like_values_are_coerced() {
        let new = payload(json!({"name": "test", "is_active": "0"})).into_new_category();
        assert!(!new.is_active);

        let new = payload(json!({"name": "test", "is_active": 1})).into_new_category();
        assert!(new.is_active);
    }

    #[test]
    fn test_description_presence_is_tracked() {
        let omitted = payload(json!({"name": "test"})).into_changes();
        assert_eq!(omitted.description, None);

        let null = payload(json!({"name": "test", "description": null})).into_changes();
        assert_eq!(null.description, Some(None));

        let empty = payload(json!({"name": "test", "description": ""})).into_changes();
        assert_eq!(empty.description, Some(None));

        let text = payload(json!({"name": "test", "description": "test"})).into_changes();
        assert_eq!(text.description, Some(Some("test".to_string())));
    }

    #[test]
    fn test_response_has_every_model_field() {
        let category = Category::from_new(
            NewCategory {
                name: "test".to_string(),
                description: None,
                is_active: true,
            },
            Utc::now(),
        );
        let value = serde_json::to_value(CategoryResponseDto::from(category)).unwrap();

        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "created_at",
                "deleted_at",
                "description",
                "id",
                "is_active",
                "name",
                "updated_at"
            ]
        );
    }
}
