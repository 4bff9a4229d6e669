use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::memory_store::SoftDeletable;

/// Database model for category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Validated, normalized fields for a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Partial update; `None` leaves the column untouched.
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Category {
    pub fn from_new(new: NewCategory, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn apply(&mut self, changes: CategoryChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}

impl SoftDeletable for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Category {
        Category::from_new(
            NewCategory {
                name: "Documentary".to_string(),
                description: Some("description".to_string()),
                is_active: false,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_apply_only_touches_provided_fields() {
        let mut category = sample();
        let id = category.id;

        category.apply(CategoryChanges {
            is_active: Some(true),
            ..Default::default()
        });

        assert_eq!(category.id, id);
        assert_eq!(category.name, "Documentary");
        assert_eq!(category.description.as_deref(), Some("description"));
        assert!(category.is_active);
    }

    #[test]
    fn test_apply_can_clear_description() {
        let mut category = sample();
        category.apply(CategoryChanges {
            description: Some(None),
            ..Default::default()
        });
        assert_eq!(category.description, None);
    }
}
