use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::memory_store::SoftDeletable;

/// Database model for genre
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewGenre {
    pub name: String,
    pub is_active: bool,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct GenreChanges {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl Genre {
    pub fn from_new(new: NewGenre, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn apply(&mut self, changes: GenreChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}

impl SoftDeletable for Genre {
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
