use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A row that carries its own id and soft-delete bookkeeping
pub trait SoftDeletable: Clone + Send + Sync {
    fn id(&self) -> Uuid;
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    fn mark_deleted(&mut self, at: DateTime<Utc>);
    fn touch(&mut self, at: DateTime<Utc>);

    fn is_trashed(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// In-process table backing the `memory` storage driver
///
/// Rows keep insertion order. Every read except `find_with_trashed` filters
/// out soft-deleted rows explicitly.
#[derive(Debug)]
pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: SoftDeletable> MemoryTable<T> {
    pub async fn insert(&self, row: T) -> T {
        self.rows.write().await.push(row.clone());
        row
    }

    pub async fn find(&self, id: Uuid) -> Option<T> {
        self.rows
            .read()
            .await
            .iter()
            .find(|r| r.id() == id && !r.is_trashed())
            .cloned()
    }

    pub async fn find_with_trashed(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn list_active(&self) -> Vec<T> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|r| !r.is_trashed())
            .cloned()
            .collect()
    }

    /// Apply `change` to a live row and refresh its `updated_at`
    pub async fn update<F>(&self, id: Uuid, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id && !r.is_trashed())?;
        change(row);
        row.touch(Utc::now());
        Some(row.clone())
    }

    /// Returns false when the row is missing or already trashed
    pub async fn soft_delete(&self, id: Uuid) -> bool {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.id() == id && !r.is_trashed()) {
            Some(row) => {
                let now = Utc::now();
                row.mark_deleted(now);
                row.touch(now);
                true
            }
            None => false,
        }
    }
}
