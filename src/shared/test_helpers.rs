use std::sync::Arc;

use axum_test::TestServer;
use fake::{faker::lorem::en::Word, Fake};
use sqlx::PgPool;

use crate::api_routes;
use crate::features::categories::{CategoryService, InMemoryCategoryRepository};
use crate::features::genres::{GenreService, InMemoryGenreRepository};

/// Full router over in-memory repositories, with handles to seed and inspect
/// the stores directly
pub struct TestApp {
    pub server: TestServer,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub genres: Arc<InMemoryGenreRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let genres = Arc::new(InMemoryGenreRepository::new());

        let router = api_routes(
            Arc::new(CategoryService::new(categories.clone())),
            Arc::new(GenreService::new(genres.clone())),
        );

        Self {
            server: TestServer::new(router).expect("failed to start test server"),
            categories,
            genres,
        }
    }
}

pub fn fake_name() -> String {
    Word().fake()
}

/// Migrated pool for the Postgres repository tests, from `DATABASE_URL`
pub async fn pg_pool() -> PgPool {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.expect("failed to connect");
    crate::core::database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}
