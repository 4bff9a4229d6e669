//! Category resource of the video catalog.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Success | Description |
//! |--------|----------|---------|-------------|
//! | GET | `/categories` | 200 | List categories that are not deleted |
//! | GET | `/categories/{id}` | 200 | Get a single category |
//! | POST | `/categories` | 201 | Create a category |
//! | PUT | `/categories/{id}` | 200 | Update a category |
//! | DELETE | `/categories/{id}` | 204 | Soft delete a category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, InMemoryCategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
