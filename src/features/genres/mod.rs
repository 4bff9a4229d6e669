//! Genre resource of the video catalog. Same lifecycle as categories,
//! without a description.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{GenreRepository, InMemoryGenreRepository, PgGenreRepository};
pub use services::GenreService;
