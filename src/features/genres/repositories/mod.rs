mod genre_repository;

pub use genre_repository::{GenreRepository, InMemoryGenreRepository, PgGenreRepository};
