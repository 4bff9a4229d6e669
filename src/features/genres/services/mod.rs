mod genre_service;

pub use genre_service::GenreService;
