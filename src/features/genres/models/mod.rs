mod genre;

pub use genre::{Genre, GenreChanges, NewGenre};
