pub mod categories;
pub mod genres;
