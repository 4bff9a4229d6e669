pub mod genre_handler;

pub use genre_handler::{
    __path_create_genre, __path_delete_genre, __path_get_genre, __path_list_genres,
    __path_update_genre, create_genre, delete_genre, get_genre, list_genres, update_genre,
};
