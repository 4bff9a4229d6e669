use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::genres::{dtos as genres_dtos, handlers as genres_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Genres
        genres_handlers::list_genres,
        genres_handlers::get_genre,
        genres_handlers::create_genre,
        genres_handlers::update_genre,
        genres_handlers::delete_genre,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Categories
            categories_dtos::CategoryPayloadDto,
            categories_dtos::CategoryResponseDto,
            // Genres
            genres_dtos::GenrePayloadDto,
            genres_dtos::GenreResponseDto,
        )
    ),
    tags(
        (name = "categories", description = "Video categories"),
        (name = "genres", description = "Video genres"),
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Categories and genres of the video catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
