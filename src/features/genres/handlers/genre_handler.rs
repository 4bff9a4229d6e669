use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, EntityId};
use crate::features::genres::dtos::{GenrePayloadDto, GenreResponseDto};
use crate::features::genres::services::GenreService;
use crate::shared::types::ErrorResponse;

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    responses(
        (status = 200, description = "List of genres", body = Vec<GenreResponseDto>),
    ),
    tag = "genres"
)]
pub async fn list_genres(
    State(service): State<Arc<GenreService>>,
) -> Result<Json<Vec<GenreResponseDto>>> {
    let genres = service.list().await?;
    Ok(Json(genres))
}

/// Get genre by id
#[utoipa::path(
    get,
    path = "/genres/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre found", body = GenreResponseDto),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    tag = "genres"
)]
pub async fn get_genre(
    State(service): State<Arc<GenreService>>,
    EntityId(id): EntityId,
) -> Result<Json<GenreResponseDto>> {
    let genre = service.get(id).await?;
    Ok(Json(genre))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres",
    request_body = GenrePayloadDto,
    responses(
        (status = 201, description = "Genre created", body = GenreResponseDto),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "genres"
)]
pub async fn create_genre(
    State(service): State<Arc<GenreService>>,
    AppJson(dto): AppJson<GenrePayloadDto>,
) -> Result<(StatusCode, Json<GenreResponseDto>)> {
    let genre = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Update a genre
#[utoipa::path(
    put,
    path = "/genres/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Genre ID")
    ),
    request_body = GenrePayloadDto,
    responses(
        (status = 200, description = "Genre updated", body = GenreResponseDto),
        (status = 404, description = "Genre not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "genres"
)]
pub async fn update_genre(
    State(service): State<Arc<GenreService>>,
    EntityId(id): EntityId,
    AppJson(dto): AppJson<GenrePayloadDto>,
) -> Result<Json<GenreResponseDto>> {
    let genre = service.update(id, dto).await?;
    Ok(Json(genre))
}

/// Delete a genre (soft delete)
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    ),
    tag = "genres"
)]
pub async fn delete_genre(
    State(service): State<Arc<GenreService>>,
    EntityId(id): EntityId,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::features::genres::models::NewGenre;
    use crate::features::genres::repositories::GenreRepository;
    use crate::shared::constants::{MSG_IS_ACTIVE_BOOLEAN, MSG_NAME_MAX, MSG_NAME_REQUIRED};
    use crate::shared::test_helpers::{fake_name, TestApp};

    async fn create_genre(app: &TestApp, is_active: bool) -> Uuid {
        app.genres
            .insert(NewGenre {
                name: fake_name(),
                is_active,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_index_and_show() {
        let app = TestApp::new();
        let id = create_genre(&app, true).await;

        let response = app.server.get("/genres").await;
        response.assert_status(StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["id"], json!(id));

        let response = app.server.get(&format!("/genres/{}", id)).await;
        response.assert_status(StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["id"], json!(id));
        assert!(body.get("description").is_none());
    }

    #[tokio::test]
    async fn test_invalidation_data() {
        let app = TestApp::new();

        let response = app.server.post("/genres").json(&json!({})).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["errors"]["name"], json!([MSG_NAME_REQUIRED]));
        assert!(body["errors"].get("is_active").is_none());

        let id = create_genre(&app, true).await;
        let response = app
            .server
            .put(&format!("/genres/{}", id))
            .json(&json!({"name": "a".repeat(256), "is_active": "a"}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["errors"]["name"], json!([MSG_NAME_MAX]));
        assert_eq!(body["errors"]["is_active"], json!([MSG_IS_ACTIVE_BOOLEAN]));
    }

    #[tokio::test]
    async fn test_null_is_active_is_rejected() {
        let app = TestApp::new();

        let response = app
            .server
            .post("/genres")
            .json(&json!({"name": "test", "is_active": null}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.json::<Value>()["errors"]["is_active"],
            json!([MSG_IS_ACTIVE_BOOLEAN])
        );

        let id = create_genre(&app, true).await;
        let response = app
            .server
            .put(&format!("/genres/{}", id))
            .json(&json!({"name": "test", "is_active": null}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(app.genres.find_by_id(id).await.unwrap().unwrap().is_active);
    }

    #[tokio::test]
    async fn test_store() {
        let app = TestApp::new();

        let response = app.server.post("/genres").json(&json!({"name": "test1"})).await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["is_active"], json!(true));

        let response = app
            .server
            .post("/genres")
            .json(&json!({"name": "test2", "is_active": false}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["is_active"], json!(false));
    }

    #[tokio::test]
    async fn test_update() {
        let app = TestApp::new();
        let id = create_genre(&app, false).await;

        let response = app
            .server
            .put(&format!("/genres/{}", id))
            .json(&json!({"name": "test", "is_active": true}))
            .await;

        response.assert_status(StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["name"], json!("test"));
        assert_eq!(body["is_active"], json!(true));

        let stored = app.genres.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "test");
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn test_delete() {
        let app = TestApp::new();
        let id = create_genre(&app, true).await;
        let path = format!("/genres/{}", id);

        app.server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

        app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        assert!(app.genres.find_by_id(id).await.unwrap().is_none());
        assert!(app.genres.find_with_trashed(id).await.unwrap().is_some());
    }
}
