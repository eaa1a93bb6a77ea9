use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};

use crate::{
    AppState,
    entities::film,
    error::{AppError, AppResult},
    models::{CreatedBody, FilmRequest, MessageBody, UpdateFilmRequest},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/films", get(list_films).post(create_film).put(update_film))
        .route("/films/{id}", get(get_film).delete(delete_film))
        .with_state(state)
}

pub async fn list_films(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<film::Model>>> {
    let films = state.films.list_all().await.map_err(AppError::store("could not fetch films"))?;
    Ok(Json(films))
}

pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<film::Model>> {
    let id = parse_id(&id)?;
    let film = state.films.get_by_id(id).await.map_err(AppError::store("could not fetch film"))?;
    film.map(Json).ok_or(AppError::NotFound)
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FilmRequest>, JsonRejection>,
) -> AppResult<Json<CreatedBody>> {
    let Json(req) = body?;
    let fields = req.validate()?;

    let new_id = state.films.insert(fields).await?;
    tracing::debug!(id = new_id, "film created");

    Ok(Json(CreatedBody { message: "film created".to_string(), new_id }))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateFilmRequest>, JsonRejection>,
) -> AppResult<Json<MessageBody>> {
    let Json(req) = body?;
    let fields = req.film.validate()?;

    // No id can match no row.
    let Some(id) = req.id else {
        return Err(AppError::NotFound);
    };

    if state.films.update(id, fields).await? == 0 {
        return Err(AppError::NotFound);
    }
    tracing::debug!(id, "film updated");

    Ok(Json(MessageBody::new("film updated")))
}

pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageBody>> {
    let id = parse_id(&id)?;

    let removed = state.films.delete(id).await.map_err(AppError::store("could not delete film"))?;
    if removed == 0 {
        return Err(AppError::NotFound);
    }
    tracing::debug!(id, "film deleted");

    Ok(Json(MessageBody::new("film deleted")))
}

/// Ids that are not integers cannot match any row.
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| AppError::NotFound)
}
