use axum::{
    Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::Json,
    routing::get,
};
use pizza_restaurant_service::{StoreError, store};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

fn restaurant_not_found() -> ApiError {
    ApiError::NotFound(RESTAURANT_NOT_FOUND.to_string())
}

/// Non-integer ids cannot name a restaurant, so they are reported the same way
/// as unknown ones.
fn restaurant_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id).map_err(|_| restaurant_not_found())
}

fn lookup_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound => restaurant_not_found(),
        other => other.into(),
    }
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [RestaurantResponse]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let restaurants = state
        .with_connection(|conn| Ok(store::list_restaurants(conn)?))
        .await?;

    Ok(Json(
        restaurants
            .into_iter()
            .map(RestaurantResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its pizzas", body = RestaurantDetailResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<RestaurantDetailResponse>, ApiError> {
    let id = restaurant_id(path)?;

    let detail = state
        .with_connection(move |conn| store::restaurant_with_pizzas(conn, id).map_err(lookup_error))
        .await?;

    Ok(Json(detail.into()))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza prices deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = restaurant_id(path)?;

    state
        .with_connection(move |conn| store::delete_restaurant(conn, id).map_err(lookup_error))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
