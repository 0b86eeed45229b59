use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use pizza_restaurant_service::models::{NewRestaurantPizza, validate_price};
use pizza_restaurant_service::{StoreError, ValidationError, store};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

const INVALID_REFERENCE: &str = "Invalid restaurant or pizza";

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

fn invalid_reference() -> ApiError {
    ApiError::Validation(vec![INVALID_REFERENCE.to_string()])
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pizza price created", body = RestaurantPizzaResponse),
        (status = 400, description = "Invalid price, unknown restaurant or pizza", body = ApiValidationErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaResponse>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(vec![e.body_text()]))?;

    let price = validate_price(payload.price.ok_or(ValidationError::Missing("price"))?)?;
    let (Some(restaurant_id), Some(pizza_id)) = (payload.restaurant_id, payload.pizza_id) else {
        return Err(invalid_reference());
    };
    let new_restaurant_pizza = NewRestaurantPizza::new(price, restaurant_id, pizza_id)?;

    let created = state
        .with_connection(move |conn| {
            store::create_restaurant_pizza(conn, &new_restaurant_pizza).map_err(|e| match e {
                StoreError::NotFound => invalid_reference(),
                other => ApiError::Validation(vec![other.to_string()]),
            })
        })
        .await
        .map_err(|e| match e {
            ApiError::InternalError(msg) => ApiError::Validation(vec![msg]),
            other => other,
        })?;
    info!(id = created.restaurant_pizza.id, "Created restaurant pizza");

    Ok((StatusCode::CREATED, Json(created.into())))
}
