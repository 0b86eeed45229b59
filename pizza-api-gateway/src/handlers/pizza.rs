use axum::{Router, extract::State, response::Json, routing::get};
use pizza_restaurant_service::store;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [PizzaResponse]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaResponse>>, ApiError> {
    let pizzas = state
        .with_connection(|conn| Ok(store::list_pizzas(conn)?))
        .await?;

    Ok(Json(pizzas.into_iter().map(PizzaResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::testing::{fixture, get, send};

    #[tokio::test]
    async fn test_list_pizzas() {
        let fixture = fixture();

        let (status, body) = send(&fixture.app, get("/pizzas")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {
                    "id": fixture.pizza_id,
                    "name": "Geri",
                    "ingredients": "Dough, Tomato Sauce, Cheese, Pepperoni",
                },
                {
                    "id": fixture.other_pizza_id,
                    "name": "Melanie",
                    "ingredients": "Dough, Sauce, Ricotta, Red peppers, Mustard",
                },
            ])
        );
    }
}
