pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{Router, response::Html, response::Json, routing::get};
use diesel::SqliteConnection;
use pizza_restaurant_service::DbPool;
use utoipa::OpenApi;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs blocking Diesel work on a pooled connection off the async runtime.
    async fn with_connection<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| ApiError::InternalError(format!("Database unavailable: {e}")))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| ApiError::InternalError(format!("Database task failed: {e}")))?
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api-docs/openapi.json", get(openapi))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html("<h1>Welcome to the Pizza API</h1>")
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::models::RestaurantResponse,
            crate::models::RestaurantDetailResponse,
            crate::models::RestaurantPizzaEntry,
            crate::models::PizzaResponse,
            crate::models::CreateRestaurantPizzaRequest,
            crate::models::RestaurantPizzaResponse,
            crate::models::ApiErrorResponse,
            crate::models::ApiValidationErrorResponse,
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurants and their menus"),
        (name = "pizzas", description = "Pizza catalogue"),
        (name = "restaurant_pizzas", description = "Prices of pizzas at restaurants"),
    ),
    info(
        title = "Pizza API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
