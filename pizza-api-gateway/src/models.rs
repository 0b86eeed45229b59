use pizza_restaurant_service::models::{Pizza, Restaurant, RestaurantPizza};
use pizza_restaurant_service::store::{CreatedRestaurantPizza, RestaurantDetail};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Address of the restaurant
    pub address: String,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PizzaResponse {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Comma separated ingredients
    pub ingredients: String,
}

impl From<Pizza> for PizzaResponse {
    fn from(pizza: Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name,
            ingredients: pizza.ingredients,
        }
    }
}

/// A priced pizza listed under its restaurant. The restaurant itself is not
/// repeated.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaEntry {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaResponse,
}

impl From<(RestaurantPizza, Pizza)> for RestaurantPizzaEntry {
    fn from((restaurant_pizza, pizza): (RestaurantPizza, Pizza)) -> Self {
        Self {
            id: restaurant_pizza.id,
            price: restaurant_pizza.price,
            pizza_id: restaurant_pizza.pizza_id,
            restaurant_id: restaurant_pizza.restaurant_id,
            pizza: pizza.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetailResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

impl From<RestaurantDetail> for RestaurantDetailResponse {
    fn from(detail: RestaurantDetail) -> Self {
        Self {
            id: detail.restaurant.id,
            name: detail.restaurant.name,
            address: detail.restaurant.address,
            restaurant_pizzas: detail
                .restaurant_pizzas
                .into_iter()
                .map(RestaurantPizzaEntry::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30
    pub price: Option<i32>,
    pub pizza_id: Option<i32>,
    pub restaurant_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaResponse {
    pub id: i32,
    pub price: i32,
    pub pizza: PizzaResponse,
    pub pizza_id: i32,
    pub restaurant: RestaurantResponse,
    pub restaurant_id: i32,
}

impl From<CreatedRestaurantPizza> for RestaurantPizzaResponse {
    fn from(created: CreatedRestaurantPizza) -> Self {
        Self {
            id: created.restaurant_pizza.id,
            price: created.restaurant_pizza.price,
            pizza: created.pizza.into(),
            pizza_id: created.restaurant_pizza.pizza_id,
            restaurant: created.restaurant.into(),
            restaurant_id: created.restaurant_pizza.restaurant_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiValidationErrorResponse {
    /// Validation error messages
    pub errors: Vec<String>,
}
