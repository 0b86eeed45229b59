use std::ops::RangeInclusive;

use diesel::prelude::*;

use crate::error::ValidationError;
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_RANGE: RangeInclusive<i32> = 1..=30;
pub const PIZZA_NAME_MAX_LEN: usize = 100;
pub const PIZZA_INGREDIENTS_MAX_LEN: usize = 200;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    name: String,
    address: String,
}

impl NewRestaurant {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza {
    name: String,
    ingredients: String,
}

impl NewPizza {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let ingredients = ingredients.into();
        check_len("name", &name, PIZZA_NAME_MAX_LEN)?;
        check_len("ingredients", &ingredients, PIZZA_INGREDIENTS_MAX_LEN)?;
        Ok(Self { name, ingredients })
    }
}

/// A priced pairing of a restaurant and a pizza.
///
/// Only [`NewRestaurantPizza::new`] can build one, so every value that reaches
/// an insert already has a price inside [`PRICE_RANGE`].
#[derive(Insertable, Debug, Clone, Copy, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(price: i32, restaurant_id: i32, pizza_id: i32) -> Result<Self, ValidationError> {
        let price = validate_price(price)?;
        Ok(Self {
            price,
            restaurant_id,
            pizza_id,
        })
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn restaurant_id(&self) -> i32 {
        self.restaurant_id
    }

    pub fn pizza_id(&self) -> i32 {
        self.pizza_id
    }
}

pub fn validate_price(price: i32) -> Result<i32, ValidationError> {
    if !PRICE_RANGE.contains(&price) {
        return Err(ValidationError::PriceOutOfRange(price));
    }
    Ok(price)
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
