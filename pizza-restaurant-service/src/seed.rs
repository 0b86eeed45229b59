use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::error::StoreError;
use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::store;

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// `(restaurant index, pizza index, price)`
const PRICES: [(usize, usize, i32); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces the contents of every table with a small fixed data set.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;

        let mut restaurants = Vec::with_capacity(RESTAURANTS.len());
        for (name, address) in RESTAURANTS {
            restaurants.push(store::insert_restaurant(conn, &NewRestaurant::new(name, address))?);
        }

        let mut pizzas = Vec::with_capacity(PIZZAS.len());
        for (name, ingredients) in PIZZAS {
            pizzas.push(store::insert_pizza(conn, &NewPizza::new(name, ingredients)?)?);
        }

        for (restaurant, pizza, price) in PRICES {
            let new_restaurant_pizza =
                NewRestaurantPizza::new(price, restaurants[restaurant].id, pizzas[pizza].id)?;
            store::create_restaurant_pizza(conn, &new_restaurant_pizza)?;
        }

        let summary = SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            restaurant_pizzas: PRICES.len(),
        };
        info!(?summary, "Seeded database");
        Ok(summary)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[test]
    fn test_seed() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        let summary = seed(conn).unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                restaurants: 3,
                pizzas: 3,
                restaurant_pizzas: 3
            }
        );

        let restaurants = store::list_restaurants(conn).unwrap();
        assert_eq!(restaurants[0].name, "Karen's Pizza Shack");
        let detail = store::restaurant_with_pizzas(conn, restaurants[1].id).unwrap();
        assert_eq!(detail.restaurant_pizzas.len(), 1);
        assert_eq!(detail.restaurant_pizzas[0].0.price, 4);
        assert_eq!(detail.restaurant_pizzas[0].1.name, "Geri");
    }

    #[test]
    fn test_seed_replaces_existing_rows() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        seed(conn).unwrap();
        seed(conn).unwrap();

        assert_eq!(store::list_restaurants(conn).unwrap().len(), 3);
        assert_eq!(store::list_pizzas(conn).unwrap().len(), 3);
    }
}
