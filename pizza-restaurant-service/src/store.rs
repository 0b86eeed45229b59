//! Queries and mutations behind the HTTP endpoints.
//!
//! Every mutation runs inside a transaction, so a failing step leaves the
//! database untouched.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::error::StoreError;
use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

/// A restaurant together with its priced pizzas.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub restaurant_pizzas: Vec<(RestaurantPizza, Pizza)>,
}

/// A freshly created join row with both of its parents loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRestaurantPizza {
    pub restaurant_pizza: RestaurantPizza,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

pub fn list_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, StoreError> {
    Ok(restaurants::table
        .select(Restaurant::as_select())
        .order(restaurants::id.asc())
        .load(conn)?)
}

pub fn find_restaurant(conn: &mut SqliteConnection, id: i32) -> Result<Restaurant, StoreError> {
    Ok(restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)?)
}

pub fn restaurant_with_pizzas(
    conn: &mut SqliteConnection,
    id: i32,
) -> Result<RestaurantDetail, StoreError> {
    let restaurant = find_restaurant(conn, id)?;
    let restaurant_pizzas = RestaurantPizza::belonging_to(&restaurant)
        .inner_join(pizzas::table)
        .select((RestaurantPizza::as_select(), Pizza::as_select()))
        .order(restaurant_pizzas::id.asc())
        .load::<(RestaurantPizza, Pizza)>(conn)?;

    Ok(RestaurantDetail {
        restaurant,
        restaurant_pizzas,
    })
}

/// Pizzas offered by a restaurant, reached through its join rows.
pub fn pizzas_of_restaurant(
    conn: &mut SqliteConnection,
    restaurant: &Restaurant,
) -> Result<Vec<Pizza>, StoreError> {
    Ok(RestaurantPizza::belonging_to(restaurant)
        .inner_join(pizzas::table)
        .select(Pizza::as_select())
        .order(restaurant_pizzas::id.asc())
        .load(conn)?)
}

pub fn restaurant_pizzas_of(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<Vec<RestaurantPizza>, StoreError> {
    Ok(restaurant_pizzas::table
        .filter(restaurant_pizzas::restaurant_id.eq(restaurant_id))
        .select(RestaurantPizza::as_select())
        .order(restaurant_pizzas::id.asc())
        .load(conn)?)
}

/// Deletes a restaurant and every join row that references it.
pub fn delete_restaurant(conn: &mut SqliteConnection, id: i32) -> Result<(), StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let restaurant = find_restaurant(conn, id)?;
        diesel::delete(
            restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
        )
        .execute(conn)?;
        diesel::delete(&restaurant).execute(conn)?;
        Ok(())
    })
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, StoreError> {
    Ok(pizzas::table
        .select(Pizza::as_select())
        .order(pizzas::id.asc())
        .load(conn)?)
}

pub fn find_pizza(conn: &mut SqliteConnection, id: i32) -> Result<Pizza, StoreError> {
    Ok(pizzas::table
        .find(id)
        .select(Pizza::as_select())
        .first(conn)?)
}

pub fn insert_restaurant(
    conn: &mut SqliteConnection,
    restaurant: &NewRestaurant,
) -> Result<Restaurant, StoreError> {
    Ok(diesel::insert_into(restaurants::table)
        .values(restaurant)
        .returning(Restaurant::as_returning())
        .get_result(conn)?)
}

pub fn insert_pizza(conn: &mut SqliteConnection, pizza: &NewPizza) -> Result<Pizza, StoreError> {
    Ok(diesel::insert_into(pizzas::table)
        .values(pizza)
        .returning(Pizza::as_returning())
        .get_result(conn)?)
}

/// Inserts a join row after checking that both parents exist.
///
/// Returns [`StoreError::NotFound`] when either the restaurant or the pizza is
/// missing.
pub fn create_restaurant_pizza(
    conn: &mut SqliteConnection,
    new_restaurant_pizza: &NewRestaurantPizza,
) -> Result<CreatedRestaurantPizza, StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let restaurant = find_restaurant(conn, new_restaurant_pizza.restaurant_id())?;
        let pizza = find_pizza(conn, new_restaurant_pizza.pizza_id())?;

        let restaurant_pizza = diesel::insert_into(restaurant_pizzas::table)
            .values(new_restaurant_pizza)
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)?;

        Ok(CreatedRestaurantPizza {
            restaurant_pizza,
            pizza,
            restaurant,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn setup(conn: &mut SqliteConnection) -> (Restaurant, Pizza, Pizza) {
        let restaurant = insert_restaurant(
            conn,
            &NewRestaurant::new("Karen's Pizza Shack", "address1"),
        )
        .unwrap();
        let emma = insert_pizza(
            conn,
            &NewPizza::new("Emma", "Dough, Tomato Sauce, Cheese").unwrap(),
        )
        .unwrap();
        let geri = insert_pizza(
            conn,
            &NewPizza::new("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni").unwrap(),
        )
        .unwrap();
        (restaurant, emma, geri)
    }

    #[test]
    fn test_insert_assigns_ids() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let (restaurant, emma, geri) = setup(conn);

        assert!(restaurant.id > 0);
        assert_ne!(emma.id, geri.id);
        assert_eq!(list_restaurants(conn).unwrap(), vec![restaurant]);
        assert_eq!(list_pizzas(conn).unwrap(), vec![emma, geri]);
    }

    #[test]
    fn test_find_missing_restaurant() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        assert!(matches!(
            find_restaurant(conn, 999_999),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            restaurant_with_pizzas(conn, 999_999),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_create_restaurant_pizza() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let (restaurant, emma, _) = setup(conn);

        let created = create_restaurant_pizza(
            conn,
            &NewRestaurantPizza::new(15, restaurant.id, emma.id).unwrap(),
        )
        .unwrap();

        assert!(created.restaurant_pizza.id > 0);
        assert_eq!(created.restaurant_pizza.price, 15);
        assert_eq!(created.pizza, emma);
        assert_eq!(created.restaurant, restaurant);
    }

    #[test]
    fn test_create_restaurant_pizza_with_unknown_parent() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let (restaurant, emma, _) = setup(conn);

        let unknown_pizza = NewRestaurantPizza::new(10, restaurant.id, 999).unwrap();
        assert!(matches!(
            create_restaurant_pizza(conn, &unknown_pizza),
            Err(StoreError::NotFound)
        ));

        let unknown_restaurant = NewRestaurantPizza::new(10, 999, emma.id).unwrap();
        assert!(matches!(
            create_restaurant_pizza(conn, &unknown_restaurant),
            Err(StoreError::NotFound)
        ));

        assert!(restaurant_pizzas_of(conn, restaurant.id).unwrap().is_empty());
    }

    #[test]
    fn test_restaurant_with_pizzas() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let (restaurant, emma, geri) = setup(conn);

        for (price, pizza) in [(5, &emma), (12, &geri)] {
            create_restaurant_pizza(
                conn,
                &NewRestaurantPizza::new(price, restaurant.id, pizza.id).unwrap(),
            )
            .unwrap();
        }

        let detail = restaurant_with_pizzas(conn, restaurant.id).unwrap();
        assert_eq!(detail.restaurant, restaurant);
        assert_eq!(detail.restaurant_pizzas.len(), 2);
        assert_eq!(detail.restaurant_pizzas[0].0.price, 5);
        assert_eq!(detail.restaurant_pizzas[0].1, emma);
        assert_eq!(detail.restaurant_pizzas[1].1, geri);

        assert_eq!(
            pizzas_of_restaurant(conn, &restaurant).unwrap(),
            vec![emma, geri]
        );
    }

    #[test]
    fn test_delete_restaurant_removes_join_rows() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let (restaurant, emma, geri) = setup(conn);
        let other = insert_restaurant(conn, &NewRestaurant::new("Kiki's Pizza", "address3"))
            .unwrap();

        for (owner, pizza) in [(&restaurant, &emma), (&restaurant, &geri), (&other, &emma)] {
            create_restaurant_pizza(conn, &NewRestaurantPizza::new(9, owner.id, pizza.id).unwrap())
                .unwrap();
        }

        delete_restaurant(conn, restaurant.id).unwrap();

        assert!(restaurant_pizzas_of(conn, restaurant.id).unwrap().is_empty());
        assert_eq!(restaurant_pizzas_of(conn, other.id).unwrap().len(), 1);
        assert_eq!(list_restaurants(conn).unwrap(), vec![other]);
        // pizzas are not owned by restaurants
        assert_eq!(list_pizzas(conn).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_missing_restaurant() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        assert!(matches!(
            delete_restaurant(conn, 42),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_referenced_pizza_cannot_be_deleted() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let (restaurant, emma, geri) = setup(conn);
        create_restaurant_pizza(conn, &NewRestaurantPizza::new(7, restaurant.id, emma.id).unwrap())
            .unwrap();

        let result = diesel::delete(&emma).execute(conn);
        assert!(result.is_err());
        assert_eq!(diesel::delete(&geri).execute(conn).unwrap(), 1);
    }
}
