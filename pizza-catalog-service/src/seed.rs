use diesel::{delete, insert_into, prelude::*, SqliteConnection};
use tracing::info;

use crate::error::CatalogError;
use crate::models::{self, NewPizza, NewRestaurant, NewRestaurantPizza};
use crate::schema;

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

/// (restaurant index, pizza index, price)
const MENU: [(usize, usize, i32); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, Default, PartialEq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Wipes the catalog and loads the sample data in one transaction.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, CatalogError> {
    conn.immediate_transaction::<_, CatalogError, _>(|conn| {
        delete(schema::restaurant_pizzas::table).execute(conn)?;
        delete(schema::restaurants::table).execute(conn)?;
        delete(schema::pizzas::table).execute(conn)?;

        // One row at a time: SQLite has no batch insert with RETURNING.
        let restaurants = RESTAURANTS
            .iter()
            .map(|(name, address)| {
                Ok(insert_into(schema::restaurants::table)
                    .values(NewRestaurant::new(name, address)?)
                    .returning(models::Restaurant::as_returning())
                    .get_result::<models::Restaurant>(conn)?)
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let pizzas = PIZZAS
            .iter()
            .map(|(name, ingredients)| {
                Ok(insert_into(schema::pizzas::table)
                    .values(NewPizza::new(name, ingredients)?)
                    .returning(models::Pizza::as_returning())
                    .get_result::<models::Pizza>(conn)?)
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let menu = MENU
            .iter()
            .map(|&(r, p, price)| NewRestaurantPizza {
                price,
                restaurant_id: restaurants[r].id,
                pizza_id: pizzas[p].id,
            })
            .collect::<Vec<_>>();
        let restaurant_pizzas = insert_into(schema::restaurant_pizzas::table)
            .values(&menu)
            .execute(conn)?;

        let summary = SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            restaurant_pizzas,
        };
        info!(?summary, "catalog seeded");
        Ok(summary)
    })
}
