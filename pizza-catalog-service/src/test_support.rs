use diesel::{insert_into, prelude::*, SqliteConnection};

use crate::models::{NewPizza, NewRestaurant, Pizza, Restaurant};
use crate::{build_pool, run_migrations, schema, DbConnection, DbPool};

pub fn connection() -> DbConnection {
    let pool = build_pool(":memory:", 1).unwrap();
    let mut conn = pool.get().unwrap();
    run_migrations(&mut conn).unwrap();
    conn
}

/// Multi-connection pool over a database file, for tests that need writers
/// on separate connections. Keep the returned directory alive.
pub fn file_pool(max_size: u32) -> (tempfile::TempDir, DbPool) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let pool = build_pool(path.to_str().unwrap(), max_size).unwrap();
    run_migrations(&mut pool.get().unwrap()).unwrap();
    (dir, pool)
}

pub fn insert_restaurant(conn: &mut SqliteConnection, name: &str, address: &str) -> Restaurant {
    insert_into(schema::restaurants::table)
        .values(NewRestaurant::new(name, address).unwrap())
        .returning(Restaurant::as_returning())
        .get_result(conn)
        .unwrap()
}

pub fn insert_pizza(conn: &mut SqliteConnection, name: &str, ingredients: &str) -> Pizza {
    insert_into(schema::pizzas::table)
        .values(NewPizza::new(name, ingredients).unwrap())
        .returning(Pizza::as_returning())
        .get_result(conn)
        .unwrap()
}
