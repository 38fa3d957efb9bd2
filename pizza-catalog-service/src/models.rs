use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::validation::{validate_name, ValidationError};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

impl NewRestaurant {
    pub fn new(name: &str, address: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name("name", name)?,
            address: address.to_string(),
        })
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

impl NewPizza {
    pub fn new(name: &str, ingredients: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name("name", name)?,
            ingredients: ingredients.to_string(),
        })
    }
}

/// A restaurant selling a pizza at a price.
///
/// Owned by its restaurant (rows go away with it), while the pizza is only
/// referenced.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// Validated, not yet persisted association. Only the validation module
/// builds one from request input.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}
