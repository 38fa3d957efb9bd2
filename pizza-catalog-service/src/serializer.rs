//! Output shapes for each endpoint.
//!
//! Restaurant -> RestaurantPizza -> Restaurant (and the same through Pizza)
//! is a cycle, so every view names the fields it exposes and which nested
//! relations it expands. A back-reference left out of a view type cannot be
//! serialized at all.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PizzaSummary {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

/// An association seen from its restaurant: the pizza is expanded, the
/// restaurant back-reference is not.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RestaurantPizzaWithPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaWithPizza>,
}

/// A freshly created association. Both ends are expanded without their own
/// association lists.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RestaurantPizzaDetail {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

pub fn serialize_restaurant_summary(restaurant: &models::Restaurant) -> RestaurantSummary {
    RestaurantSummary {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
    }
}

pub fn serialize_pizza_summary(pizza: &models::Pizza) -> PizzaSummary {
    PizzaSummary {
        id: pizza.id,
        name: pizza.name.clone(),
        ingredients: pizza.ingredients.clone(),
    }
}

pub fn serialize_restaurant_detail(
    restaurant: &models::Restaurant,
    restaurant_pizzas: &[(models::RestaurantPizza, models::Pizza)],
) -> RestaurantDetail {
    RestaurantDetail {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
        restaurant_pizzas: restaurant_pizzas
            .iter()
            .filter(|(rp, _)| rp.restaurant_id == restaurant.id)
            .map(|(rp, pizza)| RestaurantPizzaWithPizza {
                id: rp.id,
                price: rp.price,
                pizza_id: rp.pizza_id,
                restaurant_id: rp.restaurant_id,
                pizza: serialize_pizza_summary(pizza),
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza_detail(
    restaurant_pizza: &models::RestaurantPizza,
    pizza: &models::Pizza,
    restaurant: &models::Restaurant,
) -> RestaurantPizzaDetail {
    RestaurantPizzaDetail {
        id: restaurant_pizza.id,
        price: restaurant_pizza.price,
        pizza_id: restaurant_pizza.pizza_id,
        restaurant_id: restaurant_pizza.restaurant_id,
        pizza: serialize_pizza_summary(pizza),
        restaurant: serialize_restaurant_summary(restaurant),
    }
}
