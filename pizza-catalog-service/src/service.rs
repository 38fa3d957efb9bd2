use diesel::{delete, insert_into, prelude::*, SqliteConnection};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::serializer::{
    serialize_pizza_summary, serialize_restaurant_detail, serialize_restaurant_pizza_detail,
    serialize_restaurant_summary, PizzaSummary, RestaurantDetail, RestaurantPizzaDetail,
    RestaurantSummary,
};
use crate::validation::{validate_association, RawAssociation};
use crate::{models, schema};

pub const RESTAURANT: &str = "Restaurant";

pub struct CatalogService<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> CatalogService<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn list_restaurants(&mut self) -> Result<Vec<RestaurantSummary>, CatalogError> {
        let restaurants = schema::restaurants::table
            .select(models::Restaurant::as_select())
            .order(schema::restaurants::id)
            .load::<models::Restaurant>(self.conn)?;

        Ok(restaurants.iter().map(serialize_restaurant_summary).collect())
    }

    pub fn get_restaurant(&mut self, restaurant_id: i32) -> Result<RestaurantDetail, CatalogError> {
        let restaurant = schema::restaurants::table
            .find(restaurant_id)
            .select(models::Restaurant::as_select())
            .first::<models::Restaurant>(self.conn)
            .optional()?
            .ok_or(CatalogError::NotFound(RESTAURANT))?;

        let restaurant_pizzas = models::RestaurantPizza::belonging_to(&restaurant)
            .inner_join(schema::pizzas::table)
            .select((
                models::RestaurantPizza::as_select(),
                models::Pizza::as_select(),
            ))
            .order(schema::restaurant_pizzas::id)
            .load::<(models::RestaurantPizza, models::Pizza)>(self.conn)?;

        Ok(serialize_restaurant_detail(&restaurant, &restaurant_pizzas))
    }

    pub fn list_pizzas(&mut self) -> Result<Vec<PizzaSummary>, CatalogError> {
        let pizzas = schema::pizzas::table
            .select(models::Pizza::as_select())
            .order(schema::pizzas::id)
            .load::<models::Pizza>(self.conn)?;

        Ok(pizzas.iter().map(serialize_pizza_summary).collect())
    }

    /// Removes the restaurant together with every association it owns.
    /// Pizzas are left alone.
    pub fn delete_restaurant(&mut self, restaurant_id: i32) -> Result<(), CatalogError> {
        self.conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            let restaurant = schema::restaurants::table
                .find(restaurant_id)
                .select(models::Restaurant::as_select())
                .first::<models::Restaurant>(conn)
                .optional()?
                .ok_or(CatalogError::NotFound(RESTAURANT))?;

            let removed = delete(models::RestaurantPizza::belonging_to(&restaurant)).execute(conn)?;
            delete(&restaurant).execute(conn)?;

            info!(restaurant_id, removed, "restaurant deleted");
            Ok(())
        })
    }

    /// Validates and stores a new association. Nothing is written unless
    /// every check passes and the insert commits.
    pub fn create_association(
        &mut self,
        raw: &RawAssociation,
    ) -> Result<RestaurantPizzaDetail, CatalogError> {
        self.conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            let new_restaurant_pizza = validate_association(conn, raw)?;

            let restaurant_pizza = insert_into(schema::restaurant_pizzas::table)
                .values(&new_restaurant_pizza)
                .returning(models::RestaurantPizza::as_returning())
                .get_result::<models::RestaurantPizza>(conn)?;

            let pizza = schema::pizzas::table
                .find(restaurant_pizza.pizza_id)
                .select(models::Pizza::as_select())
                .first::<models::Pizza>(conn)?;
            let restaurant = schema::restaurants::table
                .find(restaurant_pizza.restaurant_id)
                .select(models::Restaurant::as_select())
                .first::<models::Restaurant>(conn)?;

            debug!(id = restaurant_pizza.id, "restaurant pizza created");
            Ok(serialize_restaurant_pizza_detail(
                &restaurant_pizza,
                &pizza,
                &restaurant,
            ))
        })
    }
}
