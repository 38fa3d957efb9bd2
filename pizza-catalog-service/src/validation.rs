use std::ops::RangeInclusive;

use diesel::{dsl::exists, prelude::*, select, SqliteConnection};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::CatalogError;
use crate::models::NewRestaurantPizza;
use crate::schema::{pizzas, restaurants};

/// Accepted price for a restaurant pizza, inclusive on both ends.
/// The `restaurant_pizzas` table carries the same bound as a CHECK.
pub const PRICE_RANGE: RangeInclusive<i64> = 1..=30;

/// Reasons a write is rejected. Callers outside the service only ever see
/// the generic "validation errors" shape; the variant is for logs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("payload is empty or not a JSON object")]
    EmptyPayload,
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a whole number")]
    NotNumeric(&'static str),
    #[error("price {0} is outside {start}..={end}", start = PRICE_RANGE.start(), end = PRICE_RANGE.end())]
    PriceOutOfRange(i64),
    #[error("{0} must be a positive id")]
    InvalidId(&'static str),
    #[error("restaurant {0} does not exist")]
    UnknownRestaurant(i32),
    #[error("pizza {0} does not exist")]
    UnknownPizza(i32),
    #[error("{0} must not be empty")]
    Blank(&'static str),
    #[error("store rejected the write ({kind}): {message}")]
    Integrity { kind: String, message: String },
}

/// Association creation input exactly as the client sent it.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct RawAssociation {
    pub price: Option<Value>,
    pub pizza_id: Option<Value>,
    pub restaurant_id: Option<Value>,
}

#[cfg(test)]
impl RawAssociation {
    pub fn new(price: i64, restaurant_id: i64, pizza_id: i64) -> Self {
        Self {
            price: Some(Value::from(price)),
            pizza_id: Some(Value::from(pizza_id)),
            restaurant_id: Some(Value::from(restaurant_id)),
        }
    }
}

/// Well-formed association fields whose references are not checked yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssociationCandidate {
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

pub fn parse_payload(body: &[u8]) -> Result<RawAssociation, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ValidationError::EmptyPayload)?;
    match value {
        Value::Object(map) if !map.is_empty() => serde_json::from_value(Value::Object(map))
            .map_err(|_| ValidationError::EmptyPayload),
        _ => Err(ValidationError::EmptyPayload),
    }
}

pub fn validate_fields(raw: &RawAssociation) -> Result<AssociationCandidate, ValidationError> {
    let price = whole_number("price", raw.price.as_ref())?;
    if !PRICE_RANGE.contains(&price) {
        return Err(ValidationError::PriceOutOfRange(price));
    }

    Ok(AssociationCandidate {
        // The range check above keeps this in i32.
        price: price as i32,
        restaurant_id: id("restaurant_id", raw.restaurant_id.as_ref())?,
        pizza_id: id("pizza_id", raw.pizza_id.as_ref())?,
    })
}

/// Checks fields and foreign keys. Run it inside the same transaction as the
/// insert so the referenced rows cannot vanish in between.
pub fn validate_association(
    conn: &mut SqliteConnection,
    raw: &RawAssociation,
) -> Result<NewRestaurantPizza, CatalogError> {
    let candidate = validate_fields(raw)?;

    let restaurant_exists = select(exists(
        restaurants::table.filter(restaurants::id.eq(candidate.restaurant_id)),
    ))
    .get_result::<bool>(conn)?;
    if !restaurant_exists {
        return Err(ValidationError::UnknownRestaurant(candidate.restaurant_id).into());
    }

    let pizza_exists = select(exists(
        pizzas::table.filter(pizzas::id.eq(candidate.pizza_id)),
    ))
    .get_result::<bool>(conn)?;
    if !pizza_exists {
        return Err(ValidationError::UnknownPizza(candidate.pizza_id).into());
    }

    Ok(NewRestaurantPizza {
        price: candidate.price,
        restaurant_id: candidate.restaurant_id,
        pizza_id: candidate.pizza_id,
    })
}

pub fn validate_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(trimmed.to_string())
}

fn whole_number(field: &'static str, value: Option<&Value>) -> Result<i64, ValidationError> {
    let number = match value {
        None | Some(Value::Null) => return Err(ValidationError::Missing(field)),
        Some(Value::Number(number)) => number,
        Some(_) => return Err(ValidationError::NotNumeric(field)),
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(ValidationError::NotNumeric(field)),
    }
}

fn id(field: &'static str, value: Option<&Value>) -> Result<i32, ValidationError> {
    let n = whole_number(field, value)?;
    i32::try_from(n)
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ValidationError::InvalidId(field))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{connection, insert_pizza, insert_restaurant};

    fn raw(value: Value) -> RawAssociation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_payload_rejects_empty_bodies() {
        assert_eq!(parse_payload(b""), Err(ValidationError::EmptyPayload));
        assert_eq!(parse_payload(b"{}"), Err(ValidationError::EmptyPayload));
        assert_eq!(parse_payload(b"null"), Err(ValidationError::EmptyPayload));
        assert_eq!(parse_payload(b"[1, 2]"), Err(ValidationError::EmptyPayload));
        assert_eq!(parse_payload(b"{\"price\":"), Err(ValidationError::EmptyPayload));
    }

    #[test]
    fn test_parse_payload_keeps_raw_values() {
        let parsed = parse_payload(br#"{"price": "5", "pizza_id": 1}"#).unwrap();
        assert_eq!(parsed.price, Some(json!("5")));
        assert_eq!(parsed.pizza_id, Some(json!(1)));
        assert_eq!(parsed.restaurant_id, None);
    }

    #[test]
    fn test_validate_fields_accepts_bounds() {
        for price in [1, 30] {
            let candidate = validate_fields(&RawAssociation::new(price, 2, 3)).unwrap();
            assert_eq!(candidate.price as i64, price);
            assert_eq!(candidate.restaurant_id, 2);
            assert_eq!(candidate.pizza_id, 3);
        }
    }

    #[test]
    fn test_validate_fields_accepts_whole_floats() {
        let candidate =
            validate_fields(&raw(json!({"price": 5.0, "pizza_id": 1, "restaurant_id": 1})))
                .unwrap();
        assert_eq!(candidate.price, 5);
    }

    #[test]
    fn test_validate_fields_rejects_out_of_range_price() {
        for price in [0, 31, 999, -4] {
            assert_eq!(
                validate_fields(&RawAssociation::new(price, 1, 1)),
                Err(ValidationError::PriceOutOfRange(price))
            );
        }
    }

    #[test]
    fn test_validate_fields_rejects_bad_price_shapes() {
        assert_eq!(
            validate_fields(&raw(json!({"pizza_id": 1, "restaurant_id": 1}))),
            Err(ValidationError::Missing("price"))
        );
        assert_eq!(
            validate_fields(&raw(json!({"price": null, "pizza_id": 1, "restaurant_id": 1}))),
            Err(ValidationError::Missing("price"))
        );
        assert_eq!(
            validate_fields(&raw(json!({"price": "5", "pizza_id": 1, "restaurant_id": 1}))),
            Err(ValidationError::NotNumeric("price"))
        );
        assert_eq!(
            validate_fields(&raw(json!({"price": 5.5, "pizza_id": 1, "restaurant_id": 1}))),
            Err(ValidationError::NotNumeric("price"))
        );
        assert_eq!(
            validate_fields(&raw(json!({"price": true, "pizza_id": 1, "restaurant_id": 1}))),
            Err(ValidationError::NotNumeric("price"))
        );
    }

    #[test]
    fn test_validate_fields_rejects_bad_ids() {
        assert_eq!(
            validate_fields(&raw(json!({"price": 5, "pizza_id": 1}))),
            Err(ValidationError::Missing("restaurant_id"))
        );
        assert_eq!(
            validate_fields(&raw(json!({"price": 5, "pizza_id": 0, "restaurant_id": 1}))),
            Err(ValidationError::InvalidId("pizza_id"))
        );
        assert_eq!(
            validate_fields(&raw(json!({"price": 5, "pizza_id": 1, "restaurant_id": 1e12}))),
            Err(ValidationError::InvalidId("restaurant_id"))
        );
        assert_eq!(
            validate_fields(&raw(json!({"price": 5, "pizza_id": "1", "restaurant_id": 1}))),
            Err(ValidationError::NotNumeric("pizza_id"))
        );
    }

    #[test]
    fn test_validate_association_checks_references() {
        let mut conn = connection();
        let restaurant = insert_restaurant(&mut conn, "Karen's Pizza Shack", "address1");
        let pizza = insert_pizza(&mut conn, "Emma", "Dough, Tomato Sauce, Cheese");

        let valid =
            validate_association(&mut conn, &RawAssociation::new(5, restaurant.id as i64, pizza.id as i64))
                .unwrap();
        assert_eq!(
            valid,
            NewRestaurantPizza {
                price: 5,
                restaurant_id: restaurant.id,
                pizza_id: pizza.id,
            }
        );

        let missing_restaurant =
            validate_association(&mut conn, &RawAssociation::new(5, 999, pizza.id as i64));
        assert!(matches!(
            missing_restaurant,
            Err(CatalogError::Validation(ValidationError::UnknownRestaurant(999)))
        ));

        let missing_pizza =
            validate_association(&mut conn, &RawAssociation::new(5, restaurant.id as i64, 999));
        assert!(matches!(
            missing_pizza,
            Err(CatalogError::Validation(ValidationError::UnknownPizza(999)))
        ));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "  Emma "), Ok("Emma".to_string()));
        assert_eq!(validate_name("name", "   "), Err(ValidationError::Blank("name")));
    }
}
