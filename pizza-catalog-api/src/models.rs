use serde::Serialize;
use utoipa::ToSchema;

/// Body accepted by `POST /restaurant_pizzas`. Documentation only: the
/// handler reads the raw body so malformed input still gets the validation
/// error shape.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30 inclusive
    pub price: i64,
    /// Id of an existing pizza
    pub pizza_id: i64,
    /// Id of an existing restaurant
    pub restaurant_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Always `["validation errors"]`
    pub errors: Vec<String>,
}
