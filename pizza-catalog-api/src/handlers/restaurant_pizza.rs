use axum::{
    Router, body::Bytes, extract::State, http::StatusCode, response::Json, routing::post,
};
use pizza_catalog_service::serializer::RestaurantPizzaDetail;
use pizza_catalog_service::validation::parse_payload;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

// The body is taken as raw bytes so that a missing or malformed payload is
// answered with the same validation error as an out-of-range price.
#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaDetail),
        (status = 400, description = "Validation errors", body = ValidationErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state, body))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RestaurantPizzaDetail>), ApiError> {
    let payload = parse_payload(&body).map_err(|reason| {
        info!(%reason, "request rejected");
        ApiError::ValidationFailed
    })?;

    let created = state
        .with_catalog(move |catalog| catalog.create_association(&payload))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
