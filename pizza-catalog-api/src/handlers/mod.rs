pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{Router, response::Html, routing::get};
use pizza_catalog_service::serializer::{
    PizzaSummary, RestaurantDetail, RestaurantPizzaDetail, RestaurantPizzaWithPizza,
    RestaurantSummary,
};
use pizza_catalog_service::{CatalogError, CatalogService, DbPool};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiError;
use crate::models::*;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl AppState {
    /// Runs `f` against a pooled connection on the blocking thread pool.
    async fn with_catalog<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut CatalogService<'_>) -> Result<T, CatalogError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut CatalogService::new(&mut conn))
        })
        .await
        .map_err(|e| ApiError::InternalError(format!("catalog task failed: {e}")))?
        .map_err(ApiError::from)
    }
}

pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            RestaurantSummary,
            RestaurantDetail,
            RestaurantPizzaWithPizza,
            RestaurantPizzaDetail,
            PizzaSummary,
            CreateRestaurantPizzaRequest,
            ApiErrorResponse,
            ValidationErrorResponse,
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Restaurant menu endpoints")
    ),
    info(
        title = "Pizza Catalog API",
        description = "Restaurants, pizzas and what each restaurant charges for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
