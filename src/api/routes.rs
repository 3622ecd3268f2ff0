//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{
    create_product, delete_product, get_product, health_handler, list_products, update_product,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /products` - Full product listing (snapshot-cached)
/// - `POST /products` - Create a product (multipart form)
/// - `GET /products/:id` - Fetch one product
/// - `PUT /products/:id` - Update a product (multipart form)
/// - `DELETE /products/:id` - Delete a product
/// - `GET /health` - Health check endpoint
/// - `GET /images/*` - Static serving of the shared image directory
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Compression: gzip response bodies
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let image_dir = state.catalog.image_dir().to_path_buf();

    // Build router with all endpoints
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/health", get(health_handler))
        .nest_service("/images", ServeDir::new(image_dir))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
