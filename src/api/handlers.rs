//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. Read responses carry the
//! snapshot's cacheability hint as a `Cache-Control` header.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::catalog::CatalogService;
use crate::error::{CatalogError, Result};
use crate::models::{DeleteResponse, HealthResponse, Product, ProductForm, UpdateResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The catalog operations behind every route
    pub catalog: CatalogService,
}

impl AppState {
    /// Creates a new AppState with the given catalog service.
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

/// Handler for GET /products
///
/// Returns the full product listing, served from the snapshot cache while it
/// is fresh.
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let (products, hint) = state.catalog.list().await?;

    Ok((
        [(header::CACHE_CONTROL, hint.header_value())],
        Json(products),
    ))
}

/// Handler for GET /products/:id
///
/// Returns a single product, scanning the snapshot before the store.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let (product, hint) = state.catalog.get(id).await?;

    Ok((
        [(header::CACHE_CONTROL, hint.header_value())],
        Json(product),
    ))
}

/// Handler for POST /products
///
/// Accepts a multipart form with `name`, `description`, `price`, and an
/// optional `image` file. Returns the created product with its assigned id.
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Product>> {
    let form = ProductForm::from_multipart(multipart).await?;
    if let Some(error_msg) = form.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    let product = state.catalog.create(form).await?;
    Ok(Json(product))
}

/// Handler for PUT /products/:id
///
/// Same form as create; the stored image is only replaced when a new file
/// was uploaded.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<UpdateResponse>> {
    let form = ProductForm::from_multipart(multipart).await?;
    if let Some(error_msg) = form.validate() {
        return Err(CatalogError::InvalidRequest(error_msg));
    }

    state.catalog.update(id, form).await?;
    Ok(Json(UpdateResponse::new(id)))
}

/// Handler for DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    state.catalog.delete(id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
