//! Request DTOs for the catalog API
//!
//! Defines the product form submitted on the create and update routes and
//! its multipart parsing.

use axum::extract::Multipart;

use crate::error::{CatalogError, Result};
use crate::models::ProductFields;

/// An uploaded image file extracted from a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename as sent by the client, used only for its extension
    pub original_name: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

/// Form body for the create and update routes (POST/PUT /products).
///
/// # Fields
/// - `name`, `description`, `price`: text parts
/// - `image`: optional file part; when absent the stored image is left
///   untouched (update) or defaults to the placeholder (create)
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Optional uploaded image
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    /// Parses a product form from a multipart request body.
    ///
    /// Unknown parts are skipped. An `image` part with an empty body counts
    /// as "no upload" so that browser forms with an untouched file input
    /// behave like the field was omitted.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut name = None;
        let mut description = None;
        let mut price = None;
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| CatalogError::InvalidRequest(err.to_string()))?
        {
            match field.name().map(str::to_string).as_deref() {
                Some("name") => {
                    name = Some(read_text(field).await?);
                }
                Some("description") => {
                    description = Some(read_text(field).await?);
                }
                Some("price") => {
                    let raw = read_text(field).await?;
                    let parsed = raw.trim().parse::<f64>().map_err(|_| {
                        CatalogError::InvalidRequest(format!("Invalid price value: '{}'", raw))
                    })?;
                    price = Some(parsed);
                }
                Some("image") => {
                    let original_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|err| CatalogError::InvalidRequest(err.to_string()))?;
                    if !bytes.is_empty() {
                        image = Some(ImageUpload {
                            original_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }

        let name =
            name.ok_or_else(|| CatalogError::InvalidRequest("Missing field: name".to_string()))?;
        let price =
            price.ok_or_else(|| CatalogError::InvalidRequest("Missing field: price".to_string()))?;

        Ok(Self {
            name,
            description: description.unwrap_or_default(),
            price,
            image,
        })
    }

    /// Validates the form data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Some("Price must be a non-negative number".to_string());
        }
        None
    }

    /// The writable store columns of this form.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
        }
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|err| CatalogError::InvalidRequest(err.to_string()))
}
