//! Chef domain request types and menu item form validation.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::common::ApiError;
use crate::domains::identity::types::ProfileFields;

/// Upper bound on a chef bio, enforced here and by a table constraint.
pub const MAX_BIO_CHARS: usize = 2000;

/// `POST /chef/register` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefRegisterRequest {
    pub phone: String,
    pub bio: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// Image types accepted for menu items, with the extension they are stored
/// under. Anything else (SVG included) is rejected, since stored files are
/// served back from the API origin.
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

/// Uploaded image part of a menu item form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Extension for the stored object, derived from the declared content
    /// type only. The client's file name never picks it.
    pub fn extension(&self) -> Option<&'static str> {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(content_type, _)| *content_type == essence)
            .map(|(_, ext)| *ext)
    }
}

/// Raw multipart fields of `POST /chef/menu-items`.
#[derive(Debug, Clone, Default)]
pub struct MenuItemForm {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image: Option<ImageUpload>,
}

/// A form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidMenuItem {
    pub item_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: ImageUpload,
    /// Storage extension matching the image's content type
    pub extension: &'static str,
}

impl MenuItemForm {
    pub fn validate(self) -> Result<ValidMenuItem, ApiError> {
        let image = self
            .image
            .ok_or_else(|| ApiError::Validation("Image is required".to_string()))?;
        let extension = image.extension().ok_or_else(|| {
            ApiError::Validation(
                "Uploaded file must be a JPEG, PNG, WebP or GIF image".to_string(),
            )
        })?;
        if image.bytes.is_empty() {
            return Err(ApiError::Validation("Image is required".to_string()));
        }

        let item_name = self
            .item_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::Validation("Item name is required".to_string()))?;

        let price = self
            .price
            .as_deref()
            .map(str::trim)
            .and_then(|raw| Decimal::from_str(raw).ok())
            .filter(|p| !p.is_sign_negative())
            .ok_or_else(|| ApiError::Validation("Price must be a non-negative number".to_string()))?;

        let description = self
            .description
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(ValidMenuItem {
            item_name,
            description,
            price,
            image,
            extension,
        })
    }
}
