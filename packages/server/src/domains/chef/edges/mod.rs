//! HTTP edges for the chef domain (`/chef/*`).

use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Multipart};
use axum::Json;

use crate::common::{ApiError, Reply};
use crate::domains::chef::actions;
use crate::domains::chef::models::MenuItem;
use crate::domains::chef::types::{ChefRegisterRequest, ImageUpload, MenuItemForm};
use crate::domains::identity::types::IdentityView;
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// `POST /chef/register`
pub async fn register(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<ChefRegisterRequest>, JsonRejection>,
) -> Result<Reply<IdentityView>, ApiError> {
    let Json(request) = payload?;
    let identity = actions::register_chef(request, &state.deps).await?;

    Ok(Reply::created(
        "Chef registered successfully. Please verify your phone number with OTP.",
        identity.view(),
    ))
}

/// `POST /chef/menu-items` (multipart; guarded for role `chef`)
pub async fn create_menu_item(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Reply<MenuItem>, ApiError> {
    let form = read_menu_item_form(multipart?).await?;
    let item = actions::create_menu_item(auth.user_id, form, &state.deps).await?;

    Ok(Reply::created("Menu item created successfully", item))
}

async fn read_menu_item_form(mut multipart: Multipart) -> Result<MenuItemForm, ApiError> {
    let mut form = MenuItemForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "itemName" => form.item_name = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "price" => form.price = Some(field.text().await?),
            "image" => form.image = Some(read_image(field).await?),
            // Unknown parts are ignored.
            _ => {}
        }
    }

    Ok(form)
}

async fn read_image(field: Field<'_>) -> Result<ImageUpload, ApiError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await?.to_vec();

    Ok(ImageUpload {
        file_name,
        content_type,
        bytes,
    })
}
