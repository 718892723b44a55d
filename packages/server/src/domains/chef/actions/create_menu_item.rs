use tracing::{info, warn};
use uuid::Uuid;

use crate::common::{ApiError, UserId};
use crate::domains::chef::models::{MenuItem, NewMenuItem};
use crate::domains::chef::types::MenuItemForm;
use crate::kernel::ServerDeps;

/// Store the image, then persist the menu item for `chef_id`.
///
/// `chef_id` comes from the session token; the role check has already
/// happened in the guard. If the row cannot be written the stored image is
/// removed again.
pub async fn create_menu_item(
    chef_id: UserId,
    form: MenuItemForm,
    deps: &ServerDeps,
) -> Result<MenuItem, ApiError> {
    let valid = form.validate()?;

    let key = format!("menu-items/{}.{}", Uuid::new_v4(), valid.extension);
    let image_url = deps
        .image_storage
        .put_image(&key, &valid.image.content_type, valid.image.bytes)
        .await?;

    let created = deps
        .menu_items
        .create_menu_item(&NewMenuItem {
            chef_id,
            item_name: valid.item_name,
            description: valid.description,
            price: valid.price,
            image_url,
        })
        .await;

    let item = match created {
        Ok(item) => item,
        Err(e) => {
            if let Err(cleanup) = deps.image_storage.delete_image(&key).await {
                warn!(%key, error = %cleanup, "Failed to remove orphaned menu item image");
            }
            return Err(ApiError::Internal(e));
        }
    };

    info!(
        menu_item_id = %item.id,
        %chef_id,
        file_name = ?valid.image.file_name,
        "Menu item created"
    );
    Ok(item)
}
