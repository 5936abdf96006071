use super::{catalog_id, open_store};
use crate::config::Config;
use crate::services::CatalogStore;

pub async fn cmd_remove_item(config: &Config, raw_id: i32) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let id = catalog_id(raw_id)?;

    if let Some(item) = store.get_by_id(id).await? {
        println!("Remove '{}' (ID: {}) from the catalog?", item.title, item.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if input.trim().eq_ignore_ascii_case("y") {
            if store.remove_item(id).await? {
                println!("✓ Removed: {}", item.title);
            } else {
                println!("Failed to remove item.");
            }
        } else {
            println!("Cancelled.");
        }
    } else {
        println!("Catalog item with ID {id} not found.");
    }

    Ok(())
}
