use crate::{
    db::WardrobeStore,
    error::AppResult,
    models::{Category, WardrobeItemInput},
};

/// Sample wardrobe used for demos and local development
pub fn demo_wardrobe() -> Vec<WardrobeItemInput> {
    use Category::*;

    let items: [(&str, Category, &str, &[&str]); 15] = [
        ("White Cotton T-Shirt", Top, "white", &["casual", "comfortable", "summer"]),
        ("Navy Blue Blazer", Outerwear, "navy", &["formal", "professional", "business"]),
        ("Grey Sweater", Top, "grey", &["casual", "comfortable", "winter"]),
        ("Black Polo Shirt", Top, "black", &["business-casual", "versatile"]),
        ("Red Cardigan", Outerwear, "red", &["casual", "comfortable", "winter"]),
        ("Blue Jeans", Bottom, "blue", &["casual", "comfortable", "versatile"]),
        ("Black Dress Pants", Bottom, "black", &["formal", "professional", "business"]),
        ("Khaki Chinos", Bottom, "khaki", &["business-casual", "versatile"]),
        ("Grey Slacks", Bottom, "grey", &["formal", "professional"]),
        ("White Sneakers", Shoes, "white", &["casual", "comfortable", "sporty"]),
        ("Black Oxford Shoes", Shoes, "black", &["formal", "professional", "business"]),
        ("Brown Loafers", Shoes, "brown", &["business-casual", "comfortable"]),
        ("Black Leather Belt", Accessory, "black", &["formal", "professional"]),
        ("Silver Watch", Accessory, "silver", &["versatile", "elegant"]),
        ("Blue Scarf", Accessory, "blue", &["casual", "winter", "stylish"]),
    ];

    items
        .into_iter()
        .map(|(name, category, color, tags)| WardrobeItemInput::new(name, category, color, tags))
        .collect()
}

/// Inserts the demo wardrobe when the store has no items
///
/// Returns the number of items inserted.
pub async fn seed_if_empty(store: &dyn WardrobeStore) -> AppResult<usize> {
    if !store.list_all().await?.is_empty() {
        tracing::info!("Wardrobe already populated, skipping seed");
        return Ok(0);
    }

    let items = demo_wardrobe();
    let count = items.len();
    for input in items {
        store.create(input).await?;
    }

    tracing::info!(count, "Seeded demo wardrobe");
    Ok(count)
}
