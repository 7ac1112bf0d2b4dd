//! Plain-text rendering of listings, categories and the store header.

use ecam_core::{AssetUrls, Category, ProductSummary, StoreProfile};
use ecam_variant::{compute_display_price, format_usd};

pub fn render_cards(products: &[ProductSummary], assets: &AssetUrls) -> String {
    products
        .iter()
        .map(|product| {
            let price =
                compute_display_price(product.price, product.discount, product.discount_type);
            let mut line = format!(
                "#{} {}  {}",
                product.id,
                product.name,
                format_usd(price.final_price)
            );
            if let Some(original) = price.original {
                line.push_str(&format!("  (was {})", format_usd(original)));
            }
            if let Some(badge) = price.list_badge() {
                line.push_str(&format!("  [{badge}]"));
            }
            line.push_str(&format!(
                "\n    {}",
                assets.product_image(product.image.as_deref())
            ));
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_search(term: &str, products: &[ProductSummary], assets: &AssetUrls) -> String {
    if products.is_empty() {
        return format!("No Results for \"{term}\"");
    }
    let plural = if products.len() == 1 { "" } else { "s" };
    format!(
        "Search Results for \"{term}\"\nFound {} product{plural} matching your search\n\n{}",
        products.len(),
        render_cards(products, assets)
    )
}

pub fn render_categories(categories: &[Category]) -> String {
    let mut lines = Vec::new();
    for category in categories {
        lines.push(format!("{}  /collections/{}", category.name, category.id));
        for child in &category.children {
            lines.push(format!("  {}  /collections/{}", child.name, child.id));
        }
    }
    lines.join("\n")
}

pub fn render_store(store: &StoreProfile, assets: &AssetUrls) -> String {
    let mut lines = vec![
        store.name.clone(),
        format!("Logo: {}", assets.store_logo(store.logo.as_deref())),
    ];
    if let Some(phone) = &store.phone {
        lines.push(format!("Phone: {phone}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn assets() -> AssetUrls {
        AssetUrls::new("https://cdn.test/p", "https://cdn.test/s", "https://cdn.test/c")
    }

    fn summaries() -> Vec<ProductSummary> {
        serde_json::from_value(json!([
            { "id": 1, "name": "Lamp", "price": "40", "discount": "25", "discount_type": "percent", "image": "lamp.png" },
            { "id": 2, "name": "Desk", "price": "1500" }
        ]))
        .unwrap()
    }

    #[test]
    fn cards_show_discount_and_image() {
        let text = render_cards(&summaries(), &assets());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#1 Lamp  $30.00  (was $40.00)  [25% OFF]");
        assert_eq!(lines[1], "    https://cdn.test/p/lamp.png");
        assert_eq!(lines[2], "#2 Desk  $1,500.00");
    }

    #[test]
    fn search_headline_counts_results() {
        let text = render_search("la", &summaries(), &assets());
        assert!(text.starts_with("Search Results for \"la\"\nFound 2 products matching your search"));
        assert_eq!(render_search("zz", &[], &assets()), "No Results for \"zz\"");
    }

    #[test]
    fn categories_render_two_levels() {
        let categories: Vec<Category> = serde_json::from_value(json!([
            { "id": 1, "name": "Phones", "childes": [{ "id": 2, "name": "Android" }] }
        ]))
        .unwrap();
        assert_eq!(
            render_categories(&categories),
            "Phones  /collections/1\n  Android  /collections/2"
        );
    }

    #[test]
    fn store_falls_back_to_default_logo() {
        let store: StoreProfile =
            serde_json::from_value(json!({ "id": 7, "name": "eCam" })).unwrap();
        assert_eq!(render_store(&store, &assets()), "eCam\nLogo: /logo.png");
    }
}
