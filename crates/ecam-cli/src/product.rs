//! The `product` subcommand: a product page in the terminal.

use std::io;

use ecam_catalog::CatalogClient;
use ecam_core::{AppConfig, AssetUrls};
use ecam_variant::{
    format_usd, load_variant_page, product_page_path, GalleryItem, PageLifetime, PageLoad,
    QueryEcho, QueryParams, ShareOutcome, VariantSession,
};

use crate::sinks::{WriterClipboard, WriterOpener};

#[derive(Debug)]
pub struct ProductRequest {
    pub slug: String,
    pub selections: Vec<(String, String)>,
    pub share: bool,
    pub messenger: bool,
}

pub async fn run(
    client: &CatalogClient,
    config: &AppConfig,
    assets: AssetUrls,
    request: ProductRequest,
) -> anyhow::Result<()> {
    let lifetime = PageLifetime::new();
    let ticket = lifetime.enter();
    let load = load_variant_page(
        &ticket,
        client.product_details(&request.slug),
        &QueryParams::new(),
        assets,
    )
    .await?;

    let PageLoad::Ready(mut session) = load else {
        anyhow::bail!("product page for {} was closed before it loaded", request.slug);
    };

    let mut query = QueryEcho::default();
    for (name, value) in &request.selections {
        if !session.select_option(name, value, &mut query) {
            tracing::warn!(option = %name, "product has no such option; selection skipped");
        }
    }

    let page_path = product_page_path(&request.slug);
    let share_url = session.share_link(&config.site_origin, &page_path);
    println!("{}", render_product(&session, &share_url));

    if request.share {
        let mut clipboard = WriterClipboard::new(io::stdout());
        let outcome = session.share(&config.site_origin, &page_path, &mut clipboard);
        if matches!(outcome, ShareOutcome::Copied(_)) {
            println!("Link copied to clipboard!");
        }
    }

    if request.messenger {
        match config.messenger_profile_id.as_deref() {
            Some(profile_id) => {
                let mut opener = WriterOpener::new(io::stdout());
                session.open_messenger(profile_id, &share_url, &mut opener);
            }
            None => tracing::warn!("ECAM_MESSENGER_PROFILE_ID is not set; no Messenger link"),
        }
    }

    lifetime.leave();
    Ok(())
}

pub fn render_product(session: &VariantSession, share_url: &str) -> String {
    let product = session.product();
    let price = session.display_price();
    let selected = session.selected();

    let mut lines = vec![match product.sku.as_deref() {
        Some(sku) => format!("{} (SKU {sku})", product.name),
        None => product.name.clone(),
    }];

    let mut price_line = format!("Price: {}", format_usd(price.final_price));
    if let Some(original) = price.original {
        price_line.push_str(&format!("  was {}", format_usd(original)));
    }
    if let Some(badge) = price.badge() {
        price_line.push_str(&format!("  {badge}"));
    }
    lines.push(price_line);

    for option in &product.choice_options {
        let current = selected.get(&option.name);
        let values = option
            .allowed_values
            .iter()
            .map(|value| {
                if current == Some(value.as_str()) {
                    format!("[{value}]")
                } else {
                    value.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("{} ({}): {values}", option.title, option.name));
    }

    lines.push("Media:".to_owned());
    for (index, item) in session.gallery().iter().enumerate() {
        let marker = if index == session.selected_index() { '*' } else { ' ' };
        let entry = match item {
            GalleryItem::Video { id, embed_url, .. } => format!("video {id} {embed_url}"),
            GalleryItem::Image { url } => url.clone(),
        };
        lines.push(format!("  {marker} {}. {entry}", index + 1));
    }

    lines.push(format!("Link: {share_url}"));
    lines.join("\n")
}
