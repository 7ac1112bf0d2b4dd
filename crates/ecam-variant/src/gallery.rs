use ecam_core::{AssetUrls, ChoiceOption, ProductDetail};
use serde::Serialize;

use crate::selection::SelectedOptions;
use crate::video::{resolve_video_id, VideoId};

/// One entry in the product media viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GalleryItem {
    /// The product video, always first when present.
    Video {
        id: VideoId,
        thumbnail_url: String,
        embed_url: String,
    },
    Image {
        url: String,
    },
}

impl GalleryItem {
    fn video(id: VideoId) -> Self {
        Self::Video {
            thumbnail_url: id.thumbnail_url(),
            embed_url: id.embed_url(),
            id,
        }
    }

    /// URL to show in a thumbnail strip.
    #[must_use]
    pub fn thumbnail_url(&self) -> &str {
        match self {
            Self::Video { thumbnail_url, .. } => thumbnail_url,
            Self::Image { url } => url,
        }
    }
}

/// Media for the current selection, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GalleryItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn has_video(&self) -> bool {
        matches!(self.items.first(), Some(GalleryItem::Video { .. }))
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a GalleryItem;
    type IntoIter = std::slice::Iter<'a, GalleryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The choice option that drives image filtering.
///
/// Identified by a case-insensitive `"color"` substring in its title. This is
/// the only place that heuristic lives; swap it for a schema field if the API
/// ever tags the option explicitly.
#[must_use]
pub fn color_option(product: &ProductDetail) -> Option<&ChoiceOption> {
    product
        .choice_options
        .iter()
        .find(|option| option.title.to_lowercase().contains("color"))
}

/// Builds the gallery for `selected`.
///
/// Images are kept only when their color tag equals the selected color; with
/// no color option (or no selected color) every image is kept. No other
/// option narrows the gallery. A resolvable product video is placed first.
/// When that leaves nothing to show, the product's absolute image URLs are
/// used instead.
#[must_use]
pub fn derive_gallery(
    product: &ProductDetail,
    selected: &SelectedOptions,
    assets: &AssetUrls,
) -> Gallery {
    let mut items = Vec::with_capacity(product.images.len() + 1);

    if let Some(id) = product.video_url.as_deref().and_then(resolve_video_id) {
        items.push(GalleryItem::video(id));
    }

    let selected_color = color_option(product)
        .and_then(|option| selected.get(&option.name))
        .filter(|color| !color.is_empty());

    items.extend(
        product
            .images
            .iter()
            .filter(|image| selected_color.is_none_or(|color| image.color.as_deref() == Some(color)))
            .map(|image| GalleryItem::Image {
                url: assets.product_image(Some(&image.file)),
            }),
    );

    if items.is_empty() {
        items.extend(
            product
                .images_full_url
                .iter()
                .map(|url| GalleryItem::Image { url: url.clone() }),
        );
    }

    Gallery { items }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::query::{parse_query, QueryParams};
    use crate::selection::initialize;

    fn assets() -> AssetUrls {
        AssetUrls::new("https://cdn.test/p", "https://cdn.test/s", "https://cdn.test/c")
    }

    fn phone(video_url: Option<&str>) -> ProductDetail {
        serde_json::from_value(json!({
            "id": 9,
            "name": "Phone X",
            "price": "500",
            "video_url": video_url,
            "images": [
                { "img": "red-front.png", "color": "Red", "storage": "128GB" },
                { "img": "blue-front.png", "color": "Blue", "storage": "128GB" },
                { "img": "red-back.png", "color": "Red", "storage": "256GB" }
            ],
            "images_full_url": ["https://cdn.test/full/cover.png"],
            "choice_options": [
                { "name": "choice_1", "title": "Body Colour / Color", "options": ["Red", "Blue", "Green"] },
                { "name": "choice_2", "title": "Storage", "options": ["128GB", "256GB"] }
            ]
        }))
        .unwrap()
    }

    fn urls(gallery: &Gallery) -> Vec<&str> {
        gallery.iter().map(GalleryItem::thumbnail_url).collect()
    }

    #[test]
    fn keeps_only_images_of_the_selected_color() {
        let product = phone(None);
        let selected = initialize(&product, &parse_query("choice_1=Blue"));
        let gallery = derive_gallery(&product, &selected, &assets());
        assert_eq!(urls(&gallery), vec!["https://cdn.test/p/blue-front.png"]);
    }

    #[test]
    fn storage_does_not_filter() {
        let product = phone(None);
        let selected = initialize(&product, &parse_query("choice_1=Red&choice_2=256GB"));
        let gallery = derive_gallery(&product, &selected, &assets());
        assert_eq!(
            urls(&gallery),
            vec!["https://cdn.test/p/red-front.png", "https://cdn.test/p/red-back.png"]
        );
    }

    #[test]
    fn keeps_everything_without_a_color_option() {
        let mut product = phone(None);
        product.choice_options.remove(0);
        let selected = initialize(&product, &QueryParams::new());
        let gallery = derive_gallery(&product, &selected, &assets());
        assert_eq!(gallery.len(), 3);
    }

    #[test]
    fn empty_color_selection_does_not_filter() {
        let product = phone(None);
        let mut selected = initialize(&product, &QueryParams::new());
        selected.select("choice_1", "");
        let gallery = derive_gallery(&product, &selected, &assets());
        assert_eq!(gallery.len(), 3);
    }

    #[test]
    fn color_title_match_is_case_insensitive() {
        let mut product = phone(None);
        product.choice_options[0].title = "COLOR".to_owned();
        assert_eq!(color_option(&product).map(|o| o.name.as_str()), Some("choice_1"));
        product.choice_options[0].title = "Finish".to_owned();
        assert!(color_option(&product).is_none());
    }

    #[test]
    fn video_comes_first() {
        let product = phone(Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        let selected = initialize(&product, &QueryParams::new());
        let gallery = derive_gallery(&product, &selected, &assets());
        assert!(gallery.has_video());
        assert_eq!(gallery.len(), 3);
        assert!(matches!(gallery.get(0), Some(GalleryItem::Video { id, .. }) if id.as_str() == "dQw4w9WgXcQ"));
    }

    #[test]
    fn unresolvable_video_is_skipped() {
        let product = phone(Some("https://vimeo.com/12345"));
        let selected = initialize(&product, &QueryParams::new());
        let gallery = derive_gallery(&product, &selected, &assets());
        assert!(!gallery.has_video());
        assert_eq!(gallery.len(), 2);
    }

    #[test]
    fn falls_back_to_full_urls_when_nothing_matches() {
        let product = phone(None);
        let selected = initialize(&product, &parse_query("choice_1=Green"));
        let gallery = derive_gallery(&product, &selected, &assets());
        assert_eq!(urls(&gallery), vec!["https://cdn.test/full/cover.png"]);
    }

    #[test]
    fn video_suppresses_full_url_fallback() {
        let product = phone(Some("https://youtu.be/dQw4w9WgXcQ"));
        let selected = initialize(&product, &parse_query("choice_1=Green"));
        let gallery = derive_gallery(&product, &selected, &assets());
        assert_eq!(gallery.len(), 1);
        assert!(gallery.has_video());
    }

    #[test]
    fn is_idempotent() {
        let product = phone(Some("https://youtu.be/dQw4w9WgXcQ"));
        let selected = initialize(&product, &parse_query("choice_1=Red"));
        let first = derive_gallery(&product, &selected, &assets());
        let second = derive_gallery(&product, &selected, &assets());
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let product = phone(Some("https://youtu.be/dQw4w9WgXcQ"));
        let selected = initialize(&product, &parse_query("choice_1=Blue"));
        let gallery = derive_gallery(&product, &selected, &assets());
        let value = serde_json::to_value(&gallery).unwrap();
        assert_eq!(value[0]["kind"], "video");
        assert_eq!(value[0]["id"], "dQw4w9WgXcQ");
        assert_eq!(value[1]["kind"], "image");
        assert_eq!(value[1]["url"], "https://cdn.test/p/blue-front.png");
    }
}
