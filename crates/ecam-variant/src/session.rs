//! Product page state: one selection, and everything derived from it.

use std::sync::Arc;

use ecam_core::{AssetUrls, ProductDetail};

use crate::boundary::{Clipboard, LinkOpener, QueryBoundary};
use crate::gallery::{derive_gallery, Gallery, GalleryItem};
use crate::message::{build_outbound_message, messenger_link};
use crate::price::{compute_display_price, DisplayPrice};
use crate::query::QueryParams;
use crate::selection::{initialize, SelectedOptions};
use crate::share::build_share_link;

/// Result of a share-button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The link is on the clipboard; show the confirmation.
    Copied(String),
    /// The clipboard refused; the failure has been logged.
    NotCopied,
}

/// Selection state for one product page view.
///
/// `selected` is the only mutable input. The gallery is rebuilt, and the
/// viewer index reset to 0, on every selection change.
#[derive(Debug, Clone)]
pub struct VariantSession {
    product: Arc<ProductDetail>,
    assets: AssetUrls,
    selected: SelectedOptions,
    gallery: Gallery,
    selected_index: usize,
}

impl VariantSession {
    #[must_use]
    pub fn new(product: Arc<ProductDetail>, query: &QueryParams, assets: AssetUrls) -> Self {
        let selected = initialize(&product, query);
        let gallery = derive_gallery(&product, &selected, &assets);
        Self {
            product,
            assets,
            selected,
            gallery,
            selected_index: 0,
        }
    }

    /// Applies a user's option click and echoes the new query string.
    ///
    /// Returns `false` (and changes nothing) when `name` is not one of the
    /// product's choice options. `value` is not checked against the allowed
    /// values; an unknown value simply filters the gallery down to nothing.
    pub fn select_option<Q>(&mut self, name: &str, value: &str, query: &mut Q) -> bool
    where
        Q: QueryBoundary + ?Sized,
    {
        if self.product.choice_option(name).is_none() {
            tracing::debug!(
                product_id = self.product.id,
                option = name,
                "ignoring selection for unknown choice option"
            );
            return false;
        }

        self.selected.select(name, value);
        self.gallery = derive_gallery(&self.product, &self.selected, &self.assets);
        self.selected_index = 0;
        query.replace_query(&self.selected.to_query());
        true
    }

    /// Points the viewer at `index`. Out-of-range indexes are ignored.
    pub fn select_media(&mut self, index: usize) -> bool {
        if index < self.gallery.len() {
            self.selected_index = index;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn product(&self) -> &ProductDetail {
        &self.product
    }

    #[must_use]
    pub fn selected(&self) -> &SelectedOptions {
        &self.selected
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[must_use]
    pub fn current_media(&self) -> Option<&GalleryItem> {
        self.gallery.get(self.selected_index)
    }

    #[must_use]
    pub fn display_price(&self) -> DisplayPrice {
        compute_display_price(
            self.product.price,
            self.product.discount,
            self.product.discount_type,
        )
    }

    #[must_use]
    pub fn query_string(&self) -> String {
        self.selected.to_query()
    }

    #[must_use]
    pub fn share_link(&self, origin: &str, path: &str) -> String {
        build_share_link(origin, path, &self.selected)
    }

    /// Copies the share link to `clipboard`.
    ///
    /// A clipboard failure is logged and reported as
    /// [`ShareOutcome::NotCopied`]; it never propagates.
    pub fn share<C>(&self, origin: &str, path: &str, clipboard: &mut C) -> ShareOutcome
    where
        C: Clipboard + ?Sized,
    {
        let link = self.share_link(origin, path);
        match clipboard.write_text(&link) {
            Ok(()) => ShareOutcome::Copied(link),
            Err(e) => {
                tracing::error!(product_id = self.product.id, error = %e, "failed to copy share link");
                ShareOutcome::NotCopied
            }
        }
    }

    #[must_use]
    pub fn outbound_message(&self, page_url: &str) -> String {
        build_outbound_message(&self.product, &self.display_price(), page_url)
    }

    #[must_use]
    pub fn messenger_url(&self, profile_id: &str, page_url: &str) -> String {
        messenger_link(profile_id, &self.outbound_message(page_url))
    }

    pub fn open_messenger<L>(&self, profile_id: &str, page_url: &str, opener: &mut L)
    where
        L: LinkOpener + ?Sized,
    {
        opener.open_in_new_context(&self.messenger_url(profile_id, page_url));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::boundary::{ClipboardError, QueryEcho};
    use crate::query::parse_query;

    struct MemoryClipboard(Option<String>);

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0 = Some(text.to_owned());
            Ok(())
        }
    }

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError("permission denied".to_owned()))
        }
    }

    #[derive(Default)]
    struct RecordingOpener(Vec<String>);

    impl LinkOpener for RecordingOpener {
        fn open_in_new_context(&mut self, url: &str) {
            self.0.push(url.to_owned());
        }
    }

    fn assets() -> AssetUrls {
        AssetUrls::new("https://cdn.test/p", "https://cdn.test/s", "https://cdn.test/c")
    }

    fn session(query: &str) -> VariantSession {
        let product: ProductDetail = serde_json::from_value(json!({
            "id": 77,
            "name": "Phone X",
            "description": "Flagship",
            "price": "200",
            "sku": "PX-77",
            "discount": "10",
            "discount_type": "percent",
            "video_url": "https://youtu.be/dQw4w9WgXcQ",
            "images": [
                { "img": "red-1.png", "color": "Red" },
                { "img": "red-2.png", "color": "Red" },
                { "img": "blue-1.png", "color": "Blue" }
            ],
            "choice_options": [
                { "name": "choice_1", "title": "Color", "options": ["Red", "Blue"] },
                { "name": "choice_2", "title": "Storage", "options": ["128GB", "256GB"] }
            ]
        }))
        .unwrap();
        VariantSession::new(Arc::new(product), &parse_query(query), assets())
    }

    #[test]
    fn starts_at_first_media_item() {
        let s = session("");
        assert_eq!(s.selected_index(), 0);
        assert_eq!(s.gallery().len(), 3);
        assert!(matches!(s.current_media(), Some(GalleryItem::Video { .. })));
    }

    #[test]
    fn selecting_an_option_resets_the_viewer() {
        let mut s = session("");
        let mut echo = QueryEcho::default();
        assert!(s.select_media(2));
        assert_eq!(s.selected_index(), 2);

        assert!(s.select_option("choice_1", "Blue", &mut echo));
        assert_eq!(s.selected_index(), 0);
        assert_eq!(s.gallery().len(), 2);
        assert_eq!(echo.current(), "choice_1=Blue&choice_2=128GB");
    }

    #[test]
    fn reselecting_the_same_value_still_resets() {
        let mut s = session("");
        let mut echo = QueryEcho::default();
        s.select_media(1);
        s.select_option("choice_1", "Red", &mut echo);
        assert_eq!(s.selected_index(), 0);
        assert_eq!(echo.writes(), 1);
    }

    #[test]
    fn storage_selection_keeps_gallery_membership() {
        let mut s = session("choice_1=Red");
        let before = s.gallery().clone();
        let mut echo = QueryEcho::default();
        s.select_option("choice_2", "256GB", &mut echo);
        assert_eq!(s.gallery(), &before);
        assert_eq!(s.selected().get("choice_1"), Some("Red"));
        assert_eq!(echo.current(), "choice_1=Red&choice_2=256GB");
    }

    #[test]
    fn rapid_selections_end_in_the_last_state() {
        let mut s = session("");
        let mut echo = QueryEcho::default();
        for value in ["Blue", "Red", "Blue", "Red", "Blue"] {
            s.select_option("choice_1", value, &mut echo);
        }
        let fresh = session("choice_1=Blue");
        assert_eq!(s.gallery(), fresh.gallery());
        assert_eq!(s.selected(), fresh.selected());
        assert_eq!(s.selected_index(), 0);
        assert_eq!(echo.writes(), 5);
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut s = session("");
        let mut echo = QueryEcho::default();
        assert!(!s.select_option("choice_9", "x", &mut echo));
        assert_eq!(s.selected().len(), 2);
        assert_eq!(echo.writes(), 0);
    }

    #[test]
    fn disallowed_value_degrades_to_empty_image_set() {
        let mut s = session("");
        let mut echo = QueryEcho::default();
        s.select_option("choice_1", "Green", &mut echo);
        assert_eq!(s.gallery().len(), 1);
        assert!(s.gallery().has_video());
    }

    #[test]
    fn out_of_range_media_is_ignored() {
        let mut s = session("");
        assert!(!s.select_media(3));
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn share_copies_the_deep_link() {
        let s = session("choice_2=256GB");
        let mut clipboard = MemoryClipboard(None);
        let outcome = s.share("https://ecam.test", "/products/77", &mut clipboard);
        let expected = "https://ecam.test/products/77?choice_1=Red&choice_2=256GB";
        assert_eq!(outcome, ShareOutcome::Copied(expected.to_owned()));
        assert_eq!(clipboard.0.as_deref(), Some(expected));
    }

    #[test]
    fn share_failure_is_not_propagated() {
        let s = session("");
        let outcome = s.share("https://ecam.test", "/products/77", &mut DeniedClipboard);
        assert_eq!(outcome, ShareOutcome::NotCopied);
    }

    #[test]
    fn messenger_opens_prefilled_link() {
        let s = session("");
        let mut opener = RecordingOpener::default();
        s.open_messenger("ecam.shop", "https://ecam.test/products/77", &mut opener);
        assert_eq!(opener.0.len(), 1);
        let url = &opener.0[0];
        assert!(url.starts_with("https://www.messenger.com/t/ecam.shop?text="));
        assert!(url.contains("Discounted%20Price%3A%20%24180.00"));
    }

    #[test]
    fn display_price_applies_discount() {
        let s = session("");
        let price = s.display_price();
        assert_eq!(price.final_text(), "180.00");
        assert!(price.original.is_some());
    }
}
