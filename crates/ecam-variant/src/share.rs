use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::selection::SelectedOptions;

/// Characters escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Storefront path of the product page for `slug`, with the slug escaped as
/// one path segment.
#[must_use]
pub fn product_page_path(slug: &str) -> String {
    format!("/products/{}", utf8_percent_encode(slug, PATH_SEGMENT))
}

/// Deep link that reproduces `selected` when the page is opened.
///
/// Options are serialized in declaration order after `base_url + path`. With
/// nothing selected the link carries no query string at all.
#[must_use]
pub fn build_share_link(base_url: &str, path: &str, selected: &SelectedOptions) -> String {
    let base = base_url.trim_end_matches('/');
    let path = if path.is_empty() || path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };

    if selected.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}{path}?{}", selected.to_query())
    }
}
