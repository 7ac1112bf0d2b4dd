//! Prefilled text for the "Messenger" button.

use ecam_core::{DiscountType, ProductDetail};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::price::DisplayPrice;

/// Same escaping as JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const LINE_BREAK: &str = "%0A";

/// Builds the percent-encoded enquiry text for `product`.
///
/// Lines are joined with `%0A`. The discount lines appear only when `price`
/// carries an applied discount.
#[must_use]
pub fn build_outbound_message(product: &ProductDetail, price: &DisplayPrice, page_url: &str) -> String {
    let name = non_empty(&product.name).unwrap_or("Product");
    let description = product
        .description
        .as_deref()
        .and_then(non_empty)
        .unwrap_or("No description available");
    let sku = product.sku.as_deref().and_then(non_empty).unwrap_or("N/A");

    let mut lines = vec![
        format!("I'm interested in this product: {name}"),
        String::new(),
        format!("Description: {description}"),
        format!("Original Price: ${}", product.price),
    ];

    if let Some(discount) = price.discount {
        let amount = discount.amount.normalize();
        lines.push(match discount.kind {
            DiscountType::Percent => format!("Discount: {amount}% off"),
            DiscountType::Amount => format!("Discount: ${amount} off"),
        });
        lines.push(format!("Discounted Price: ${}", price.final_text()));
    }

    lines.push(format!("SKU: {sku}"));
    lines.push(String::new());
    lines.push(format!("Product URL: {page_url}"));

    lines
        .iter()
        .map(|line| utf8_percent_encode(line, URI_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Messenger conversation link with `message` prefilled.
///
/// `message` must already be encoded, as produced by [`build_outbound_message`].
#[must_use]
pub fn messenger_link(profile_id: &str, message: &str) -> String {
    format!(
        "https://www.messenger.com/t/{}?text={message}",
        utf8_percent_encode(profile_id, URI_COMPONENT)
    )
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
