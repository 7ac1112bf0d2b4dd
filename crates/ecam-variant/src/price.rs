//! Discounted price display.

use ecam_core::DiscountType;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// A discount that actually changed the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedDiscount {
    pub amount: Decimal,
    pub kind: DiscountType,
}

/// What the price block shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayPrice {
    /// Price after discount, rounded to two places.
    pub final_price: Decimal,
    /// Unrounded list price, struck through. `None` when no discount applies.
    pub original: Option<Decimal>,
    pub discount: Option<AppliedDiscount>,
}

impl DisplayPrice {
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount.is_some()
    }

    /// Badge next to the price on the detail page, e.g. `Save 20%`.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        self.discount.map(|d| match d.kind {
            DiscountType::Percent => format!("Save {}%", d.amount.normalize()),
            DiscountType::Amount => format!("Save ${}", d.amount.normalize()),
        })
    }

    /// Ribbon on a listing card, e.g. `20% OFF`.
    #[must_use]
    pub fn list_badge(&self) -> Option<String> {
        self.discount.map(|d| match d.kind {
            DiscountType::Percent => format!("{}% OFF", d.amount.normalize()),
            DiscountType::Amount => format!("${} OFF", d.amount.normalize()),
        })
    }

    /// `final_price` with exactly two decimals, e.g. `80.00`.
    #[must_use]
    pub fn final_text(&self) -> String {
        format!("{:.2}", self.final_price)
    }
}

/// Applies `discount` to `price`.
///
/// A missing, zero, or negative discount (or a missing discount type) leaves
/// the price as is with nothing struck through. Percent discounts compute
/// `price * (1 - discount / 100)`; amount discounts compute `price - discount`.
/// The result is not clamped, so an oversized discount yields a negative
/// price. Arithmetic overflow is treated as no discount.
#[must_use]
pub fn compute_display_price(
    price: Decimal,
    discount: Option<Decimal>,
    discount_type: Option<DiscountType>,
) -> DisplayPrice {
    let undiscounted = DisplayPrice {
        final_price: round_cents(price),
        original: None,
        discount: None,
    };

    let (Some(amount), Some(kind)) = (discount, discount_type) else {
        return undiscounted;
    };
    if amount <= Decimal::ZERO {
        return undiscounted;
    }

    let discounted = match kind {
        DiscountType::Percent => Decimal::ONE
            .checked_sub(amount / Decimal::ONE_HUNDRED)
            .and_then(|factor| price.checked_mul(factor)),
        DiscountType::Amount => price.checked_sub(amount),
    };

    match discounted {
        Some(value) => DisplayPrice {
            final_price: round_cents(value),
            original: Some(price),
            discount: Some(AppliedDiscount { amount, kind }),
        },
        None => {
            tracing::debug!(%price, %amount, kind = kind.as_str(), "discount overflowed; showing list price");
            undiscounted
        }
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// US-dollar text with thousands separators, e.g. `$1,234.50` or `-$5.00`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let text = format!("{:.2}", round_cents(amount.abs()));
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn percent_discount() {
        let price = compute_display_price(dec("100"), Some(dec("20")), Some(DiscountType::Percent));
        assert_eq!(price.final_price, dec("80.00"));
        assert_eq!(price.final_text(), "80.00");
        assert_eq!(price.original, Some(dec("100")));
        assert_eq!(price.badge().as_deref(), Some("Save 20%"));
        assert_eq!(price.list_badge().as_deref(), Some("20% OFF"));
    }

    #[test]
    fn amount_discount() {
        let price = compute_display_price(dec("100"), Some(dec("20")), Some(DiscountType::Amount));
        assert_eq!(price.final_text(), "80.00");
        assert_eq!(price.original, Some(dec("100")));
        assert_eq!(price.badge().as_deref(), Some("Save $20"));
        assert_eq!(price.list_badge().as_deref(), Some("$20 OFF"));
    }

    #[test]
    fn zero_discount_is_no_discount() {
        let price = compute_display_price(dec("100"), Some(dec("0")), Some(DiscountType::Percent));
        assert_eq!(price.final_text(), "100.00");
        assert!(price.original.is_none());
        assert!(!price.is_discounted());
        assert!(price.badge().is_none());
    }

    #[test]
    fn negative_or_missing_discount_is_no_discount() {
        let negative = compute_display_price(dec("50"), Some(dec("-5")), Some(DiscountType::Amount));
        assert!(negative.original.is_none());
        let missing = compute_display_price(dec("50"), None, Some(DiscountType::Amount));
        assert!(missing.original.is_none());
        let untyped = compute_display_price(dec("50"), Some(dec("5")), None);
        assert!(untyped.original.is_none());
        assert_eq!(untyped.final_text(), "50.00");
    }

    #[test]
    fn rounds_to_cents() {
        let price = compute_display_price(dec("19.99"), Some(dec("15")), Some(DiscountType::Percent));
        // 19.99 * 0.85 = 16.9915
        assert_eq!(price.final_text(), "16.99");
        assert_eq!(price.original, Some(dec("19.99")));

        let half = compute_display_price(dec("0.25"), Some(dec("50")), Some(DiscountType::Percent));
        // 0.125 rounds away from zero
        assert_eq!(half.final_text(), "0.13");
    }

    #[test]
    fn oversized_discount_goes_negative() {
        let price = compute_display_price(dec("10"), Some(dec("25")), Some(DiscountType::Amount));
        assert_eq!(price.final_text(), "-15.00");
        let percent = compute_display_price(dec("10"), Some(dec("150")), Some(DiscountType::Percent));
        assert_eq!(percent.final_text(), "-5.00");
    }

    #[test]
    fn fractional_discount_badge_keeps_its_digits() {
        let price = compute_display_price(dec("100"), Some(dec("12.50")), Some(DiscountType::Percent));
        assert_eq!(price.badge().as_deref(), Some("Save 12.5%"));
        assert_eq!(price.final_text(), "87.50");
    }

    #[test]
    fn formats_usd() {
        assert_eq!(format_usd(dec("0")), "$0.00");
        assert_eq!(format_usd(dec("5")), "$5.00");
        assert_eq!(format_usd(dec("999.999")), "$1,000.00");
        assert_eq!(format_usd(dec("1234.5")), "$1,234.50");
        assert_eq!(format_usd(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_usd(dec("-15")), "-$15.00");
    }
}
