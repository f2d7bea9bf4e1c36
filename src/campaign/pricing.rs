//! Price arithmetic and formatting.
//!
//! Prices arrive as strings scraped from product pages. Anything that does not
//! parse as a decimal is passed through untouched rather than guessed at.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Parses `19.99`, `$1,299.00`, or `25%` into a decimal.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(cleaned.trim()).ok()
}

/// `regular × (1 − discount/100)`, rounded to cents.
///
/// Returns `regular` unchanged when the discount is absent, either value
/// fails to parse, or the arithmetic overflows. Never goes below zero.
pub fn sale_price(regular: &str, discount: Option<&str>) -> String {
    let (Some(regular_amount), Some(discount)) =
        (parse_amount(regular), discount.and_then(parse_amount))
    else {
        return regular.to_string();
    };
    let sale = discount
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|fraction| Decimal::ONE.checked_sub(fraction))
        .and_then(|factor| regular_amount.checked_mul(factor));
    match sale {
        Some(sale) => format_amount(sale.max(Decimal::ZERO)),
        None => regular.to_string(),
    }
}

/// `regular − sale` in cents precision, or `0.00` when either is unparsable
/// or the difference overflows.
pub fn savings(regular: &str, sale: &str) -> String {
    let difference = match (parse_amount(regular), parse_amount(sale)) {
        (Some(r), Some(s)) => r.checked_sub(s).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };
    format_amount(difference.max(Decimal::ZERO))
}

/// Renders a price the way a text-to-speech voice should say it.
///
/// `0.45` → `45 cents`, `12.00` → `12 dollars`, `12.05` → `under 13 bucks`,
/// `12.99` → `under 13 dollars`, `12.50` → `12 dollars and 50 cents`.
pub fn format_price_for_speech(price: &str) -> String {
    let Some(amount) = parse_amount(price) else {
        return price.to_string();
    };

    if amount < Decimal::ONE {
        let Some(cents) = amount.checked_mul(Decimal::ONE_HUNDRED) else {
            return price.to_string();
        };
        let cents = round_to_i64(cents);
        return format!("{cents} cents");
    }

    let dollars = amount.trunc();
    let cents = round_to_i64((amount - dollars) * Decimal::ONE_HUNDRED);
    let whole = dollars.to_i64().unwrap_or_default();

    match cents {
        0 => format!("{whole} dollars"),
        1..10 => format!("under {} bucks", whole.saturating_add(1)),
        91.. => format!("under {} dollars", whole.saturating_add(1)),
        _ => format!("{whole} dollars and {cents} cents"),
    }
}

fn round_to_i64(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
