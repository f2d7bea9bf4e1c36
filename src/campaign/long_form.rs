//! Long-form upload content: titles, description, hashtags.
//!
//! Built from the first product of a campaign. Later products are listed in
//! an "other deals" section of the description.

use crate::model::{LongFormContent, ProductForScript};

use super::pricing::savings;

pub const DEFAULT_SITE_URL: &str = "https://retailnihilist.com";

const PRIMARY_HASHTAGS: &str = "#AmazonDeals #PromoCode #AmazonFinds";
const DEFAULT_CATEGORY: &str = "#DealsAndSteals";

/// Keyword lists per category tag, checked in order.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "#BeautyDeals",
        &["makeup", "lipstick", "mascara", "foundation", "skincare", "beauty", "serum", "moisturizer"],
    ),
    (
        "#TechDeals",
        &["phone", "laptop", "tablet", "headphone", "speaker", "tech", "electronic", "camera", "gadget"],
    ),
    (
        "#HomeDeals",
        &["home", "decor", "furniture", "bedding", "pillow", "blanket", "lamp", "rug"],
    ),
    (
        "#FashionDeals",
        &["clothing", "shirt", "pants", "dress", "shoe", "fashion", "jacket", "accessory"],
    ),
    (
        "#KitchenDeals",
        &["kitchen", "cooking", "pot", "pan", "utensil", "appliance", "blender", "coffee"],
    ),
];

const DISCLOSURE: &str = "⚠️ DISCLOSURE:\n\
    As an Amazon Associate, I earn from qualifying purchases at no extra cost to you. \
    You pay the same price whether you use my link or not. \
    I just get a small commission if you buy.\n\n---\n\n";

/// Returns `None` for an empty campaign.
pub fn long_form(products: &[ProductForScript], site_url: &str) -> Option<LongFormContent> {
    let (first, rest) = products.split_first()?;
    Some(LongFormContent {
        titles: titles(first),
        description: description(first, rest, site_url),
        hashtags: hashtags(&first.clean_name),
    })
}

fn titles(p: &ProductForScript) -> Vec<String> {
    let name = &p.clean_name;
    let direct = match &p.code {
        Some(code) => format!("{name} {}% OFF with Code {code} | Amazon Deal", p.discount),
        None => format!("{name} {}% OFF | Amazon Deal", p.discount),
    };
    vec![
        format!("${} → ${}?! | {name} Amazon Deal", p.regular_price, p.sale_price),
        format!("Stop Paying Full Price | {name} {}% OFF with Code", p.discount),
        direct,
        format!(
            "Limited Time: {name} ${} (Was ${}) | Code Inside",
            p.sale_price, p.regular_price
        ),
        format!("Paying Full Price is Embarrassing | {name} Deal"),
    ]
}

fn description(first: &ProductForScript, rest: &[ProductForScript], site_url: &str) -> String {
    let (headline, code_line) = match &first.code {
        Some(code) => (
            format!(
                "{} is {}% off right now with code {code}.",
                first.clean_name, first.discount
            ),
            format!("\n💰 CODE: {code} (click to copy)"),
        ),
        None => (
            format!("{} is {}% off right now.", first.clean_name, first.discount),
            String::new(),
        ),
    };

    let mut sections = vec![
        headline,
        format!("👑 GET THE DEAL: {}{code_line}", first.link),
        format!(
            "Regular Price: ${}\nSale Price: ${}\nYou Save: ${} ({}%)",
            first.regular_price,
            first.sale_price,
            savings(&first.regular_price, &first.sale_price),
            first.discount,
        ),
        "⚠️ DEAL EXPIRES: Limited time".to_string(),
        "---".to_string(),
        format!("📱 ALL DEALS + CODES:\n👉 {site_url}"),
        "---".to_string(),
    ];

    if !rest.is_empty() {
        let deals: Vec<String> = rest
            .iter()
            .enumerate()
            .map(|(i, p)| other_deal(i + 2, p))
            .collect();
        sections.push(format!(
            "\n📦 OTHER DEALS IN THIS VIDEO:\n\n{}\n\n---",
            deals.join("\n\n")
        ));
    }

    sections.push(DISCLOSURE.to_string());
    sections.join("\n\n")
}

fn other_deal(position: usize, p: &ProductForScript) -> String {
    let mut lines = vec![
        format!("{position}. {}", p.clean_name),
        format!("   💰 ${} (was ${})", p.sale_price, p.regular_price),
    ];
    if let Some(code) = &p.code {
        lines.push(format!("   🏷️ Code: {code}"));
    }
    lines.push(format!("   🔗 {}", p.link));
    lines.join("\n")
}

fn hashtags(clean_name: &str) -> String {
    format!("{PRIMARY_HASHTAGS} {} #AmazonPrime", detect_category(clean_name))
}

/// First category whose keywords appear in the name.
pub fn detect_category(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(DEFAULT_CATEGORY, |(tag, _)| tag)
}
