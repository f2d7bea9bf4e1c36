//! Display names: strip marketplace filler from product titles.

use std::sync::LazyLock;

use regex::Regex;

/// Longest display name before truncation.
pub const MAX_NAME_LEN: usize = 50;

static FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(ideal gift|ages \d+\s*-\s*\d+|stem|road trip|educational|premium quality|best seller|top rated)\b",
    )
    .expect("valid filler regex")
});

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthetical regex"));

/// Turns a product title into a short name suitable for a voice-over.
///
/// Filler phrases and parenthesised asides are removed, whitespace is
/// collapsed, and the result is cut at a word boundary.
pub fn clean_name(title: Option<&str>) -> String {
    let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
        return "Product".to_string();
    };

    let without_asides = PARENTHETICAL.replace_all(title, " ");
    let without_filler = FILLER.replace_all(&without_asides, " ");
    let collapsed = without_filler.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned = collapsed.trim_matches(|c: char| matches!(c, ',' | '-' | '|') || c.is_whitespace());

    if cleaned.is_empty() {
        truncate(title)
    } else {
        truncate(cleaned)
    }
}

/// Caps `name` at [`MAX_NAME_LEN`] characters, backing up to the last
/// space so no word is split.
fn truncate(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_LEN {
        return name.to_string();
    }
    let head: String = name.chars().take(MAX_NAME_LEN).collect();
    let cut = match head.rfind(' ') {
        Some(idx) if idx > 0 => &head[..idx],
        _ => head.as_str(),
    };
    let cut = cut.trim_end_matches(|c: char| matches!(c, ',' | '-') || c.is_whitespace());
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_filler_and_parentheticals() {
        let name = clean_name(Some(
            "Magnetic Tiles (100 Pieces) STEM Educational Toy Ideal Gift Ages 3-8",
        ));
        assert_eq!(name, "Magnetic Tiles Toy");
    }

    #[test]
    fn filler_is_matched_on_word_boundaries() {
        // "stem" inside a word is not filler.
        assert_eq!(clean_name(Some("Stemless Wine Glasses")), "Stemless Wine Glasses");
    }

    #[test]
    fn long_names_truncate_on_word_boundary() {
        let name = clean_name(Some(
            "Ultra Quiet Portable Bluetooth Speaker with Deep Bass and Thirty Hour Battery",
        ));
        assert!(name.ends_with("..."));
        assert!(name.chars().count() <= MAX_NAME_LEN + 3);
        assert_eq!(name, "Ultra Quiet Portable Bluetooth Speaker with Deep...");
    }

    #[test]
    fn missing_title_falls_back() {
        assert_eq!(clean_name(None), "Product");
        assert_eq!(clean_name(Some("   ")), "Product");
    }

    #[test]
    fn all_filler_keeps_raw_title() {
        assert_eq!(clean_name(Some("Best Seller (New)")), "Best Seller (New)");
    }
}
