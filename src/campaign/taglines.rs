//! Tagline handling after generation: reply parsing, fallback, and the
//! repetition guard.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::generate::GeneratorError;
use crate::model::{Persona, ProductForScript};

use super::persona::{ROTATION_SIZE, fallback_tagline, rotation_tagline};

/// Taglines sharing a run of this many skeleton words count as repetitive.
pub const SHARED_RUN: usize = 6;

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\d[\d,]*(?:\.\d+)?%?").expect("valid amount regex"));

/// The generator's reply, once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaglineReply {
    pub products: Vec<ReplyEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplyEntry {
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(alias = "wittyLine")]
    pub tagline: String,
}

/// Parses raw generator output. When the reply carries a Markdown code
/// fence anywhere in it, only the fenced block is parsed.
pub fn parse_reply(raw: &str) -> Result<TaglineReply, GeneratorError> {
    let body = strip_fences(raw);
    serde_json::from_str(body).map_err(|e| GeneratorError::Malformed(e.to_string()))
}

fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let rest = &trimmed[start + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.find("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// Fills each product's tagline from the reply, matching by identifier and
/// then by position. Products without a usable entry get their fallback
/// line. Returns how many products fell back.
pub fn apply_reply(
    reply: &TaglineReply,
    products: &mut [ProductForScript],
    persona: Persona,
) -> usize {
    let known: HashSet<String> = products.iter().map(|p| p.asin.to_string()).collect();
    let mut fallbacks = 0;

    for (i, product) in products.iter_mut().enumerate() {
        let by_asin = reply
            .products
            .iter()
            .find(|e| e.asin.as_deref().map(str::trim) == Some(product.asin.as_str()));
        // A positional entry only counts when it isn't claimed by another product.
        let by_position = reply
            .products
            .get(i)
            .filter(|e| e.asin.as_deref().is_none_or(|a| !known.contains(a.trim())));

        match by_asin.or(by_position).map(|e| e.tagline.trim()) {
            Some(line) if !line.is_empty() => product.tagline = line.to_string(),
            _ => {
                product.tagline = fallback_tagline(persona, product);
                fallbacks += 1;
            }
        }
    }
    fallbacks
}

/// Gives every product its rule-table line.
pub fn apply_fallback(products: &mut [ProductForScript], persona: Persona) {
    for product in products {
        product.tagline = fallback_tagline(persona, product);
    }
}

/// A tagline's structure: lower-cased, amounts masked as `#`, punctuation
/// dropped, and the product name masked as `@` where it appears as whole
/// words.
pub fn skeleton(tagline: &str, clean_name: &str) -> String {
    let words = skeleton_words(tagline);
    let name = skeleton_words(clean_name);
    if name.is_empty() {
        return words.join(" ");
    }

    let mut masked = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if words[i..].starts_with(&name) {
            masked.push("@".to_string());
            i += name.len();
        } else {
            masked.push(words[i].clone());
            i += 1;
        }
    }
    masked.join(" ")
}

fn skeleton_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let masked = AMOUNT.replace_all(&lowered, " # ");
    let spaced: String = masked
        .chars()
        .filter(|c| !matches!(c, '\'' | '’'))
        .map(|c| if c.is_alphanumeric() || c == '#' { c } else { ' ' })
        .collect();
    spaced.split_whitespace().map(str::to_string).collect()
}

/// True when two taglines share a skeleton or a run of [`SHARED_RUN`] words.
pub fn is_repetitive(products: &[ProductForScript]) -> bool {
    let skeletons: Vec<String> = products
        .iter()
        .map(|p| skeleton(&p.tagline, &p.clean_name))
        .collect();

    let mut seen = HashSet::new();
    if skeletons.iter().any(|s| !seen.insert(s.as_str())) {
        return true;
    }

    let mut runs_seen: HashSet<Vec<&str>> = HashSet::new();
    for s in &skeletons {
        let words: Vec<&str> = s.split_whitespace().collect();
        let runs: HashSet<Vec<&str>> = words.windows(SHARED_RUN).map(<[&str]>::to_vec).collect();
        if runs.iter().any(|run| runs_seen.contains(run)) {
            return true;
        }
        runs_seen.extend(runs);
    }
    false
}

/// Replaces repetitive taglines with the persona's template rotation.
/// Returns whether a rotation happened.
pub fn guard_repetition(products: &mut [ProductForScript], persona: Persona) -> bool {
    if !is_repetitive(products) {
        return false;
    }
    tracing::info!(
        products = products.len(),
        %persona,
        "taglines repetitive, rotating templates"
    );
    if products.len() > ROTATION_SIZE {
        tracing::warn!(
            products = products.len(),
            templates = ROTATION_SIZE,
            "more products than rotation templates, structures will repeat"
        );
    }
    for (i, product) in products.iter_mut().enumerate() {
        product.tagline = rotation_tagline(persona, i, product);
    }
    true
}
