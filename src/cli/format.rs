//! Output formatting for CLI display.

use crate::model::{CampaignOutput, ProductRecord, TaglineSource};

/// One line per deal: identifier, status, title, and the deal terms.
pub(super) fn format_record(record: &ProductRecord) -> String {
    let mut terms = Vec::new();
    if let Some(price) = &record.price {
        terms.push(format!("${price}"));
    }
    if let Some(discount) = &record.discount {
        terms.push(format!("{discount}% off"));
    }
    if let Some(code) = &record.code {
        terms.push(format!("code {code}"));
    }

    format!(
        "{}  [{}]  {}  {}",
        record.asin,
        record.status.as_str(),
        record.title.as_deref().unwrap_or("(untitled)"),
        if terms.is_empty() {
            "-".to_string()
        } else {
            terms.join(", ")
        }
    )
}

pub(super) fn format_tagline_source(source: TaglineSource) -> &'static str {
    match source {
        TaglineSource::Generated => "generated",
        TaglineSource::Fallback => "built-in fallback",
        TaglineSource::Rotated => "rotated templates",
    }
}

/// A readable dump of a campaign: script, summary, and any long-form content.
pub(super) fn format_campaign(campaign: &CampaignOutput) -> String {
    let short_id = &campaign.id.to_string()[..8];
    let mut sections = vec![
        format!(
            "Campaign {short_id}  {}  {}  ({} product(s), taglines: {})",
            campaign.persona.display_name(),
            campaign.created_at.strftime("%Y-%m-%d %H:%M"),
            campaign.products.len(),
            format_tagline_source(campaign.tagline_source),
        ),
        format!("== Script ==\n{}", campaign.video_script),
        format!("== Editing summary ==\n{}", campaign.editing_summary),
    ];

    if let Some(prompt) = &campaign.video_prompt {
        sections.push(format!("== Video prompt ==\n{prompt}"));
    }
    if let Some(long_form) = &campaign.long_form {
        let titles: Vec<String> = long_form
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| format!("{}. {title}", i + 1))
            .collect();
        sections.push(format!("== Titles ==\n{}", titles.join("\n")));
        sections.push(format!(
            "== Description ==\n{}",
            long_form.description.trim_end()
        ));
        sections.push(format!("== Hashtags ==\n{}", long_form.hashtags));
    }
    format!("{}\n", sections.join("\n\n"))
}
