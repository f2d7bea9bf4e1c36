//! The campaign assembler.
//!
//! Validation happens first and is the only thing that can fail. After that,
//! one call goes out to the text generator; whatever comes back (or doesn't)
//! is parsed, backed by fallback lines where needed, and run through the
//! repetition guard before the script and exports are built.

mod csv;
mod long_form;
mod naming;
mod persona;
mod pricing;
mod scene;
mod taglines;

pub use long_form::DEFAULT_SITE_URL;
pub use scene::{Picker, RandomPicker};
#[cfg(test)]
pub(crate) use scene::tests::FixedPicker;

use jiff::Timestamp;
use uuid::Uuid;

use crate::generate::{ProductSummary, TaglineRequest, TextGenerator};
use crate::model::{
    CampaignOutput, CampaignRequest, Persona, ProductForScript, ProductRecord, TaglineSource,
    ValidationError,
};

use self::scene::Scene;

/// Settings that shape output but not its validity.
#[derive(Debug, Clone)]
pub struct CampaignOptions {
    /// Linked from the long-form description.
    pub site_url: String,
}

impl Default for CampaignOptions {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

/// Checks a selection before anything is generated.
pub fn validate(
    records: Vec<ProductRecord>,
    persona: Persona,
) -> Result<CampaignRequest, ValidationError> {
    if records.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    if let Some(record) = records.iter().find(|r| !r.is_ready()) {
        return Err(ValidationError::NotReady(record.asin.to_string()));
    }
    Ok(CampaignRequest { records, persona })
}

/// Validates, then assembles.
pub fn generate_campaign(
    records: Vec<ProductRecord>,
    persona: Persona,
    generator: &dyn TextGenerator,
    picker: &mut dyn Picker,
    options: &CampaignOptions,
) -> Result<CampaignOutput, ValidationError> {
    let request = validate(records, persona)?;
    Ok(assemble(&request, generator, picker, options))
}

/// Builds the campaign for a validated request. Never fails: generator
/// problems degrade to fallback taglines.
pub fn assemble(
    request: &CampaignRequest,
    generator: &dyn TextGenerator,
    picker: &mut dyn Picker,
    options: &CampaignOptions,
) -> CampaignOutput {
    let persona = request.persona;
    let scene = match persona {
        Persona::LeisureKing => Some(Scene::pick(picker)),
        Persona::GirlMath => None,
    };

    let mut products: Vec<ProductForScript> =
        request.records.iter().map(product_for_script).collect();
    let mut tagline_source = fill_taglines(&mut products, persona, generator);
    if taglines::guard_repetition(&mut products, persona) {
        tagline_source = TaglineSource::Rotated;
    }

    let lines: Vec<String> = products
        .iter()
        .map(|p| format!("This is the {}. {}", p.clean_name, p.tagline))
        .collect();
    let video_script = format!(
        "{}\n\n{}\n\n{}",
        persona::intro(persona, scene.as_ref()),
        lines.join(persona::SEGMENT_PAUSE),
        persona::outro(persona),
    );

    let editing_summary = products
        .iter()
        .map(|p| format!("{} | {}", p.clean_name, p.code_label()))
        .collect::<Vec<_>>()
        .join("\n");

    let (video_prompt, long_form) = match (persona, scene) {
        (Persona::LeisureKing, Some(scene)) => (
            Some(persona::video_prompt(&scene)),
            long_form::long_form(&products, &options.site_url),
        ),
        _ => (None, None),
    };

    let output = CampaignOutput {
        id: Uuid::new_v4(),
        persona,
        created_at: Timestamp::now(),
        video_script,
        editing_summary,
        csv_content: csv::to_csv(&products),
        products,
        tagline_source,
        video_prompt,
        long_form,
    };
    tracing::info!(
        id = %output.id,
        %persona,
        products = output.products.len(),
        source = ?output.tagline_source,
        "campaign assembled"
    );
    output
}

/// Asks the generator for taglines, falling back per product or wholesale.
fn fill_taglines(
    products: &mut [ProductForScript],
    persona: Persona,
    generator: &dyn TextGenerator,
) -> TaglineSource {
    let summaries: Vec<ProductSummary> = products.iter().map(summary).collect();
    let request = TaglineRequest {
        persona,
        prompt: persona::prompt(persona, &summaries),
        products: summaries,
    };

    let reply = generator
        .generate(&request)
        .and_then(|raw| taglines::parse_reply(&raw));
    match reply {
        Ok(reply) => {
            let fallbacks = taglines::apply_reply(&reply, products, persona);
            if fallbacks > 0 {
                tracing::warn!(
                    fallbacks,
                    products = products.len(),
                    "generator reply missed some products"
                );
            }
            if fallbacks == products.len() {
                TaglineSource::Fallback
            } else {
                TaglineSource::Generated
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "tagline generation failed, using fallback lines");
            taglines::apply_fallback(products, persona);
            TaglineSource::Fallback
        }
    }
}

fn product_for_script(record: &ProductRecord) -> ProductForScript {
    let regular_price = record.price.clone().unwrap_or_default();
    let sale_price = pricing::sale_price(&regular_price, record.discount.as_deref());
    ProductForScript {
        asin: record.asin.clone(),
        clean_name: naming::clean_name(record.title.as_deref()),
        regular_price,
        sale_price,
        code: record.code.clone(),
        discount: record.discount.clone().unwrap_or_else(|| "0".to_string()),
        image_url: record.image_url.clone(),
        link: format!(
            "https://www.amazon.com/dp/{}",
            urlencoding::encode(record.asin.as_str())
        ),
        tagline: String::new(),
    }
}

fn summary(p: &ProductForScript) -> ProductSummary {
    ProductSummary {
        asin: p.asin.clone(),
        clean_name: p.clean_name.clone(),
        regular_price: p.regular_price.clone(),
        sale_price: p.sale_price.clone(),
        has_code: p.code.is_some(),
        discount: p.discount.clone(),
    }
}
