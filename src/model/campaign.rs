//! Campaign types: what goes into and comes out of generation.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Asin, ProductRecord};

/// A named style profile controlling tone and template selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    /// Upbeat "it's basically free" savings math.
    #[default]
    GirlMath,

    /// Cynical, disappointed-parent delivery. Also produces long-form
    /// content and a scene prompt for the video clips.
    LeisureKing,
}

impl Persona {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GirlMath => "girl-math",
            Self::LeisureKing => "leisure-king",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::GirlMath => "Girl Math",
            Self::LeisureKing => "The Leisure King",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "girl-math" | "girlmath" => Ok(Self::GirlMath),
            "leisure-king" | "leisureking" => Ok(Self::LeisureKing),
            other => Err(format!(
                "unknown persona '{other}' (expected girl-math or leisure-king)"
            )),
        }
    }
}

/// A validated snapshot of what to generate: Ready records and a persona.
#[derive(Debug, Clone)]
pub struct CampaignRequest {
    pub records: Vec<ProductRecord>,
    pub persona: Persona,
}

/// One product as it appears in a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForScript {
    pub asin: Asin,
    pub clean_name: String,
    pub regular_price: String,
    pub sale_price: String,
    pub code: Option<String>,
    pub discount: String,
    pub image_url: String,
    pub link: String,
    pub tagline: String,
}

impl ProductForScript {
    /// The code as shown in summaries.
    pub fn code_label(&self) -> &str {
        self.code.as_deref().unwrap_or("None shown")
    }
}

/// Which path produced a campaign's taglines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaglineSource {
    /// Taken from the text generator as returned.
    Generated,

    /// The generator failed or was skipped; rule-table lines were used.
    Fallback,

    /// Lines were structurally repetitive and replaced by the template rotation.
    Rotated,
}

/// Titles, description, and hashtags for a long-form video upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongFormContent {
    pub titles: Vec<String>,
    pub description: String,
    pub hashtags: String,
}

/// The bundle of generated and derived artifacts for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignOutput {
    pub id: Uuid,
    pub persona: Persona,
    pub created_at: Timestamp,
    pub video_script: String,
    pub editing_summary: String,
    pub csv_content: String,
    pub products: Vec<ProductForScript>,
    pub tagline_source: TaglineSource,

    /// Scene prompt for the opening and closing clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_form: Option<LongFormContent>,
}
