//! Captures: partial product observations from the browser extension.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised before a request reaches the merge engine or the assembler.
///
/// These are the only failures surfaced to the caller; everything else
/// degrades to a valid result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("capture has no product identifier")]
    MissingIdentifier,

    #[error("select at least one product")]
    EmptySelection,

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("product {0} is not ready (needs a title, a price, and a code or discount)")]
    NotReady(String),
}

/// A stable product code (an ASIN).
///
/// Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asin(String);

impl Asin {
    /// Parses an identifier, rejecting blank input. Inner whitespace runs
    /// collapse to one space.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let collapsed = collapse_whitespace(raw);
        if collapsed.is_empty() {
            return Err(ValidationError::MissingIdentifier);
        }
        Ok(Self(collapsed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Asin {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Asin> for String {
    fn from(asin: Asin) -> Self {
        asin.0
    }
}

/// A capture as it arrives on the wire.
///
/// Every field is optional and unknown fields are ignored, so older or newer
/// extension builds never fail to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCapture {
    pub asin: Option<String>,
    pub title: Option<String>,
    pub price: Option<String>,
    pub code: Option<String>,
    pub discount: Option<String>,

    /// Sent by the extension but not used: the record's image is derived
    /// from the identifier.
    pub image_url: Option<String>,
}

/// A capture whose identifier has been validated.
///
/// Blank optional fields are normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub asin: Asin,
    pub title: Option<String>,
    pub price: Option<String>,
    pub code: Option<String>,
    pub discount: Option<String>,
}

impl Capture {
    /// A capture carrying only an identifier.
    #[cfg(test)]
    pub fn new(asin: Asin) -> Self {
        Self {
            asin,
            title: None,
            price: None,
            code: None,
            discount: None,
        }
    }
}

impl TryFrom<RawCapture> for Capture {
    type Error = ValidationError;

    fn try_from(raw: RawCapture) -> Result<Self, Self::Error> {
        let asin = Asin::parse(raw.asin.as_deref().unwrap_or_default())?;
        Ok(Self {
            asin,
            title: present(raw.title),
            price: present(raw.price),
            code: present(raw.code),
            discount: present(raw.discount),
        })
    }
}

/// Collapses whitespace (line breaks included) and drops the field when
/// nothing is left. Every stored value stays on one line.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| collapse_whitespace(&v))
        .filter(|v| !v.is_empty())
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
