//! Product records: the canonical, merged view of one product.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Asin;

/// One product, merged from every capture seen for its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub asin: Asin,
    pub title: Option<String>,
    pub price: Option<String>,
    pub code: Option<String>,
    pub discount: Option<String>,
    pub image_url: String,
    pub last_updated: Timestamp,

    /// Derived from the fields above on every merge; never set directly.
    pub status: DealStatus,
}

impl ProductRecord {
    pub fn is_ready(&self) -> bool {
        self.status == DealStatus::Ready
    }
}

/// Whether a record can be used for campaign generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStatus {
    /// Has a title, a price, and a code or discount.
    Ready,

    /// Still missing one of the above.
    Incomplete,
}

impl DealStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Incomplete => "incomplete",
        }
    }
}
