//! Core data model for the deal hub.
//!
//! These types follow a product from the extension to a campaign:
//! raw captures, validated captures, merged records, and campaign output.

mod campaign;
mod capture;
mod record;

pub use campaign::{
    CampaignOutput, CampaignRequest, LongFormContent, Persona, ProductForScript, TaglineSource,
};
pub use capture::{Asin, Capture, RawCapture, ValidationError};
pub use record::{DealStatus, ProductRecord};
