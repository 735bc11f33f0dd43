use serde::{Deserialize, Serialize};

/// Classification produced by the vision model for one uploaded product photo.
///
/// `category` is one of the closed set the instruction prompt asks for
/// (giyim, mobilya, ev dekorasyonu, aksesuar, kozmetik) or whatever free
/// text the model produced instead; downstream matching treats anything
/// unrecognized as the neutral default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductAnalysis {
    pub category: String,
    pub description: String,
}

impl ProductAnalysis {
    /// Fallback category when the model omits the field.
    pub const UNKNOWN_CATEGORY: &'static str = "unknown";
    /// Fallback description when the model omits the field.
    pub const FALLBACK_DESCRIPTION: &'static str = "A product";
}
