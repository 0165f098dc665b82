//! Enumeration types shared by the scoring engine and the HTTP service.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Scholarship categories
// ---------------------------------------------------------------------------

/// The kind of scholarship a country is steered toward.
///
/// Serialized as the human-readable grant name, which is what API clients
/// display. Declaration order is the tie-break order when two categories
/// have the same membership degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ScholarshipType {
    /// Skills and trade training for countries with low formal education.
    #[serde(rename = "Vocational Training Grant")]
    Vocational,
    /// University study for countries with mid-level education.
    #[serde(rename = "Academic Scholarship")]
    Academic,
    /// Postgraduate research for countries with strong tertiary education.
    #[serde(rename = "Research Grant")]
    Research,
}

impl ScholarshipType {
    /// All categories in declaration order.
    pub const ALL: [Self; 3] = [Self::Vocational, Self::Academic, Self::Research];

    /// Short lower-case term name used by the fuzzy variable.
    pub const fn term_name(self) -> &'static str {
        match self {
            Self::Vocational => "vocational",
            Self::Academic => "academic",
            Self::Research => "research",
        }
    }

    /// Human-readable grant name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vocational => "Vocational Training Grant",
            Self::Academic => "Academic Scholarship",
            Self::Research => "Research Grant",
        }
    }

    /// Look up a category by its short term name.
    pub fn from_term_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.term_name() == name)
    }
}

impl fmt::Display for ScholarshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
