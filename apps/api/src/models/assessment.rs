use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Lowest and highest urgency a request can be assigned.
pub const MIN_URGENCY: u8 = 1;
pub const MAX_URGENCY: u8 = 10;

/// Maximum number of words kept in an assessment summary.
pub const SUMMARY_MAX_WORDS: usize = 5;

/// Broad kind of help a request needs. Drives how volunteers read the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Medical,
    Mobility,
    Access,
    General,
}

const CATEGORY_NAMES: &[&str] = &["Medical", "Mobility", "Access", "General"];

impl Category {
    /// Matches a category name ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            Category::Medical,
            Category::Mobility,
            Category::Access,
            Category::General,
        ]
        .into_iter()
        .zip(CATEGORY_NAMES)
        .find(|(_, known)| known.eq_ignore_ascii_case(name))
        .map(|(category, _)| category)
    }
}

// Model output varies in casing, so names are matched case-insensitively.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Category::from_name(&raw).ok_or_else(|| de::Error::unknown_variant(raw.trim(), CATEGORY_NAMES))
    }
}

/// Structured urgency judgment attached to every job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyAssessment {
    pub urgency_score: u8, // 1 – 10
    pub category: Category,
    pub summary: String, // ≤ 5 words
    pub is_critical: bool,
}

/// Which path produced an assessment. Reported for transparency only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageSource {
    Llm,
    Keyword,
    Seed,
}

impl TriageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageSource::Llm => "llm",
            TriageSource::Keyword => "keyword",
            TriageSource::Seed => "seed",
        }
    }
}

/// Returns at most the first `SUMMARY_MAX_WORDS` whitespace-delimited tokens of `text`.
pub fn first_words(text: &str) -> String {
    text.split_whitespace()
        .take(SUMMARY_MAX_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}
