//! Keyword triage — the always-available fallback classifier.
//!
//! Pure function of the lower-cased `title + " " + body` text. Three keyword
//! sets are checked in strict precedence order:
//! 1. critical → score 9–10, Medical, critical
//! 2. high     → score 6–8, Medical if a medical sub-keyword is present else Mobility
//! 3. medium   → score 4–6, Access
//! 4. nothing  → score 3, General
//!
//! The score inside a bracket comes from a `ScoreDraw`, so callers choose
//! between random noise and a reproducible value.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::assessment::{first_words, Category, UrgencyAssessment};

const CRITICAL_KEYWORDS: &[&str] = &[
    "dialysis",
    "chemo",
    "oxygen",
    "emergency",
    "stuck",
    "trapped",
    "can't breathe",
    "cannot breathe",
    "difficulty breathing",
    "breathing difficulty",
    "trouble breathing",
    "heart",
    "stroke",
    "ambulance",
    "911",
];

const HIGH_KEYWORDS: &[&str] = &[
    "medicine",
    "meds",
    "doctor",
    "appointment",
    "medical",
    "wheelchair",
    "disabled",
    "elderly",
    "can't walk",
    "cannot walk",
    "mobility",
];

/// Subset of high-priority words that make a request Medical rather than Mobility.
const MEDICAL_KEYWORDS: &[&str] = &["medical", "doctor", "medicine"];

const MEDIUM_KEYWORDS: &[&str] = &["mailbox", "door", "driveway", "access", "need to leave"];

/// Inclusive score brackets per tier.
pub const CRITICAL_RANGE: (u8, u8) = (9, 10);
pub const HIGH_RANGE: (u8, u8) = (6, 8);
pub const MEDIUM_RANGE: (u8, u8) = (4, 6);
pub const DEFAULT_SCORE: u8 = 3;

/// Which keyword set a request text fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Critical,
    High { medical: bool },
    Medium,
    Default,
}

impl Tier {
    pub fn category(&self) -> Category {
        match self {
            Tier::Critical => Category::Medical,
            Tier::High { medical: true } => Category::Medical,
            Tier::High { medical: false } => Category::Mobility,
            Tier::Medium => Category::Access,
            Tier::Default => Category::General,
        }
    }

    pub fn score_range(&self) -> (u8, u8) {
        match self {
            Tier::Critical => CRITICAL_RANGE,
            Tier::High { .. } => HIGH_RANGE,
            Tier::Medium => MEDIUM_RANGE,
            Tier::Default => (DEFAULT_SCORE, DEFAULT_SCORE),
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Tier::Critical)
    }
}

/// Classifies already lower-cased search text into a tier.
pub fn match_tier(text: &str) -> Tier {
    let contains_any = |set: &[&str]| set.iter().any(|kw| text.contains(kw));

    if contains_any(CRITICAL_KEYWORDS) {
        Tier::Critical
    } else if contains_any(HIGH_KEYWORDS) {
        Tier::High {
            medical: contains_any(MEDICAL_KEYWORDS),
        }
    } else if contains_any(MEDIUM_KEYWORDS) {
        Tier::Medium
    } else {
        Tier::Default
    }
}

/// Builds the single search text the keyword sets are matched against.
pub fn search_text(title: &str, body: &str) -> String {
    format!("{title} {body}").to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Score draws
// ────────────────────────────────────────────────────────────────────────────

/// Picks a score inside an inclusive bracket.
pub trait ScoreDraw: Send + Sync {
    fn draw(&self, low: u8, high: u8) -> u8;
}

/// Uniform draw from a seedable RNG.
pub struct RandomDraw {
    rng: Mutex<StdRng>,
}

impl RandomDraw {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ScoreDraw for RandomDraw {
    fn draw(&self, low: u8, high: u8) -> u8 {
        if low >= high {
            return low;
        }
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(low..=high)
    }
}

/// Always returns the lower midpoint of the bracket: 9, 7, 5.
pub struct MidpointDraw;

impl ScoreDraw for MidpointDraw {
    fn draw(&self, low: u8, high: u8) -> u8 {
        low + (high.saturating_sub(low)) / 2
    }
}

/// How scores inside a bracket are chosen (`TRIAGE_SCORE_MODE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreMode {
    #[default]
    Random,
    Midpoint,
}

impl std::str::FromStr for ScoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(ScoreMode::Random),
            "midpoint" => Ok(ScoreMode::Midpoint),
            other => Err(format!("unknown score mode '{other}' (expected random|midpoint)")),
        }
    }
}

/// Builds the draw policy for a mode. A seed only affects `Random`.
pub fn build_score_draw(mode: ScoreMode, seed: Option<u64>) -> Box<dyn ScoreDraw> {
    match (mode, seed) {
        (ScoreMode::Midpoint, _) => Box::new(MidpointDraw),
        (ScoreMode::Random, Some(seed)) => Box::new(RandomDraw::seeded(seed)),
        (ScoreMode::Random, None) => Box::new(RandomDraw::from_entropy()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback classification
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-based urgency assessment. Never fails.
pub fn classify_keywords(title: &str, body: &str, draw: &dyn ScoreDraw) -> UrgencyAssessment {
    let tier = match_tier(&search_text(title, body));
    let (low, high) = tier.score_range();

    UrgencyAssessment {
        urgency_score: draw.draw(low, high).clamp(low, high),
        category: tier.category(),
        summary: keyword_summary(title, body),
        is_critical: tier.is_critical(),
    }
}

/// First five words of the title, or of the body when the title is blank.
fn keyword_summary(title: &str, body: &str) -> String {
    if title.trim().is_empty() {
        first_words(body)
    } else {
        first_words(title)
    }
}
