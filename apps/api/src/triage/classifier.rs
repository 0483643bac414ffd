//! External urgency classifiers.
//!
//! `Triage` holds an `Option<Arc<dyn UrgencyClassifier>>`. Implement the trait
//! to plug in a different backend without touching handlers or the store.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::llm_client::prompts::json_system;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::assessment::{
    first_words, Category, UrgencyAssessment, MAX_URGENCY, MIN_URGENCY,
};
use crate::models::job::Request;
use crate::triage::prompts::{build_triage_prompt, TRIAGE_SYSTEM};

#[async_trait]
pub trait UrgencyClassifier: Send + Sync {
    /// Short backend label, e.g. "llm".
    fn name(&self) -> &'static str;

    async fn classify(&self, request: &Request) -> Result<UrgencyAssessment, LlmError>;
}

/// Urgency classifier backed by Claude, acting as an emergency dispatcher.
pub struct LlmUrgencyClassifier {
    llm: LlmClient,
    system: String,
}

impl LlmUrgencyClassifier {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: json_system(TRIAGE_SYSTEM),
        }
    }
}

#[async_trait]
impl UrgencyClassifier for LlmUrgencyClassifier {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn classify(&self, request: &Request) -> Result<UrgencyAssessment, LlmError> {
        let prompt = build_triage_prompt(&request.title, &request.location, &request.body);
        let raw: RawAssessment = self.llm.call_json(&prompt, &self.system).await?;
        debug!(?raw, "LLM triage answer");
        raw.validate()
    }
}

/// Assessment exactly as the model returned it, before range checks.
#[derive(Debug, Deserialize)]
pub struct RawAssessment {
    pub urgency_score: i64,
    pub category: Category,
    pub summary: String,
    pub is_critical: bool,
}

impl RawAssessment {
    /// Rejects out-of-range scores and trims the summary to five words.
    pub fn validate(self) -> Result<UrgencyAssessment, LlmError> {
        let range = i64::from(MIN_URGENCY)..=i64::from(MAX_URGENCY);
        if !range.contains(&self.urgency_score) {
            return Err(LlmError::InvalidOutput(format!(
                "urgency_score {} outside {MIN_URGENCY}..={MAX_URGENCY}",
                self.urgency_score
            )));
        }

        let summary = first_words(&self.summary);
        if summary.is_empty() {
            return Err(LlmError::InvalidOutput("summary is empty".to_string()));
        }

        Ok(UrgencyAssessment {
            urgency_score: self.urgency_score as u8,
            category: self.category,
            summary,
            is_critical: self.is_critical,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_text;

    fn parse(text: &str) -> Result<UrgencyAssessment, LlmError> {
        parse_json_text::<RawAssessment>(text)?.validate()
    }

    #[test]
    fn test_parses_plain_json() {
        let assessment = parse(
            r#"{"urgency_score": 9, "category": "Medical", "summary": "Dialysis patient snowed in", "is_critical": true}"#,
        )
        .unwrap();
        assert_eq!(assessment.urgency_score, 9);
        assert_eq!(assessment.category, Category::Medical);
        assert!(assessment.is_critical);
        assert_eq!(assessment.summary, "Dialysis patient snowed in");
    }

    #[test]
    fn test_parses_fenced_json_with_language_tag() {
        let text = "```json\n{\"urgency_score\": 5, \"category\": \"access\", \"summary\": \"Blocked door\", \"is_critical\": false}\n```";
        let assessment = parse(text).unwrap();
        assert_eq!(assessment.category, Category::Access);
        assert_eq!(assessment.urgency_score, 5);
    }

    #[test]
    fn test_accepts_mixed_case_category() {
        let text = r#"{"urgency_score": 8, "category": "MeDiCal", "summary": "Insulin run needed", "is_critical": false}"#;
        let assessment = parse(text).unwrap();
        assert_eq!(assessment.category, Category::Medical);

        let text = r#"{"urgency_score": 4, "category": "ACCESS ", "summary": "Door blocked", "is_critical": false}"#;
        assert_eq!(parse(text).unwrap().category, Category::Access);
    }

    #[test]
    fn test_rejects_score_out_of_range() {
        for score in [0, 11, -3] {
            let text = format!(
                r#"{{"urgency_score": {score}, "category": "General", "summary": "x", "is_critical": false}}"#
            );
            assert!(matches!(parse(&text), Err(LlmError::InvalidOutput(_))));
        }
    }

    #[test]
    fn test_rejects_missing_field() {
        let text = r#"{"urgency_score": 4, "category": "Access", "summary": "Door"}"#;
        assert!(matches!(parse(text), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let text = r#"{"urgency_score": 4, "category": "Pending", "summary": "Door", "is_critical": false}"#;
        assert!(matches!(parse(text), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_rejects_blank_summary() {
        let text = r#"{"urgency_score": 4, "category": "Access", "summary": "  ", "is_critical": false}"#;
        assert!(matches!(parse(text), Err(LlmError::InvalidOutput(_))));
    }

    #[test]
    fn test_long_summary_is_truncated() {
        let text = r#"{"urgency_score": 6, "category": "Mobility", "summary": "Elderly resident needs path to the street cleared", "is_critical": false}"#;
        let assessment = parse(text).unwrap();
        assert_eq!(assessment.summary, "Elderly resident needs path to");
    }
}
