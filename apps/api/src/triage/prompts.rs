// Prompt constants for urgency triage.

/// Role given to the model for every triage call.
pub const TRIAGE_SYSTEM: &str = "You are an experienced emergency dispatcher triaging \
    snow-removal help requests from residents during a winter storm. \
    Judge how urgently a volunteer must respond, prioritising medical needs, \
    people who are trapped, and residents with limited mobility.";

/// Triage prompt template. Replace `{title}`, `{location}` and `{body}` before sending.
pub const TRIAGE_PROMPT_TEMPLATE: &str = r#"Classify the following help request.

Return a JSON object with EXACTLY this shape (no extra fields):
{
  "urgency_score": 7,
  "category": "Medical",
  "summary": "Meds stuck in mailbox",
  "is_critical": false
}

Rules:
- urgency_score is an integer from 1 (can wait days) to 10 (life at risk).
- category is one of: "Medical", "Mobility", "Access", "General".
- summary is at most 5 words.
- is_critical is true only for a potential medical emergency (dialysis, oxygen, chemo,
  breathing difficulty, someone trapped) that needs the fastest possible response.

Request:
Title: {title}
Location: {location}
Details: {body}"#;

/// Fills the triage template with one request's fields.
pub fn build_triage_prompt(title: &str, location: &str, body: &str) -> String {
    TRIAGE_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{location}", location)
        .replace("{body}", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_triage_prompt_substitutes_all_fields() {
        let prompt = build_triage_prompt("Driveway blocked", "123 Maple St", "Need to get out");
        assert!(prompt.contains("Title: Driveway blocked"));
        assert!(prompt.contains("Location: 123 Maple St"));
        assert!(prompt.contains("Details: Need to get out"));
        assert!(!prompt.contains("{title}"));
        assert!(!prompt.contains("{location}"));
        assert!(!prompt.contains("{body}"));
    }
}
