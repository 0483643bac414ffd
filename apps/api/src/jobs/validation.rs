use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::Request;

/// Help request as posted by the form. Every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub body: String,
}

/// Rejects submissions with a blank title, location, or body.
/// Runs before triage, so an invalid form never reaches the classifier.
pub fn validate_submission(form: SubmitRequest) -> Result<Request, AppError> {
    let missing: Vec<&str> = [
        ("title", &form.title),
        ("location", &form.location),
        ("body", &form.body),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Please fill in all fields (missing: {})",
            missing.join(", ")
        )));
    }

    Ok(Request {
        title: form.title.trim().to_string(),
        location: form.location.trim().to_string(),
        body: form.body.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, location: &str, body: &str) -> SubmitRequest {
        SubmitRequest {
            title: title.to_string(),
            location: location.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_complete_form_passes_and_is_trimmed() {
        let request =
            validate_submission(form(" Driveway blocked ", "123 Maple St", "Need out\n")).unwrap();
        assert_eq!(request.title, "Driveway blocked");
        assert_eq!(request.body, "Need out");
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let err = validate_submission(form("Help", "  ", "")).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("location"));
                assert!(msg.contains("body"));
                assert!(!msg.contains("title"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_all_blank_rejected() {
        assert!(validate_submission(SubmitRequest::default()).is_err());
    }
}
