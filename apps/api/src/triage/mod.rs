//! Urgency triage — turns a free-text help request into an `UrgencyAssessment`.
//!
//! The external classifier is a capability detected once at startup. When it
//! is absent, fails, times out, or answers with malformed JSON, the keyword
//! fallback produces the assessment instead. `assess` never fails.

pub mod classifier;
pub mod keywords;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::LlmError;
use crate::models::assessment::{TriageSource, UrgencyAssessment};
use crate::models::job::Request;
use crate::triage::classifier::UrgencyClassifier;
use crate::triage::keywords::{classify_keywords, ScoreDraw};

/// An assessment together with the path that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Triaged {
    pub assessment: UrgencyAssessment,
    pub source: TriageSource,
}

/// Triage service shared by all handlers.
#[derive(Clone)]
pub struct Triage {
    classifier: Option<Arc<dyn UrgencyClassifier>>,
    draw: Arc<dyn ScoreDraw>,
    deadline: Duration,
}

impl Triage {
    pub fn new(
        classifier: Option<Arc<dyn UrgencyClassifier>>,
        draw: Arc<dyn ScoreDraw>,
        deadline: Duration,
    ) -> Self {
        Self {
            classifier,
            draw,
            deadline,
        }
    }

    /// Keyword-only triage.
    pub fn keyword_only(draw: Arc<dyn ScoreDraw>) -> Self {
        Self::new(None, draw, Duration::ZERO)
    }

    /// Label of the primary backend: the classifier name, or "keyword".
    pub fn backend(&self) -> &'static str {
        self.classifier
            .as_ref()
            .map(|c| c.name())
            .unwrap_or(TriageSource::Keyword.as_str())
    }

    /// Assesses a request, preferring the external classifier when configured.
    pub async fn assess(&self, request: &Request) -> Triaged {
        if let Some(classifier) = &self.classifier {
            match self.try_classifier(classifier.as_ref(), request).await {
                Ok(assessment) => {
                    info!(
                        backend = classifier.name(),
                        score = assessment.urgency_score,
                        "Request triaged"
                    );
                    return Triaged {
                        assessment,
                        source: TriageSource::Llm,
                    };
                }
                Err(e) => {
                    warn!("Classifier '{}' failed, using keyword triage: {e}", classifier.name());
                }
            }
        }

        let assessment = self.fallback(request);
        info!(
            backend = TriageSource::Keyword.as_str(),
            score = assessment.urgency_score,
            "Request triaged"
        );
        Triaged {
            assessment,
            source: TriageSource::Keyword,
        }
    }

    /// The deterministic keyword path, independent of any classifier.
    pub fn fallback(&self, request: &Request) -> UrgencyAssessment {
        classify_keywords(&request.title, &request.body, self.draw.as_ref())
    }

    async fn try_classifier(
        &self,
        classifier: &dyn UrgencyClassifier,
        request: &Request,
    ) -> Result<UrgencyAssessment, LlmError> {
        tokio::time::timeout(self.deadline, classifier.classify(request))
            .await
            .map_err(|_| LlmError::Timeout(self.deadline))?
    }
}
