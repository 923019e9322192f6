mod completion;
pub mod prompt;

pub use completion::{CompletionError, CompletionRequest, OpenAiCompletionClient, TextCompletion};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::config::CompletionConfig;

use super::domain::LoanApplication;
use super::evaluation::{CriteriaEvaluation, Decision};

/// Returned whenever the completion provider cannot produce a rationale.
pub const EXPLANATION_FALLBACK: &str = "Explanation not available";

/// Knobs passed to the completion provider for every rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl From<&CompletionConfig> for ExplanationSettings {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: config.timeout,
        }
    }
}

/// Phrases a short rationale for a decision through an injected completion provider.
#[derive(Clone)]
pub struct ExplanationGenerator {
    completion: Arc<dyn TextCompletion>,
    settings: ExplanationSettings,
}

impl ExplanationGenerator {
    pub fn new(completion: Arc<dyn TextCompletion>, settings: ExplanationSettings) -> Self {
        Self {
            completion,
            settings,
        }
    }

    /// Never fails: provider errors and timeouts are logged and replaced by
    /// [`EXPLANATION_FALLBACK`].
    pub async fn generate(
        &self,
        application: &LoanApplication,
        decision: Decision,
        evaluation: &CriteriaEvaluation,
    ) -> String {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt: prompt::render_prompt(application, decision, evaluation),
            max_tokens: self.settings.max_tokens,
        };

        match self.request_completion(&request).await {
            Ok(text) => {
                debug!(application_id = %application.id, "explanation generated");
                prompt::condense(&text)
            }
            Err(err) => {
                error!(
                    application_id = %application.id,
                    error = %err,
                    "error generating explanation"
                );
                EXPLANATION_FALLBACK.to_string()
            }
        }
    }

    async fn request_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let timeout = self.settings.timeout;
        let text = tokio::time::timeout(timeout, self.completion.complete(request))
            .await
            .map_err(|_| CompletionError::Timeout(timeout))??;

        if text.trim().is_empty() {
            return Err(CompletionError::Malformed(
                "completion text was empty".to_string(),
            ));
        }
        Ok(text)
    }
}
