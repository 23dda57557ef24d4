use crate::models::Category;
use crate::taxonomy::{self, UNCATEGORIZED};
use providers::{CompletionRequest, LlmProvider, ProviderError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

pub const SYSTEM_ROLE: &str = "You are a helpful assistant that categorizes images.";
pub const DEFAULT_MAX_TOKENS: u32 = 60;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classification service error: {0}")]
    Provider(#[from] ProviderError),
}

pub fn build_prompt(title: &str, keywords: &[String]) -> String {
    let quoted = keywords
        .iter()
        .map(|k| format!("'{k}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let names = taxonomy::names().collect::<Vec<_>>().join(", ");
    format!(
        "Given the title '{title}' and keywords '[{quoted}]', select the most appropriate category from the list: {names}."
    )
}

#[derive(Clone)]
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
    max_tokens: u32,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }

    /// Asks the service once and maps its answer onto the taxonomy. A reply
    /// naming no category is `Ok(UNCATEGORIZED)`, not an error.
    pub async fn try_classify(
        &self,
        title: &str,
        keywords: &[String],
    ) -> Result<Category, ClassifyError> {
        let request = CompletionRequest {
            system: SYSTEM_ROLE.to_string(),
            prompt: build_prompt(title, keywords),
            max_tokens: self.max_tokens,
        };
        let completion = self.llm.complete(&request).await?;
        let text = completion.text.trim();
        debug!(response = text, "classification response");
        Ok(taxonomy::match_response(text).unwrap_or(UNCATEGORIZED))
    }

    pub async fn classify(&self, title: &str, keywords: &[String]) -> Category {
        match self.try_classify(title, keywords).await {
            Ok(category) => category,
            Err(e) => {
                error!("{e}");
                UNCATEGORIZED
            }
        }
    }
}
