use crate::{Completion, CompletionRequest, LlmProvider, ProviderError};

/// Stand-in used when no API key is configured.
#[derive(Debug, Default)]
pub struct NoopProvider;

#[async_trait::async_trait]
impl LlmProvider for NoopProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}
