//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;

/// Deterministic text provider: echoes the prompt back. Disabled, it
/// fails the way an unconfigured upstream does.
pub struct MockTextProvider {
    enabled: bool,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn send_message(&self, prompt: &str) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        Ok(format!("Mock response for: {}", prompt))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enabled_mock_echoes_prompt() {
        let provider = MockTextProvider::new(true);
        let reply = provider.send_message("hello").await.unwrap();
        assert!(reply.contains("hello"));
    }

    #[tokio::test]
    async fn disabled_mock_reports_not_configured() {
        let provider = MockTextProvider::new(false);
        let err = provider.send_message("hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
