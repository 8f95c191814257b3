use anyhow::{Context, Result};
use async_trait::async_trait;

/// Resource ID the token must be scoped to (Azure DevOps).
const AZURE_DEVOPS_RESOURCE: &str = "499b84ac-1321-427f-aa17-267ca6975798";

/// Source of short-lived bearer tokens. Abstracted so tests can substitute a
/// stub instead of invoking the real credential CLI.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Fetches tokens by shelling out to the `az` CLI. Requires `az login` to
/// have been run beforehand.
pub struct AzCliTokenProvider;

#[async_trait]
impl TokenProvider for AzCliTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let output = tokio::process::Command::new("az")
            .args([
                "account",
                "get-access-token",
                "--resource",
                AZURE_DEVOPS_RESOURCE,
                "--query",
                "accessToken",
                "-o",
                "tsv",
            ])
            .output()
            .await
            .context("Failed to run az CLI")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("az account get-access-token failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Stub provider handing out a fixed token, or failing on demand.
    pub struct StubTokenProvider {
        token: String,
        should_fail: bool,
    }

    impl StubTokenProvider {
        pub fn new(token: &str) -> Self {
            Self {
                token: token.to_string(),
                should_fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                token: String::new(),
                should_fail: true,
            }
        }
    }

    #[async_trait]
    impl TokenProvider for StubTokenProvider {
        async fn access_token(&self) -> Result<String> {
            if self.should_fail {
                anyhow::bail!("Stub credential failure");
            }
            Ok(self.token.clone())
        }
    }

    #[tokio::test]
    async fn stub_provider_returns_token() {
        let provider = StubTokenProvider::new("tok-123");
        assert_eq!(provider.access_token().await.unwrap(), "tok-123");
    }

    #[tokio::test]
    async fn stub_provider_propagates_failure() {
        let provider = StubTokenProvider::failing();
        let err = provider.access_token().await.unwrap_err();
        assert!(err.to_string().contains("Stub credential failure"));
    }
}
