use async_trait::async_trait;
use reqwest::RequestBuilder;

/// Source of the bearer credential attached to API calls.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> anyhow::Result<String>;
}

/// A token fixed at construction time.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(********)")
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn access_token(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Reads the token from an environment variable on every request, so a
/// refreshed token is picked up without restarting.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl CredentialProvider for EnvToken {
    async fn access_token(&self) -> anyhow::Result<String> {
        let token = std::env::var(&self.var)
            .map_err(|e| anyhow::anyhow!("{} is not available: {}", self.var, e))?;
        if token.trim().is_empty() {
            anyhow::bail!("{} is empty", self.var);
        }
        Ok(token)
    }
}

/// Attach the bearer credential to `request`.
///
/// Fails open: when the provider cannot produce a token the request goes out
/// without one and the server decides. The failure is logged.
pub async fn with_auth(
    request: RequestBuilder,
    credentials: Option<&dyn CredentialProvider>,
) -> RequestBuilder {
    let Some(provider) = credentials else {
        return request;
    };

    match provider.access_token().await {
        Ok(token) => request.bearer_auth(token),
        Err(err) => {
            tracing::warn!(error = %err, "could not obtain access token, sending request unauthenticated");
            request
        }
    }
}
