use std::sync::Arc;

use futflare_engine::{QueryLocation, QueryState};
use futflare_types::{Capsule, CapsulePage};

use crate::api::{CapsuleApi, ObjectStore};
use crate::auth::{CredentialProvider, EnvToken, StaticToken};
use crate::composer::Composer;
use crate::config::Config;
use crate::error::FetchError;
use crate::http::HttpTransport;
use crate::listing::Listing;
use crate::ports::{LogNotifier, Navigator, Notifier, NoopNavigator};
use crate::submission::SubmissionController;
use crate::upload::UploadGateway;
use crate::{Error, Result};

/// Entry point tying the transport, collaborators and controllers together.
pub struct Futflare {
    api: Arc<dyn CapsuleApi>,
    store: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    submission: Arc<SubmissionController>,
}

impl Futflare {
    pub fn builder() -> FutflareBuilder {
        FutflareBuilder::default()
    }

    /// Build against the HTTP backend described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn api(&self) -> &Arc<dyn CapsuleApi> {
        &self.api
    }

    /// A fresh composer session.
    pub fn composer(&self) -> Composer {
        Composer::new(self.gateway(), Arc::clone(&self.notifier))
    }

    pub fn gateway(&self) -> UploadGateway {
        UploadGateway::new(Arc::clone(&self.api), Arc::clone(&self.store))
    }

    /// The shared submission controller. Every caller gets the same one, so
    /// duplicate submits collapse into the request already outstanding.
    pub fn submission(&self) -> Arc<SubmissionController> {
        Arc::clone(&self.submission)
    }

    pub fn listing<L: QueryLocation>(&self, location: L) -> Listing<L> {
        Listing::new(location, Arc::clone(&self.api), Arc::clone(&self.navigator))
    }

    /// One page of capsules for `query`, outside any listing session.
    pub async fn list(&self, query: &QueryState) -> std::result::Result<CapsulePage, FetchError> {
        self.api.list_capsules(query).await.map_err(|err| self.route_fetch_error(err.into()))
    }

    /// A single capsule. Failures route to the error view.
    pub async fn capsule(&self, id: &str) -> std::result::Result<Capsule, FetchError> {
        self.api.get_capsule(id).await.map_err(|err| self.route_fetch_error(err.into()))
    }

    fn route_fetch_error(&self, err: FetchError) -> FetchError {
        tracing::error!(error = %err, "fetch failed");
        self.navigator.open_error(&err.to_string());
        err
    }
}

#[derive(Default)]
pub struct FutflareBuilder {
    config: Config,
    credentials: Option<Arc<dyn CredentialProvider>>,
    api: Option<Arc<dyn CapsuleApi>>,
    store: Option<Arc<dyn ObjectStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl FutflareBuilder {
    pub fn config(mut self, config: &Config) -> Self {
        self.config = config.clone();
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Replace the HTTP backend for API calls.
    pub fn api(mut self, api: Arc<dyn CapsuleApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Replace the HTTP backend for storage uploads.
    pub fn store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn build(self) -> Result<Futflare> {
        let (api, store) = match (self.api, self.store) {
            (Some(api), Some(store)) => (api, store),
            (api, store) => {
                let credentials = self
                    .credentials
                    .unwrap_or_else(|| default_credentials(&self.config));
                let transport = Arc::new(HttpTransport::new(
                    self.config.server_url()?,
                    Some(credentials),
                )
                .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?);
                (
                    api.unwrap_or_else(|| transport.clone() as Arc<dyn CapsuleApi>),
                    store.unwrap_or_else(|| transport as Arc<dyn ObjectStore>),
                )
            }
        };

        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator));
        let submission = Arc::new(SubmissionController::new(
            Arc::clone(&api),
            Arc::clone(&notifier),
            Arc::clone(&navigator),
        ));

        Ok(Futflare {
            api,
            store,
            notifier,
            navigator,
            submission,
        })
    }
}

fn default_credentials(config: &Config) -> Arc<dyn CredentialProvider> {
    match &config.auth.token {
        Some(token) => Arc::new(StaticToken::new(token.clone())),
        None => Arc::new(EnvToken::new(config.auth.token_env.clone())),
    }
}
