use crate::auth::{AuthManager, BearerAuthManager};
use crate::client::{AssistantsClient, AssistantsClientImpl, AssistantsConfig};
use crate::errors::{AssistantsError, AssistantsResult, ConfigurationError};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;
use tracing::debug;

pub struct AssistantsClientBuilder {
    config: Option<AssistantsConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    auth_manager: Option<Arc<dyn AuthManager>>,
}

impl AssistantsClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            transport: None,
            auth_manager: None,
        }
    }

    pub fn with_config(mut self, config: AssistantsConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config = Some(AssistantsConfig::new(api_key));
        self
    }

    /// Reads the configuration from `OPENAI_API_KEY` and friends.
    pub fn from_env(mut self) -> AssistantsResult<Self> {
        self.config = Some(AssistantsConfig::from_env()?);
        Ok(self)
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_auth_manager(mut self, auth_manager: Arc<dyn AuthManager>) -> Self {
        self.auth_manager = Some(auth_manager);
        self
    }

    pub fn build(self) -> AssistantsResult<Arc<dyn AssistantsClient>> {
        let config = self.config.ok_or_else(|| {
            AssistantsError::Configuration(ConfigurationError::MissingApiKey(
                "API key must be provided".to_string(),
            ))
        })?;
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };

        let auth_manager = match self.auth_manager {
            Some(auth_manager) => auth_manager,
            None => Arc::new(BearerAuthManager::new(&config)),
        };
        auth_manager.validate()?;

        debug!(base_url = %config.base_url, "Building assistants client");
        Ok(Arc::new(AssistantsClientImpl::new(
            config,
            transport,
            auth_manager,
        )))
    }
}

impl Default for AssistantsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
