use crate::client::AssistantsConfig;
use crate::errors::{AssistantsError, AssistantsResult, AuthenticationError, ConfigurationError};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Header opting requests into the v2 Assistants API.
pub const ASSISTANTS_BETA_HEADER: &str = "OpenAI-Beta";
pub const ASSISTANTS_BETA_VALUE: &str = "assistants=v2";

/// Trait for managing authentication in requests
#[async_trait]
pub trait AuthManager: Send + Sync {
    /// Applies authentication headers to the request
    async fn apply_auth(&self, headers: &mut HeaderMap) -> AssistantsResult<()>;

    /// Validates the authentication configuration
    fn validate(&self) -> AssistantsResult<()>;
}

/// Bearer-token authentication with optional organization and project scoping.
pub struct BearerAuthManager {
    api_key: SecretString,
    organization_id: Option<String>,
    project_id: Option<String>,
}

impl BearerAuthManager {
    pub fn new(config: &AssistantsConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            organization_id: config.organization_id.clone(),
            project_id: config.project_id.clone(),
        }
    }

    pub fn from_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            organization_id: None,
            project_id: None,
        }
    }

    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

#[async_trait]
impl AuthManager for BearerAuthManager {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> AssistantsResult<()> {
        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret())).map_err(
                |_| {
                    AssistantsError::Authentication(AuthenticationError::InvalidApiKey(
                        "API key contains characters not allowed in a header".to_string(),
                    ))
                },
            )?;
        authorization.set_sensitive(true);
        headers.insert(http::header::AUTHORIZATION, authorization);

        if let Some(org_id) = &self.organization_id {
            headers.insert(
                "OpenAI-Organization",
                org_id.parse().map_err(|_| {
                    AssistantsError::Authentication(AuthenticationError::InvalidOrganizationId(
                        "Invalid organization ID format".to_string(),
                    ))
                })?,
            );
        }

        if let Some(project_id) = &self.project_id {
            headers.insert(
                "OpenAI-Project",
                project_id.parse().map_err(|_| {
                    AssistantsError::Authentication(AuthenticationError::InvalidProjectId(
                        "Invalid project ID format".to_string(),
                    ))
                })?,
            );
        }

        headers.insert(
            ASSISTANTS_BETA_HEADER,
            HeaderValue::from_static(ASSISTANTS_BETA_VALUE),
        );

        Ok(())
    }

    fn validate(&self) -> AssistantsResult<()> {
        let key = self.api_key.expose_secret();

        if key.is_empty() {
            return Err(AssistantsError::Configuration(
                ConfigurationError::MissingApiKey("API key is empty".to_string()),
            ));
        }

        if key.len() < 10 {
            return Err(AssistantsError::Configuration(
                ConfigurationError::InvalidApiKeyFormat(
                    "API key is too short (minimum 10 characters)".to_string(),
                ),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for BearerAuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuthManager")
            .field("api_key", &"[REDACTED]")
            .field("organization_id", &self.organization_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_auth_sets_all_headers() {
        let manager = BearerAuthManager::from_key("sk-test-key-123456")
            .with_organization_id("org-123")
            .with_project_id("proj_456");

        let mut headers = HeaderMap::new();
        manager.apply_auth(&mut headers).await.unwrap();

        assert_eq!(
            headers.get("authorization").unwrap(),
            "Bearer sk-test-key-123456"
        );
        assert!(headers.get("authorization").unwrap().is_sensitive());
        assert_eq!(headers.get("openai-organization").unwrap(), "org-123");
        assert_eq!(headers.get("openai-project").unwrap(), "proj_456");
        assert_eq!(headers.get("openai-beta").unwrap(), "assistants=v2");
    }

    #[tokio::test]
    async fn test_optional_headers_omitted() {
        let manager = BearerAuthManager::from_key("sk-test-key-123456");
        let mut headers = HeaderMap::new();
        manager.apply_auth(&mut headers).await.unwrap();

        assert!(headers.get("openai-organization").is_none());
        assert!(headers.get("openai-project").is_none());
    }

    #[test]
    fn test_validate_rejects_short_key() {
        assert!(BearerAuthManager::from_key("sk-short").validate().is_err());
        assert!(BearerAuthManager::from_key("").validate().is_err());
        assert!(BearerAuthManager::from_key("sk-test-key-123456")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let manager = BearerAuthManager::from_key("sk-test-key-123456");
        assert!(!format!("{:?}", manager).contains("sk-test"));
    }
}
