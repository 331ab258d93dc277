//! Mock auth manager for testing

use crate::auth::{AuthManager, ASSISTANTS_BETA_HEADER, ASSISTANTS_BETA_VALUE};
use crate::errors::{AssistantsError, AssistantsResult, AuthenticationError};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};

#[derive(Debug, Clone, Default)]
pub struct MockAuthManager {
    fail: bool,
}

impl MockAuthManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// An auth manager whose every call fails.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl AuthManager for MockAuthManager {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> AssistantsResult<()> {
        if self.fail {
            return Err(AssistantsError::Authentication(
                AuthenticationError::InvalidApiKey("mock auth failure".to_string()),
            ));
        }
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer sk-mock-key"),
        );
        headers.insert(
            ASSISTANTS_BETA_HEADER,
            HeaderValue::from_static(ASSISTANTS_BETA_VALUE),
        );
        Ok(())
    }

    fn validate(&self) -> AssistantsResult<()> {
        Ok(())
    }
}
