use bytes::Bytes;
use serde::de::DeserializeOwned;

use super::HttpResponse;
use crate::errors::{AssistantsError, AssistantsResult, ErrorMapper};

pub struct ResponseParser;

impl ResponseParser {
    /// Maps a non-2xx response to the matching [`AssistantsError`].
    pub fn ensure_success(response: &HttpResponse) -> AssistantsResult<()> {
        if response.is_success() {
            Ok(())
        } else {
            Err(ErrorMapper::from_response(
                response.status,
                &response.headers,
                &response.body,
            ))
        }
    }

    pub fn parse_response<T: DeserializeOwned>(response: &HttpResponse) -> AssistantsResult<T> {
        Self::ensure_success(response)?;
        Self::parse_json(&response.body)
    }

    pub fn parse_bytes(response: HttpResponse) -> AssistantsResult<Bytes> {
        Self::ensure_success(&response)?;
        Ok(response.body)
    }

    pub fn parse_json<T: DeserializeOwned>(data: &[u8]) -> AssistantsResult<T> {
        serde_json::from_slice(data).map_err(|e| {
            AssistantsError::Deserialization(format!(
                "Failed to deserialize JSON: {}. Data: {}",
                e,
                ErrorMapper::body_excerpt(data)
            ))
        })
    }
}
