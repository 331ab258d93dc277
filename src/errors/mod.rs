mod categories;
mod error;
mod mapping;

pub use categories::{
    AuthenticationError, ConfigurationError, NetworkError, RateLimitError, RunFailure,
    ServerError, ValidationError, VectorStoreFailure,
};
pub use error::{AssistantsError, AssistantsResult};
pub use mapping::{ApiErrorDetail, ApiErrorResponse, ErrorMapper, MAX_BODY_EXCERPT};
