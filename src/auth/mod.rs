mod auth_manager;

pub use auth_manager::{AuthManager, BearerAuthManager, ASSISTANTS_BETA_HEADER, ASSISTANTS_BETA_VALUE};
