//! Mock implementations for testing
//!
//! In-memory stand-ins for the transport and auth seams so services and the
//! run lifecycle components can be tested without network access.

mod mock_auth;
mod mock_transport;

pub use mock_auth::MockAuthManager;
pub use mock_transport::{MockHttpTransport, RecordedRequest};
