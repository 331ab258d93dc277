//! Sample API payloads shared by unit tests.

mod run_fixtures;
mod stream_fixtures;

pub use run_fixtures::*;
pub use stream_fixtures::*;
