pub mod assistants;
pub mod audio;
pub mod files;

mod context;

pub(crate) use context::ApiContext;
