mod client_impl;
mod config;
mod factory;

pub use client_impl::AssistantsClientImpl;
pub use config::{AssistantsConfig, DEFAULT_BASE_URL};
pub use factory::AssistantsClientBuilder;

use crate::services::assistants::{
    AssistantService, MessageService, RunPoller, RunService, RunStreamer, ThreadService,
    VectorStoreService, VectorStoreWaiter,
};
use crate::services::{audio::AudioService, files::FileService};

/// Entry point to every Assistants API operation.
pub trait AssistantsClient: Send + Sync {
    fn config(&self) -> &AssistantsConfig;

    fn assistants(&self) -> &dyn AssistantService;
    fn threads(&self) -> &dyn ThreadService;
    fn messages(&self) -> &dyn MessageService;
    fn runs(&self) -> &dyn RunService;
    fn vector_stores(&self) -> &dyn VectorStoreService;
    fn files(&self) -> &dyn FileService;
    fn audio(&self) -> &dyn AudioService;

    fn run_poller(&self) -> &RunPoller;
    fn run_streamer(&self) -> &RunStreamer;
    fn vector_store_waiter(&self) -> &VectorStoreWaiter;
}
