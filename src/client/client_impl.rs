use crate::auth::AuthManager;
use crate::client::{AssistantsClient, AssistantsConfig};
use crate::services::assistants::{
    AssistantService, AssistantServiceImpl, MessageService, MessageServiceImpl, PollerConfig,
    RunPoller, RunService, RunServiceImpl, RunStreamer, ThreadService, ThreadServiceImpl,
    VectorStoreService, VectorStoreServiceImpl, VectorStoreWaiter,
};
use crate::services::{
    audio::{AudioService, AudioServiceImpl},
    files::{FileService, FileServiceImpl},
};
use crate::transport::{HttpTransport, RetryingTransport};
use std::sync::Arc;

pub struct AssistantsClientImpl {
    config: AssistantsConfig,

    assistants_service: AssistantServiceImpl,
    threads_service: ThreadServiceImpl,
    messages_service: Arc<dyn MessageService>,
    runs_service: Arc<dyn RunService>,
    vector_stores_service: Arc<dyn VectorStoreService>,
    files_service: Arc<dyn FileService>,
    audio_service: AudioServiceImpl,

    run_poller: RunPoller,
    run_streamer: RunStreamer,
    vector_store_waiter: VectorStoreWaiter,
}

impl AssistantsClientImpl {
    pub fn new(
        config: AssistantsConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
    ) -> Self {
        let transport = RetryingTransport::new(transport, config.retry.clone());

        let assistants_service = AssistantServiceImpl::new(transport.clone(), auth_manager.clone());
        let threads_service = ThreadServiceImpl::new(transport.clone(), auth_manager.clone());
        let messages_service: Arc<dyn MessageService> = Arc::new(MessageServiceImpl::new(
            transport.clone(),
            auth_manager.clone(),
            config.busy_thread_retry_delay,
        ));
        let runs_service: Arc<dyn RunService> =
            Arc::new(RunServiceImpl::new(transport.clone(), auth_manager.clone()));
        let files_service: Arc<dyn FileService> =
            Arc::new(FileServiceImpl::new(transport.clone(), auth_manager.clone()));
        let vector_stores_service: Arc<dyn VectorStoreService> =
            Arc::new(VectorStoreServiceImpl::new(
                transport.clone(),
                auth_manager.clone(),
                files_service.clone(),
            ));
        let audio_service = AudioServiceImpl::new(transport.clone(), auth_manager.clone());

        let run_poller = RunPoller::new(
            runs_service.clone(),
            PollerConfig {
                interval: config.poll_interval,
            },
        );
        let run_streamer = RunStreamer::new(
            transport,
            auth_manager,
            messages_service.clone(),
            config.stream_timeout,
        );
        let vector_store_waiter = VectorStoreWaiter::new(vector_stores_service.clone());

        Self {
            config,
            assistants_service,
            threads_service,
            messages_service,
            runs_service,
            vector_stores_service,
            files_service,
            audio_service,
            run_poller,
            run_streamer,
            vector_store_waiter,
        }
    }
}

impl AssistantsClient for AssistantsClientImpl {
    fn config(&self) -> &AssistantsConfig {
        &self.config
    }

    fn assistants(&self) -> &dyn AssistantService {
        &self.assistants_service
    }

    fn threads(&self) -> &dyn ThreadService {
        &self.threads_service
    }

    fn messages(&self) -> &dyn MessageService {
        self.messages_service.as_ref()
    }

    fn runs(&self) -> &dyn RunService {
        self.runs_service.as_ref()
    }

    fn vector_stores(&self) -> &dyn VectorStoreService {
        self.vector_stores_service.as_ref()
    }

    fn files(&self) -> &dyn FileService {
        self.files_service.as_ref()
    }

    fn audio(&self) -> &dyn AudioService {
        &self.audio_service
    }

    fn run_poller(&self) -> &RunPoller {
        &self.run_poller
    }

    fn run_streamer(&self) -> &RunStreamer {
        &self.run_streamer
    }

    fn vector_store_waiter(&self) -> &VectorStoreWaiter {
        &self.vector_store_waiter
    }
}

impl std::fmt::Debug for AssistantsClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantsClientImpl")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
