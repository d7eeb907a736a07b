use crate::{
    config::RuntimeConfiguration,
    context::{CallContext, CancelHandle},
    service::StudentService,
    store::StudentStore,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct RosterState {
    service: StudentService,
    config: RuntimeConfiguration,
    root_context: CallContext,
    shutdown: Arc<CancelHandle>,
}

impl RosterState {
    pub fn new(store: Arc<dyn StudentStore>, config: RuntimeConfiguration) -> Self {
        let (root_context, shutdown) = CallContext::background().with_cancel();

        Self {
            service: StudentService::new(store),
            config,
            root_context,
            shutdown: Arc::new(shutdown),
        }
    }

    pub const fn service(&self) -> &StudentService {
        &self.service
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    /// A fresh context for one request: cancelled on shutdown, with the configured timeout if any.
    pub fn call_context(&self) -> CallContext {
        let ctx = self.root_context.clone();
        match self.config.server_config().request_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }
    }

    /// Cancels every outstanding and future [`CallContext`] handed out by this state.
    pub fn sensible_shutdown(&self) {
        self.shutdown.cancel();
    }
}
