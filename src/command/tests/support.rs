//! Shared fixtures for command unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::fixture;

use crate::command::{
    adapters::memory::{InMemoryConnectionState, RecordingErrorChannel},
    domain::{BoundArguments, CommandHandler, HandlerError, InvocationContext},
    services::{CoercionRegistry, CommandResolver},
};
use crate::tenant::TenantId;

pub type TestResolver = CommandResolver<InMemoryConnectionState, RecordingErrorChannel>;

/// Handler recording every call it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<(InvocationContext, BoundArguments)>>>,
}

impl RecordingHandler {
    pub fn calls(&self) -> Vec<(InvocationContext, BoundArguments)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn last_arguments(&self) -> BoundArguments {
        self.calls()
            .pop()
            .map(|(_, arguments)| arguments)
            .expect("handler should have been invoked")
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn invoke(
        &self,
        context: &InvocationContext,
        arguments: BoundArguments,
    ) -> Result<(), HandlerError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((context.clone(), arguments));
        Ok(())
    }
}

/// Handler that always fails.
#[derive(Debug, Clone, Copy)]
pub struct FailingHandler;

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn invoke(
        &self,
        _context: &InvocationContext,
        _arguments: BoundArguments,
    ) -> Result<(), HandlerError> {
        Err(HandlerError::new(std::io::Error::other("handler exploded")))
    }
}

pub struct ResolverHarness {
    pub resolver: TestResolver,
    pub state: Arc<InMemoryConnectionState>,
    pub errors: Arc<RecordingErrorChannel>,
}

#[fixture]
pub fn harness() -> ResolverHarness {
    let state = Arc::new(InMemoryConnectionState::new());
    let errors = Arc::new(RecordingErrorChannel::new());
    let resolver = CommandResolver::new(
        Arc::new(CoercionRegistry::new()),
        Arc::clone(&state),
        Arc::clone(&errors),
    );
    ResolverHarness {
        resolver,
        state,
        errors,
    }
}

pub fn tenant(raw: u64) -> TenantId {
    TenantId::new(raw).expect("non-zero tenant")
}
