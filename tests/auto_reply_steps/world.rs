//! Shared world state for auto-reply BDD scenarios.

use std::sync::Arc;

use cogwheel::tenant::TenantId;
use cogwheel::trigger::{
    adapters::memory::InMemoryTriggerStore,
    services::{AutoReplyError, AutoReplyService, TriggerCache},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestAutoReplyService = AutoReplyService<InMemoryTriggerStore, DefaultClock>;

/// Identifier the bot posts under.
pub const BOT_USER_ID: u64 = 1_000;

/// Identifier of the member posting messages.
pub const MEMBER_ID: u64 = 2_000;

/// Scenario world for auto-reply behaviour tests.
pub struct AutoReplyWorld {
    /// The service under test.
    pub service: TestAutoReplyService,
    /// Tenant every step acts on.
    pub tenant: Option<TenantId>,
    /// Reply to the last posted message, if one was posted.
    pub last_reply: Option<Option<String>>,
    /// Result of the last registration.
    pub last_set_result: Option<Result<(), AutoReplyError>>,
    /// Result of the last deletion.
    pub last_delete_result: Option<Result<(), AutoReplyError>>,
}

impl AutoReplyWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let cache = TriggerCache::new(
            Arc::new(InMemoryTriggerStore::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service: AutoReplyService::new(Arc::new(cache), BOT_USER_ID),
            tenant: None,
            last_reply: None,
            last_set_result: None,
            last_delete_result: None,
        }
    }

    /// Tenant selected by the background step.
    ///
    /// # Errors
    ///
    /// Returns an error when no tenant was selected.
    pub fn tenant(&self) -> Result<TenantId, eyre::Report> {
        self.tenant
            .ok_or_else(|| eyre::eyre!("no tenant selected in scenario world"))
    }
}

impl Default for AutoReplyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AutoReplyWorld {
    AutoReplyWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
