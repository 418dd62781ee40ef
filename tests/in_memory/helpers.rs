//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use cogwheel::command::{
    adapters::{channel::QueueErrorChannel, memory::InMemoryConnectionState},
    domain::CommandOption,
    services::{CoercionRegistry, CommandResolver},
};
use cogwheel::tenant::TenantId;
use cogwheel::trigger::{
    adapters::memory::InMemoryTriggerStore,
    services::{AutoReplyService, TriggerCache},
};
use mockable::DefaultClock;
use tokio::sync::mpsc;

/// Resolver wired to a queue-backed error channel.
pub type QueueResolver = CommandResolver<InMemoryConnectionState, QueueErrorChannel>;

/// Auto-reply service over the in-memory store.
pub type MemoryAutoReply = AutoReplyService<InMemoryTriggerStore, DefaultClock>;

/// Bot account identifier used by every test.
pub const BOT_USER_ID: u64 = 4_242;

/// Builds a tenant identifier for tests.
pub fn tenant(raw: u64) -> TenantId {
    TenantId::new(raw).expect("test tenants are non-zero")
}

/// Builds a resolver and the receiving end of its error queue.
pub fn queue_resolver() -> (
    QueueResolver,
    mpsc::UnboundedReceiver<cogwheel::command::ports::CommandErrorEvent>,
) {
    let (errors, receiver) = QueueErrorChannel::new();
    let resolver = CommandResolver::new(
        Arc::new(CoercionRegistry::new()),
        Arc::new(InMemoryConnectionState::new()),
        Arc::new(errors),
    );
    (resolver, receiver)
}

/// Loads an auto-reply service from `store`.
pub async fn auto_reply_service(store: Arc<InMemoryTriggerStore>) -> MemoryAutoReply {
    let cache = TriggerCache::load(store, Arc::new(DefaultClock))
        .await
        .expect("in-memory cache loads");
    AutoReplyService::new(Arc::new(cache), BOT_USER_ID)
}

/// Builds `command <subcommand> <values...>` as string options.
pub fn manage(subcommand: &str, values: &[(&str, &str)]) -> CommandOption {
    CommandOption::group(
        "command",
        CommandOption::subcommand(
            subcommand,
            values.iter().map(|(name, value)| {
                CommandOption::value(
                    *name,
                    cogwheel::command::domain::OptionKind::String,
                    *value,
                )
            }),
        ),
    )
}
