//! Shared fixtures for trigger unit tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;

use crate::tenant::TenantId;
use crate::trigger::{
    adapters::memory::InMemoryTriggerStore,
    domain::{TriggerKey, TriggerRecord, TriggerReply, TriggerText},
    services::{AutoReplyService, TriggerCache},
};

pub type TestCache = TriggerCache<InMemoryTriggerStore, DefaultClock>;
pub type TestService = AutoReplyService<InMemoryTriggerStore, DefaultClock>;

pub const BOT_USER_ID: u64 = 999;

pub fn tenant(raw: u64) -> TenantId {
    TenantId::new(raw).expect("test tenants are non-zero")
}

pub fn text(value: &str) -> TriggerText {
    TriggerText::new(value).expect("test triggers are non-blank")
}

pub fn reply(content: &str, partial: bool) -> TriggerReply {
    TriggerReply::new(content, partial).expect("test replies are non-blank")
}

pub fn record(tenant_id: u64, trigger: &str, content: &str, partial: bool) -> TriggerRecord {
    TriggerRecord::new(
        TriggerKey::new(tenant(tenant_id), text(trigger)),
        reply(content, partial),
        &DefaultClock,
    )
}

pub struct CacheHarness {
    pub store: Arc<InMemoryTriggerStore>,
    pub cache: Arc<TestCache>,
}

#[fixture]
pub fn harness() -> CacheHarness {
    let store = Arc::new(InMemoryTriggerStore::new());
    let cache = Arc::new(TriggerCache::new(Arc::clone(&store), Arc::new(DefaultClock)));
    CacheHarness { store, cache }
}

#[fixture]
pub fn service(harness: CacheHarness) -> TestService {
    AutoReplyService::new(harness.cache, BOT_USER_ID)
}
