//! Unit tests for the auto-reply service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;

use super::support::{BOT_USER_ID, TestService, service, tenant};
use crate::trigger::{
    adapters::memory::InMemoryTriggerStore,
    domain::{TriggerDomainError, TriggerFilter, TriggerKey, TriggerRecord},
    ports::{TriggerStore, TriggerStoreResult},
    services::{AutoReplyConfig, AutoReplyError, AutoReplyService, InboundMessage, TriggerCache},
};

/// In-memory store that yields to the scheduler before each lookup.
#[derive(Default)]
struct YieldingStore(InMemoryTriggerStore);

#[async_trait]
impl TriggerStore for YieldingStore {
    async fn ensure_schema(&self) -> TriggerStoreResult<()> {
        self.0.ensure_schema().await
    }

    async fn exists(&self, key: &TriggerKey) -> TriggerStoreResult<bool> {
        tokio::task::yield_now().await;
        self.0.exists(key).await
    }

    async fn insert(&self, record: &TriggerRecord) -> TriggerStoreResult<()> {
        self.0.insert(record).await
    }

    async fn update(&self, record: &TriggerRecord) -> TriggerStoreResult<()> {
        self.0.update(record).await
    }

    async fn delete(&self, key: &TriggerKey) -> TriggerStoreResult<()> {
        self.0.delete(key).await
    }

    async fn scan(&self, filter: TriggerFilter) -> TriggerStoreResult<Vec<TriggerRecord>> {
        self.0.scan(filter).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ping_pong(service: TestService) {
    service.set(tenant(1), "ping", "pong", false).await.expect("set");

    let reply = service.reply_for(&InboundMessage::in_tenant(tenant(1), 7, "ping"));

    assert_eq!(reply.as_deref(), Some("pong"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_fifty_first_trigger_is_rejected(service: TestService) {
    for n in 0..50 {
        service
            .set(tenant(1), &format!("t{n}"), "reply", false)
            .await
            .expect("under the limit");
    }

    let result = service.set(tenant(1), "one too many", "reply", false).await;

    assert!(matches!(
        result,
        Err(AutoReplyError::CapacityExceeded { limit: 50, .. })
    ));
    assert_eq!(service.list(tenant(1)).len(), 50);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_sets_cannot_both_take_the_last_slot() {
    let cache = TriggerCache::new(Arc::new(YieldingStore::default()), Arc::new(DefaultClock));
    let service = AutoReplyService::new(Arc::new(cache), BOT_USER_ID);
    for n in 0..49 {
        service
            .set(tenant(1), &format!("t{n}"), "reply", false)
            .await
            .expect("under the limit");
    }

    let (first, second) = tokio::join!(
        service.set(tenant(1), "new-a", "reply", false),
        service.set(tenant(1), "new-b", "reply", false),
    );

    let rejected = [&first, &second]
        .iter()
        .filter(|result| matches!(result, Err(AutoReplyError::CapacityExceeded { .. })))
        .count();
    assert_eq!(rejected, 1, "first: {first:?}, second: {second:?}");
    assert!(first.is_ok() || second.is_ok());
    assert_eq!(service.list(tenant(1)).len(), 50);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overwriting_at_capacity_is_allowed(service: TestService) {
    let service = service.with_config(AutoReplyConfig::default().with_max_triggers(1));
    service.set(tenant(1), "a", "one", false).await.expect("set");

    service.set(tenant(1), "a", "two", false).await.expect("overwrite");

    assert_eq!(service.list(tenant(1))[0].content, "two");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn limits_apply_per_tenant(service: TestService) {
    let service = service.with_config(AutoReplyConfig::default().with_max_triggers(1));
    service.set(tenant(1), "a", "one", false).await.expect("set");

    service.set(tenant(2), "a", "one", false).await.expect("other tenant");
}

#[rstest]
#[case::blank_trigger(" ", "reply", TriggerDomainError::EmptyTrigger)]
#[case::blank_content("hi", "", TriggerDomainError::EmptyContent)]
#[tokio::test(flavor = "multi_thread")]
async fn blank_input_is_rejected(
    service: TestService,
    #[case] trigger: &str,
    #[case] content: &str,
    #[case] expected: TriggerDomainError,
) {
    let result = service.set(tenant(1), trigger, content, false).await;

    assert!(matches!(result, Err(AutoReplyError::Domain(err)) if err == expected));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_trigger_is_not_found(service: TestService) {
    let result = service.delete(tenant(1), "ghost").await;

    assert!(matches!(result, Err(AutoReplyError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_follows_insertion_order(service: TestService) {
    service.set(tenant(1), "zeta", "z", true).await.expect("set");
    service.set(tenant(1), "alpha", "a", false).await.expect("set");

    let triggers: Vec<_> = service
        .list(tenant(1))
        .into_iter()
        .map(|row| row.trigger)
        .collect();

    assert_eq!(triggers, ["zeta", "alpha"]);
}

#[rstest]
#[case::direct_message(InboundMessage::direct(7, "hello"))]
#[case::own_message(InboundMessage::in_tenant(tenant(1), BOT_USER_ID, "hello"))]
#[case::command_prefix(InboundMessage::in_tenant(tenant(1), 7, "rt!hello"))]
#[case::dotted_prefix(InboundMessage::in_tenant(tenant(1), 7, "RT.hello"))]
#[tokio::test(flavor = "multi_thread")]
async fn some_messages_are_never_answered(service: TestService, #[case] message: InboundMessage) {
    service.set(tenant(1), "hello", "hi!", true).await.expect("set");

    assert_eq!(service.reply_for(&message), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_config_answers_prefixed_messages(service: TestService) {
    let service = service.with_config(AutoReplyConfig::strict());
    service.set(tenant(1), "hello", "hi!", true).await.expect("set");

    let reply = service.reply_for(&InboundMessage::in_tenant(tenant(1), 7, "rt!hello"));

    assert_eq!(reply.as_deref(), Some("hi!"));
}

#[rstest]
fn config_deserializes_with_defaults() {
    let config: AutoReplyConfig =
        serde_json::from_str(r#"{"max_triggers_per_tenant": 5}"#).expect("valid config");

    assert_eq!(config.max_triggers_per_tenant, 5);
    assert_eq!(config.command_prefixes.len(), 6);
}
