//! Auto-reply management commands wired to live message matching.

use std::sync::Arc;

use cogwheel::command::{
    adapters::{channel::TracingErrorChannel, memory::InMemoryConnectionState},
    domain::Invoker,
    ports::AllowAll,
    services::{CoercionRegistry, CommandResolver},
};
use cogwheel::trigger::{
    adapters::memory::{InMemoryTriggerStore, RecordingOutbox},
    ports::AutoReplyNotice,
    services::{InboundMessage, auto_reply_commands},
};
use rstest::rstest;

use super::helpers::{BOT_USER_ID, auto_reply_service, manage, tenant};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn triggers_set_by_command_answer_messages() {
    let store = Arc::new(InMemoryTriggerStore::new());
    let service = auto_reply_service(Arc::clone(&store)).await;
    let outbox = Arc::new(RecordingOutbox::new());
    let tree = auto_reply_commands(service.clone(), outbox.clone()).expect("tree builds");
    let resolver = CommandResolver::new(
        Arc::new(CoercionRegistry::new()),
        Arc::new(InMemoryConnectionState::new()),
        Arc::new(TracingErrorChannel),
    );

    resolver
        .resolve_and_invoke(
            &tree,
            &manage("set", &[("trigger", "ping"), ("partial", "off"), ("content", "pong")]),
            Invoker::in_tenant(tenant(3), 11),
            &AllowAll,
        )
        .await
        .expect("set dispatches");

    assert_eq!(
        outbox.notices(),
        [AutoReplyNotice::Saved {
            trigger: "ping".to_owned()
        }]
    );
    let reply = service.reply_for(&InboundMessage::in_tenant(tenant(3), 11, "ping"));
    assert_eq!(reply.as_deref(), Some("pong"));
    let silent = service.reply_for(&InboundMessage::in_tenant(tenant(3), BOT_USER_ID, "ping"));
    assert_eq!(silent, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_fresh_cache_sees_previously_stored_triggers() {
    let store = Arc::new(InMemoryTriggerStore::new());
    let first = auto_reply_service(Arc::clone(&store)).await;
    first
        .set(tenant(5), "good morning", "おはよう", true)
        .await
        .expect("set");

    let restarted = auto_reply_service(store).await;

    let reply = restarted.reply_for(&InboundMessage::in_tenant(tenant(5), 1, "good morning all"));
    assert_eq!(reply.as_deref(), Some("おはよう"));
}
