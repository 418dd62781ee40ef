//! Dispatch through the public resolver API with production adapters.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use cogwheel::command::{
    domain::{
        BoundArguments, CommandGroup, CommandHandler, CommandNode, CommandOption, DeclaredType,
        EntityKind, HandlerError, HandlerSignature, InvocationContext, Invoker, LeafCommand,
        OptionKind, Parameter,
    },
    ports::CommandErrorEvent,
    services::{DispatchOutcome, TenantCooldown},
};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use tokio::sync::Mutex;

use super::helpers::{queue_resolver, tenant};

#[derive(Default)]
struct Greeter {
    greeted: Mutex<Vec<String>>,
}

#[async_trait]
impl CommandHandler for Greeter {
    async fn invoke(
        &self,
        _context: &InvocationContext,
        arguments: BoundArguments,
    ) -> Result<(), HandlerError> {
        let name = arguments
            .entity("who")
            .map(|entity| format!("{entity:?}"))
            .unwrap_or_default();
        self.greeted.lock().await.push(name);
        Ok(())
    }
}

fn greet_tree(greeter: Arc<Greeter>) -> CommandNode {
    let leaf = LeafCommand::new(
        "hello",
        HandlerSignature::new()
            .with_implicit("self")
            .with_implicit("ctx")
            .with_parameter(Parameter::new("who", DeclaredType::Entity(EntityKind::User))),
        greeter,
    )
    .expect("leaf builds");
    let inner = CommandGroup::new("greet", [CommandNode::from(leaf)]).expect("group builds");
    CommandGroup::new("fun", [CommandNode::from(inner)])
        .expect("root builds")
        .into()
}

fn hello(user: serde_json::Value) -> CommandOption {
    CommandOption::group(
        "fun",
        CommandOption::group(
            "greet",
            CommandOption::subcommand(
                "hello",
                [CommandOption::value("who", OptionKind::User, user)],
            ),
        ),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nested_commands_bind_entities() {
    let (resolver, _events) = queue_resolver();
    let greeter = Arc::new(Greeter::default());
    let tree = greet_tree(Arc::clone(&greeter));

    let outcome = resolver
        .resolve_and_invoke(
            &tree,
            &hello(json!({"id": "7", "username": "mika"})),
            Invoker::in_tenant(tenant(1), 7),
            &cogwheel::command::ports::AllowAll,
        )
        .await
        .expect("dispatch succeeds");

    assert!(matches!(outcome, DispatchOutcome::Invoked(_)));
    assert_eq!(outcome.context().qualified_name(), "fun greet hello");
    let greeted = greeter.greeted.lock().await;
    assert_eq!(greeted.len(), 1);
    assert!(greeted[0].contains("mika"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cooldown_rejections_reach_the_error_queue() {
    let (resolver, mut events) = queue_resolver();
    let greeter = Arc::new(Greeter::default());
    let tree = greet_tree(Arc::clone(&greeter));
    let cooldown = TenantCooldown::new(TimeDelta::seconds(7), DefaultClock);
    let invocation = hello(json!({"id": 7, "name": "mika"}));

    let first = resolver
        .resolve_and_invoke(&tree, &invocation, Invoker::in_tenant(tenant(1), 7), &cooldown)
        .await
        .expect("first dispatch");
    let second = resolver
        .resolve_and_invoke(&tree, &invocation, Invoker::in_tenant(tenant(1), 8), &cooldown)
        .await
        .expect("second dispatch");

    assert!(matches!(first, DispatchOutcome::Invoked(_)));
    assert!(matches!(second, DispatchOutcome::PreconditionFailed(_)));
    let CommandErrorEvent::PreconditionFailed { context, reason } =
        events.recv().await.expect("event queued");
    assert_eq!(context.invocation_id(), second.context().invocation_id());
    assert_eq!(reason, "You are missing a required role.");
    assert_eq!(greeter.greeted.lock().await.len(), 1);
}
