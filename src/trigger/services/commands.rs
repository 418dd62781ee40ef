//! Chat commands for managing auto-reply triggers.
//!
//! [`auto_reply_commands`] builds a `command` group with three leaves:
//!
//! - `set <trigger> <on|off> <content>` stores a trigger
//! - `delete <trigger>` removes one
//! - `list` shows the tenant's triggers
//!
//! Every outcome the user should see goes through an [`AutoReplyOutbox`].

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::auto_reply::{AutoReplyError, AutoReplyService};
use crate::command::domain::{
    BoundArguments, CommandGroup, CommandHandler, CommandNode, CommandTreeError, ConversionError,
    DeclaredType, HandlerError, HandlerSignature, InvocationContext, LeafCommand, Parameter,
    SyncConverter,
};
use crate::tenant::TenantId;
use crate::trigger::ports::{AutoReplyNotice, AutoReplyOutbox, TriggerStore};

/// Failures of auto-reply command handlers that are not reported as notices.
#[derive(Debug, Error)]
pub enum AutoReplyCommandError {
    /// The command was invoked outside a tenant.
    #[error("auto-reply commands are only available inside a tenant")]
    TenantRequired,
    /// A required argument was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    /// The service failed.
    #[error(transparent)]
    Service(#[from] AutoReplyError),
}

/// Builds the auto-reply command group.
///
/// # Errors
///
/// Returns [`CommandTreeError`] if the tree cannot be assembled.
pub fn auto_reply_commands<S, C>(
    service: AutoReplyService<S, C>,
    outbox: Arc<dyn AutoReplyOutbox>,
) -> Result<CommandNode, CommandTreeError>
where
    S: TriggerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let handlers = Handlers { service, outbox };

    let set = LeafCommand::new(
        "set",
        method_signature()
            .with_parameter(Parameter::new(
                "trigger",
                DeclaredType::described("Text that fires the reply", DeclaredType::Raw),
            ))
            .with_parameter(Parameter::new(
                "partial",
                DeclaredType::described(
                    "Reply whenever the trigger appears in a message",
                    DeclaredType::Converter(Arc::new(SyncConverter::new(parse_switch))),
                ),
            ))
            .with_parameter(Parameter::new(
                "content",
                DeclaredType::described("Reply text", DeclaredType::Raw),
            )),
        Arc::new(SetTrigger(handlers.clone())),
    )?;
    let delete = LeafCommand::new(
        "delete",
        method_signature().with_parameter(Parameter::raw("trigger")),
        Arc::new(DeleteTrigger(handlers.clone())),
    )?;
    let list = LeafCommand::new("list", method_signature(), Arc::new(ListTriggers(handlers)))?;

    let group = CommandGroup::new(
        "command",
        [
            CommandNode::from(set),
            CommandNode::from(delete),
            CommandNode::from(list),
        ],
    )?;
    Ok(group.into())
}

fn method_signature() -> HandlerSignature {
    HandlerSignature::new().with_implicit("self").with_implicit("ctx")
}

/// Accepts booleans and the usual on/off spellings.
fn parse_switch(raw: Value) -> Result<Value, ConversionError> {
    match &raw {
        Value::Bool(_) => Ok(raw),
        Value::String(text) => match text.to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" | "enable" | "1" => Ok(Value::Bool(true)),
            "off" | "false" | "no" | "disable" | "0" => Ok(Value::Bool(false)),
            _ => Err(ConversionError::new(format!("`{text}` is not on or off"))),
        },
        other => Err(ConversionError::new(format!("`{other}` is not on or off"))),
    }
}

struct Handlers<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    service: AutoReplyService<S, C>,
    outbox: Arc<dyn AutoReplyOutbox>,
}

impl<S, C> Clone for Handlers<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            outbox: Arc::clone(&self.outbox),
        }
    }
}

fn tenant_of(context: &InvocationContext) -> Result<TenantId, HandlerError> {
    context
        .tenant()
        .ok_or_else(|| HandlerError::new(AutoReplyCommandError::TenantRequired))
}

fn required<'a>(arguments: &'a BoundArguments, name: &'static str) -> Result<&'a str, HandlerError> {
    arguments
        .str(name)
        .ok_or_else(|| HandlerError::new(AutoReplyCommandError::MissingArgument(name)))
}

fn service_failure(err: AutoReplyError) -> HandlerError {
    HandlerError::new(AutoReplyCommandError::Service(err))
}

struct SetTrigger<S: TriggerStore, C: Clock + Send + Sync>(Handlers<S, C>);

#[async_trait]
impl<S, C> CommandHandler for SetTrigger<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    async fn invoke(
        &self,
        context: &InvocationContext,
        arguments: BoundArguments,
    ) -> Result<(), HandlerError> {
        let tenant = tenant_of(context)?;
        let trigger = required(&arguments, "trigger")?;
        let content = required(&arguments, "content")?;
        let partial = arguments
            .bool("partial")
            .ok_or_else(|| HandlerError::new(AutoReplyCommandError::MissingArgument("partial")))?;

        let notice = match self.0.service.set(tenant, trigger, content, partial).await {
            Ok(()) => AutoReplyNotice::Saved {
                trigger: trigger.to_owned(),
            },
            Err(AutoReplyError::CapacityExceeded { limit, .. }) => {
                AutoReplyNotice::CapacityExceeded { limit }
            }
            Err(err) => return Err(service_failure(err)),
        };
        self.0.outbox.send(context, notice).await;
        Ok(())
    }
}

struct DeleteTrigger<S: TriggerStore, C: Clock + Send + Sync>(Handlers<S, C>);

#[async_trait]
impl<S, C> CommandHandler for DeleteTrigger<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    async fn invoke(
        &self,
        context: &InvocationContext,
        arguments: BoundArguments,
    ) -> Result<(), HandlerError> {
        let tenant = tenant_of(context)?;
        let trigger = required(&arguments, "trigger")?;

        let notice = match self.0.service.delete(tenant, trigger).await {
            Ok(()) => AutoReplyNotice::Deleted {
                trigger: trigger.to_owned(),
            },
            Err(AutoReplyError::NotFound(_)) => AutoReplyNotice::NotFound {
                trigger: trigger.to_owned(),
            },
            Err(err) => return Err(service_failure(err)),
        };
        self.0.outbox.send(context, notice).await;
        Ok(())
    }
}

struct ListTriggers<S: TriggerStore, C: Clock + Send + Sync>(Handlers<S, C>);

#[async_trait]
impl<S, C> CommandHandler for ListTriggers<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    async fn invoke(
        &self,
        context: &InvocationContext,
        _arguments: BoundArguments,
    ) -> Result<(), HandlerError> {
        let tenant = tenant_of(context)?;
        let listing = self.0.service.list(tenant);
        let notice = if listing.is_empty() {
            AutoReplyNotice::NothingRegistered
        } else {
            AutoReplyNotice::Listing(listing)
        };
        self.0.outbox.send(context, notice).await;
        Ok(())
    }
}
