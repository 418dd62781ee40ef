//! Command resolution and argument binding.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::coercion::{CoercionRegistry, CoercionScope};
use crate::command::domain::{
    BoundArguments, CommandNode, CommandOption, HandlerSignature, InvocationContext, Invoker,
    LeafCommand, ResolveError, RoutingError,
};
use crate::command::ports::{CommandErrorChannel, CommandErrorEvent, ConnectionState, Precondition};

/// Configuration for the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Reason attached to every `PreconditionFailed` event.
    pub precondition_failure_reason: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            precondition_failure_reason: "You are missing a required role.".to_owned(),
        }
    }
}

/// What happened to a routed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran to completion.
    Invoked(InvocationContext),
    /// The precondition rejected the invocation and an error event was sent.
    PreconditionFailed(InvocationContext),
}

impl DispatchOutcome {
    /// Context of the routed invocation.
    #[must_use]
    pub const fn context(&self) -> &InvocationContext {
        match self {
            Self::Invoked(context) | Self::PreconditionFailed(context) => context,
        }
    }
}

/// A leaf located by walking group selectors.
#[derive(Debug)]
pub struct ResolvedCommand<'t, 'o> {
    /// The located leaf.
    pub leaf: &'t LeafCommand,
    /// Option values to bind against the leaf's parameters.
    pub values: &'o [CommandOption],
    /// Node names from the root down to the leaf.
    pub path: Vec<String>,
}

/// Walks a command tree, binds option values, gates, and invokes handlers.
///
/// The resolver holds no per-invocation state, so one instance serves
/// concurrent invocations.
pub struct CommandResolver<S, E>
where
    S: ConnectionState,
    E: CommandErrorChannel,
{
    registry: Arc<CoercionRegistry>,
    state: Arc<S>,
    errors: Arc<E>,
    config: ResolverConfig,
}

impl<S, E> Clone for CommandResolver<S, E>
where
    S: ConnectionState,
    E: CommandErrorChannel,
{
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            state: Arc::clone(&self.state),
            errors: Arc::clone(&self.errors),
            config: self.config.clone(),
        }
    }
}

impl<S, E> CommandResolver<S, E>
where
    S: ConnectionState,
    E: CommandErrorChannel,
{
    /// Creates a resolver with the default configuration.
    #[must_use]
    pub fn new(registry: Arc<CoercionRegistry>, state: Arc<S>, errors: Arc<E>) -> Self {
        Self {
            registry,
            state,
            errors,
            config: ResolverConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Routes `invocation` through `root`, binds its values, runs the
    /// precondition, and invokes the handler.
    ///
    /// A rejected precondition is not an error: it dispatches one
    /// [`CommandErrorEvent::PreconditionFailed`] and returns
    /// [`DispatchOutcome::PreconditionFailed`] without touching the handler.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Routing`] when the subcommand path does not
    /// exist, [`ResolveError::Coercion`] when an option cannot be bound, or
    /// [`ResolveError::Handler`] when the handler fails.
    pub async fn resolve_and_invoke<P>(
        &self,
        root: &CommandNode,
        invocation: &CommandOption,
        invoker: Invoker,
        precondition: &P,
    ) -> Result<DispatchOutcome, ResolveError>
    where
        P: Precondition + ?Sized,
    {
        let ResolvedCommand { leaf, values, path } = locate(root, invocation)?;
        let context = InvocationContext::new(invoker, path);

        if !precondition.check(&context).await {
            warn!(
                invocation_id = %context.invocation_id(),
                command = %context.qualified_name(),
                "precondition rejected invocation"
            );
            self.errors
                .dispatch(CommandErrorEvent::PreconditionFailed {
                    context: context.clone(),
                    reason: self.config.precondition_failure_reason.clone(),
                })
                .await;
            return Ok(DispatchOutcome::PreconditionFailed(context));
        }

        let arguments = self.bind(leaf.signature(), values, &context).await?;
        debug!(
            invocation_id = %context.invocation_id(),
            command = %context.qualified_name(),
            bound = arguments.len(),
            "invoking command handler"
        );
        leaf.handler().invoke(&context, arguments).await?;
        Ok(DispatchOutcome::Invoked(context))
    }

    /// Binds option values to the signature's parameters by position.
    ///
    /// Implicit parameters are skipped. Surplus parameters stay unbound so
    /// handlers can default trailing optional arguments; surplus options are
    /// ignored. Conversions run one at a time, in parameter order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Coercion`] when an option cannot be coerced.
    pub async fn bind(
        &self,
        signature: &HandlerSignature,
        values: &[CommandOption],
        context: &InvocationContext,
    ) -> Result<BoundArguments, ResolveError> {
        let scope = CoercionScope {
            state: self.state.as_ref(),
            tenant: context.tenant(),
        };

        let mut arguments = BoundArguments::new();
        for (parameter, option) in signature.bindable().zip(values) {
            let value = self
                .registry
                .coerce(parameter, option.value.clone(), scope)
                .await?;
            arguments.insert(parameter.name.clone(), value);
        }
        Ok(arguments)
    }
}

/// Follows group selectors from `root` down to a leaf command.
///
/// Each selector contributes exactly its first child; any further children
/// are ignored.
///
/// # Errors
///
/// Returns [`RoutingError`] when a selector names no child, names an unknown
/// child, targets a leaf, or when the walk stops on a group.
pub fn locate<'t, 'o>(
    root: &'t CommandNode,
    invocation: &'o CommandOption,
) -> Result<ResolvedCommand<'t, 'o>, RoutingError> {
    let mut node = root;
    let mut option = invocation;
    let mut path = vec![root.name().to_owned()];

    while option.kind.is_group_selector() {
        let CommandNode::Group(group) = node else {
            return Err(RoutingError::NotAGroup(node.name().to_owned()));
        };
        let selected = option
            .selected_child()
            .ok_or_else(|| RoutingError::EmptyGroupSelector(option.name.clone()))?;
        node = group
            .child(&selected.name)
            .ok_or_else(|| RoutingError::UnknownSubcommand {
                group: group.name().to_owned(),
                name: selected.name.clone(),
            })?;
        debug!(group = %group.name(), subcommand = %node.name(), "descending into subcommand");
        path.push(node.name().to_owned());
        option = selected;
    }

    match node {
        CommandNode::Leaf(leaf) => Ok(ResolvedCommand {
            leaf,
            values: &option.options,
            path,
        }),
        CommandNode::Group(group) => Err(RoutingError::NotALeaf(group.name().to_owned())),
    }
}
