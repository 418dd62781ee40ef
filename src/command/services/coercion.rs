//! Type coercion registry.
//!
//! Maps declared parameter types onto conversions from raw option values.
//! Entity kinds dispatch through a fixed constructor table; converters may
//! suspend. Declared types the registry does not know are passed through
//! unchanged.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::command::domain::{
    BoundValue, ChannelKind, CoercionError, Converter, DeclaredType, Entity, EntityError,
    EntityKind, Parameter, channel_id,
};
use crate::command::ports::ConnectionState;
use crate::tenant::TenantId;

/// Ambient state available while coercing one invocation.
#[derive(Clone, Copy)]
pub struct CoercionScope<'a> {
    /// Connection state used to build entities.
    pub state: &'a dyn ConnectionState,
    /// Tenant of the invocation, if any.
    pub tenant: Option<TenantId>,
}

/// What a semantic type name resolves to.
#[derive(Clone)]
pub enum Coercion {
    /// Build a domain entity.
    Entity(EntityKind),
    /// Run a converter.
    Converter(Arc<dyn Converter>),
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(kind) => f.debug_tuple("Entity").field(kind).finish(),
            Self::Converter(_) => f.write_str("Converter(..)"),
        }
    }
}

/// Registry of semantic type names and the coercions they select.
#[derive(Debug, Clone)]
pub struct CoercionRegistry {
    semantic: HashMap<String, Coercion>,
}

impl Default for CoercionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CoercionRegistry {
    /// Creates a registry holding the built-in entity type names.
    #[must_use]
    pub fn new() -> Self {
        let builtins = [
            ("user", EntityKind::User),
            ("member", EntityKind::Member),
            ("role", EntityKind::Role),
            ("text_channel", EntityKind::Channel(ChannelKind::Text)),
            ("voice_channel", EntityKind::Channel(ChannelKind::Voice)),
            ("thread", EntityKind::Channel(ChannelKind::Thread)),
            ("stage_channel", EntityKind::Channel(ChannelKind::Stage)),
            ("category_channel", EntityKind::Channel(ChannelKind::Category)),
        ];
        Self {
            semantic: builtins
                .into_iter()
                .map(|(name, kind)| (name.to_owned(), Coercion::Entity(kind)))
                .collect(),
        }
    }

    /// Creates a registry with no semantic types at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            semantic: HashMap::new(),
        }
    }

    /// Registers `converter` under the semantic type `name`.
    #[must_use]
    pub fn with_converter(mut self, name: impl Into<String>, converter: Arc<dyn Converter>) -> Self {
        self.semantic
            .insert(name.into(), Coercion::Converter(converter));
        self
    }

    /// Registers the semantic type `name` as an alias for an entity kind.
    #[must_use]
    pub fn with_entity(mut self, name: impl Into<String>, kind: EntityKind) -> Self {
        self.semantic.insert(name.into(), Coercion::Entity(kind));
        self
    }

    /// Looks up a semantic type.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Coercion> {
        self.semantic.get(name)
    }

    /// Coerces `raw` into the type `parameter` declares.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] when an entity cannot be built or a
    /// converter rejects the value.
    pub async fn coerce(
        &self,
        parameter: &Parameter,
        raw: Value,
        scope: CoercionScope<'_>,
    ) -> Result<BoundValue, CoercionError> {
        let target = match parameter.declared_type.effective() {
            DeclaredType::Entity(kind) => Target::Entity(*kind),
            DeclaredType::Converter(converter) => Target::Converter(converter.as_ref()),
            DeclaredType::Semantic(name) => match self.lookup(name) {
                Some(Coercion::Entity(kind)) => Target::Entity(*kind),
                Some(Coercion::Converter(converter)) => Target::Converter(converter.as_ref()),
                None => {
                    debug!(
                        parameter = %parameter.name,
                        semantic_type = %name,
                        "unknown semantic type; passing raw value through"
                    );
                    Target::PassThrough
                }
            },
            DeclaredType::Raw | DeclaredType::Described { .. } => Target::PassThrough,
        };

        match target {
            Target::PassThrough => Ok(BoundValue::Raw(raw)),
            Target::Entity(kind) => {
                build_entity(kind, scope, raw).map_err(|source| CoercionError::Entity {
                    parameter: parameter.name.clone(),
                    source,
                })
            }
            Target::Converter(converter) => converter
                .convert(raw)
                .await
                .map(BoundValue::Raw)
                .map_err(|source| CoercionError::Conversion {
                    parameter: parameter.name.clone(),
                    source,
                }),
        }
    }
}

enum Target<'a> {
    PassThrough,
    Entity(EntityKind),
    Converter(&'a dyn Converter),
}

type EntityConstructor = fn(EntityKind, CoercionScope<'_>, Value) -> Result<BoundValue, EntityError>;

/// Constructor table over the closed set of entity kinds.
const fn constructor_for(kind: EntityKind) -> EntityConstructor {
    match kind {
        EntityKind::User => build_user,
        EntityKind::Member => build_member,
        EntityKind::Role => build_role,
        EntityKind::Channel(_) => build_channel,
    }
}

fn build_entity(
    kind: EntityKind,
    scope: CoercionScope<'_>,
    raw: Value,
) -> Result<BoundValue, EntityError> {
    constructor_for(kind)(kind, scope, raw)
}

fn build_user(
    _kind: EntityKind,
    scope: CoercionScope<'_>,
    raw: Value,
) -> Result<BoundValue, EntityError> {
    let user = scope.state.user(raw)?;
    Ok(BoundValue::Entity(Entity::User(user)))
}

fn build_member(
    kind: EntityKind,
    scope: CoercionScope<'_>,
    raw: Value,
) -> Result<BoundValue, EntityError> {
    let tenant = require_tenant(kind, scope)?;
    let member = scope.state.member(tenant, raw)?;
    Ok(BoundValue::Entity(Entity::Member(member)))
}

fn build_role(
    kind: EntityKind,
    scope: CoercionScope<'_>,
    raw: Value,
) -> Result<BoundValue, EntityError> {
    let tenant = require_tenant(kind, scope)?;
    let role = scope.state.role(tenant, raw)?;
    Ok(BoundValue::Entity(Entity::Role(role)))
}

fn build_channel(
    kind: EntityKind,
    scope: CoercionScope<'_>,
    raw: Value,
) -> Result<BoundValue, EntityError> {
    let tenant = require_tenant(kind, scope)?;
    let EntityKind::Channel(channel_kind) = kind else {
        return Err(EntityError::InvalidPayload {
            kind,
            reason: "not a channel kind".to_owned(),
        });
    };
    let id = channel_id(channel_kind, &raw)?;
    Ok(scope
        .state
        .channel(tenant, id)
        .map_or(BoundValue::Raw(Value::Null), |channel| {
            BoundValue::Entity(Entity::Channel(channel))
        }))
}

fn require_tenant(kind: EntityKind, scope: CoercionScope<'_>) -> Result<TenantId, EntityError> {
    scope.tenant.ok_or(EntityError::MissingTenant(kind))
}
