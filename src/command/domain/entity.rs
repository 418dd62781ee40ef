//! Domain entities built from raw option payloads, and bound argument values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::EntityError;
use crate::tenant::TenantId;

/// Channel flavours a parameter may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Text channel.
    Text,
    /// Voice channel.
    Voice,
    /// Thread.
    Thread,
    /// Stage channel.
    Stage,
    /// Category.
    Category,
}

/// Closed set of entity kinds the coercion table knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A platform user.
    User,
    /// A user scoped to a tenant.
    Member,
    /// A tenant role.
    Role,
    /// A tenant channel of the given flavour.
    Channel(ChannelKind),
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Member => f.write_str("member"),
            Self::Role => f.write_str("role"),
            Self::Channel(kind) => write!(f, "{kind:?} channel"),
        }
    }
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Snowflake identifier.
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    /// Account name.
    #[serde(alias = "username")]
    pub name: String,
    /// Whether the account is a bot.
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Builds a user from a raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidPayload`] when the payload does not
    /// describe a user.
    pub fn from_payload(payload: Value) -> Result<Self, EntityError> {
        serde_json::from_value(payload).map_err(|err| EntityError::invalid(EntityKind::User, &err))
    }
}

/// A user in the context of one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Owning tenant.
    pub tenant: TenantId,
    /// Underlying user.
    pub user: User,
    /// Tenant-specific nickname.
    pub nick: Option<String>,
    /// Role identifiers held by the member.
    pub roles: Vec<u64>,
}

#[derive(Deserialize)]
struct MemberPayload {
    user: User,
    #[serde(default)]
    nick: Option<String>,
    #[serde(default, deserialize_with = "snowflakes")]
    roles: Vec<u64>,
}

impl Member {
    /// Builds a member of `tenant` from a raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidPayload`] when the payload does not
    /// describe a member.
    pub fn from_payload(tenant: TenantId, payload: Value) -> Result<Self, EntityError> {
        let MemberPayload { user, nick, roles } = serde_json::from_value(payload)
            .map_err(|err| EntityError::invalid(EntityKind::Member, &err))?;
        Ok(Self {
            tenant,
            user,
            nick,
            roles,
        })
    }
}

/// A tenant role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    /// Owning tenant.
    pub tenant: TenantId,
    /// Snowflake identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
}

#[derive(Deserialize)]
struct RolePayload {
    #[serde(deserialize_with = "snowflake")]
    id: u64,
    name: String,
}

impl Role {
    /// Builds a role of `tenant` from a raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidPayload`] when the payload does not
    /// describe a role.
    pub fn from_payload(tenant: TenantId, payload: Value) -> Result<Self, EntityError> {
        let RolePayload { id, name } = serde_json::from_value(payload)
            .map_err(|err| EntityError::invalid(EntityKind::Role, &err))?;
        Ok(Self { tenant, id, name })
    }
}

/// A tenant channel or thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Owning tenant.
    pub tenant: TenantId,
    /// Snowflake identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Channel flavour.
    pub kind: ChannelKind,
}

/// Parses a channel identifier sent either as a number or a string.
///
/// # Errors
///
/// Returns [`EntityError::InvalidPayload`] when the value is not an
/// unsigned integer.
pub fn channel_id(kind: ChannelKind, raw: &Value) -> Result<u64, EntityError> {
    let parsed = match raw {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| EntityError::InvalidPayload {
        kind: EntityKind::Channel(kind),
        reason: format!("expected a channel identifier, got {raw}"),
    })
}

/// A constructed entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum Entity {
    /// A user.
    User(User),
    /// A member.
    Member(Member),
    /// A role.
    Role(Role),
    /// A channel.
    Channel(Channel),
}

/// A coerced argument value handed to a handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    /// Raw or converter-produced JSON value.
    Raw(Value),
    /// Constructed domain entity.
    Entity(Entity),
}

impl BoundValue {
    /// Returns the value as a string slice when it is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Raw(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the value as a boolean when it is a JSON boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Raw(Value::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the value as an integer when it is a JSON integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Raw(value) => value.as_i64(),
            Self::Entity(_) => None,
        }
    }

    /// Returns the constructed entity, if any.
    #[must_use]
    pub const fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::Raw(_) => None,
        }
    }

    /// Returns `true` for a raw `null`, e.g. a channel that could not be found.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Raw(Value::Null))
    }
}

/// Handler arguments keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundArguments(BTreeMap<String, BoundValue>);

impl BoundArguments {
    /// Creates an empty argument set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Binds `value` to the parameter `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: BoundValue) {
        self.0.insert(name.into(), value);
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.0.get(name)
    }

    /// Returns the string bound to `name`.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(BoundValue::as_str)
    }

    /// Returns the boolean bound to `name`.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(BoundValue::as_bool)
    }

    /// Returns the entity bound to `name`.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.get(name).and_then(BoundValue::as_entity)
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over bound parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snowflake {
    Number(u64),
    Text(String),
}

impl Snowflake {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text.parse().map_err(E::custom),
        }
    }
}

fn snowflake<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Snowflake::deserialize(deserializer)?.into_u64()
}

fn snowflakes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
    Vec::<Snowflake>::deserialize(deserializer)?
        .into_iter()
        .map(Snowflake::into_u64)
        .collect()
}
