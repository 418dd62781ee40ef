//! Auto-reply orchestration on top of the trigger cache.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::cache::{TriggerCache, TriggerCacheError};
use crate::tenant::TenantId;
use crate::trigger::{
    domain::{TriggerDomainError, TriggerKey, TriggerListing, TriggerReply, TriggerText},
    ports::{TriggerStore, TriggerStoreError},
};

/// Default per-tenant trigger limit.
pub const DEFAULT_MAX_TRIGGERS_PER_TENANT: usize = 50;

/// Auto-reply behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoReplyConfig {
    /// Maximum number of triggers one tenant may hold.
    pub max_triggers_per_tenant: usize,
    /// Messages starting with any of these are commands and never matched.
    pub command_prefixes: Vec<String>,
}

impl Default for AutoReplyConfig {
    fn default() -> Self {
        Self {
            max_triggers_per_tenant: DEFAULT_MAX_TRIGGERS_PER_TENANT,
            command_prefixes: ["rt!", "Rt!", "RT!", "rt.", "Rt.", "RT."]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl AutoReplyConfig {
    /// Configuration with no command prefixes, so every message is matched.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            command_prefixes: Vec::new(),
            ..Self::default()
        }
    }

    /// Replaces the command prefixes.
    #[must_use]
    pub fn with_prefixes(mut self, prefixes: impl IntoIterator<Item = String>) -> Self {
        self.command_prefixes = prefixes.into_iter().collect();
        self
    }

    /// Replaces the per-tenant limit.
    #[must_use]
    pub const fn with_max_triggers(mut self, limit: usize) -> Self {
        self.max_triggers_per_tenant = limit;
        self
    }

    fn is_command(&self, content: &str) -> bool {
        self.command_prefixes
            .iter()
            .any(|prefix| content.starts_with(prefix.as_str()))
    }
}

/// A chat message seen by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Tenant the message was posted in; `None` for direct messages.
    pub tenant: Option<TenantId>,
    /// Author snowflake.
    pub author_id: u64,
    /// Message text.
    pub content: String,
}

impl InboundMessage {
    /// Creates a message posted in `tenant`.
    #[must_use]
    pub fn in_tenant(tenant: TenantId, author_id: u64, content: impl Into<String>) -> Self {
        Self {
            tenant: Some(tenant),
            author_id,
            content: content.into(),
        }
    }

    /// Creates a direct message.
    #[must_use]
    pub fn direct(author_id: u64, content: impl Into<String>) -> Self {
        Self {
            tenant: None,
            author_id,
            content: content.into(),
        }
    }
}

/// Service-level errors for auto-reply management.
#[derive(Debug, Clone, Error)]
pub enum AutoReplyError {
    /// The tenant already holds the maximum number of triggers.
    #[error("tenant {tenant} already has {limit} triggers")]
    CapacityExceeded {
        /// Tenant at capacity.
        tenant: TenantId,
        /// Configured limit.
        limit: usize,
    },
    /// The trigger does not exist.
    #[error("trigger not found: {0}")]
    NotFound(TriggerKey),
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TriggerDomainError),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] TriggerStoreError),
}

impl From<TriggerCacheError> for AutoReplyError {
    fn from(err: TriggerCacheError) -> Self {
        match err {
            TriggerCacheError::NotFound(key) => Self::NotFound(key),
            TriggerCacheError::Store(store) => Self::Store(store),
        }
    }
}

/// Result type for auto-reply operations.
pub type AutoReplyResult<T> = Result<T, AutoReplyError>;

/// Manages tenant triggers and answers messages that fire them.
pub struct AutoReplyService<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    cache: Arc<TriggerCache<S, C>>,
    config: AutoReplyConfig,
    bot_user_id: u64,
    capacity_gate: Arc<Mutex<()>>,
}

impl<S, C> Clone for AutoReplyService<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            config: self.config.clone(),
            bot_user_id: self.bot_user_id,
            capacity_gate: Arc::clone(&self.capacity_gate),
        }
    }
}

impl<S, C> AutoReplyService<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    /// Creates a service answering as `bot_user_id`.
    #[must_use]
    pub fn new(cache: Arc<TriggerCache<S, C>>, bot_user_id: u64) -> Self {
        Self {
            cache,
            config: AutoReplyConfig::default(),
            bot_user_id,
            capacity_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AutoReplyConfig) -> Self {
        self.config = config;
        self
    }

    /// Backing cache.
    #[must_use]
    pub fn cache(&self) -> &TriggerCache<S, C> {
        &self.cache
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AutoReplyConfig {
        &self.config
    }

    /// Creates or overwrites a trigger.
    ///
    /// Overwriting never counts against the limit. The capacity check and
    /// the write run under one lock shared by every clone of the service.
    ///
    /// # Errors
    ///
    /// Returns [`AutoReplyError::Domain`] for blank input,
    /// [`AutoReplyError::CapacityExceeded`] when a new trigger would exceed
    /// the limit, or [`AutoReplyError::Store`] when persistence fails.
    pub async fn set(
        &self,
        tenant: TenantId,
        trigger: &str,
        content: &str,
        partial: bool,
    ) -> AutoReplyResult<()> {
        let trigger = TriggerText::new(trigger)?;
        let reply = TriggerReply::new(content, partial)?;

        let _gate = self.capacity_gate.lock().await;
        let existing = self.cache.triggers(tenant);
        let is_new = existing
            .as_ref()
            .is_none_or(|triggers| !triggers.contains(&trigger));
        let count = existing.map_or(0, |triggers| triggers.len());
        if is_new && count >= self.config.max_triggers_per_tenant {
            warn!(%tenant, limit = self.config.max_triggers_per_tenant, "trigger limit reached");
            return Err(AutoReplyError::CapacityExceeded {
                tenant,
                limit: self.config.max_triggers_per_tenant,
            });
        }

        self.cache.upsert(tenant, trigger, reply).await?;
        Ok(())
    }

    /// Removes a trigger.
    ///
    /// # Errors
    ///
    /// Returns [`AutoReplyError::NotFound`] when the trigger does not exist,
    /// [`AutoReplyError::Domain`] for blank input, or
    /// [`AutoReplyError::Store`] when persistence fails.
    pub async fn delete(&self, tenant: TenantId, trigger: &str) -> AutoReplyResult<()> {
        let trigger = TriggerText::new(trigger)?;
        self.cache.remove(tenant, trigger).await?;
        Ok(())
    }

    /// Lists a tenant's triggers in insertion order.
    #[must_use]
    pub fn list(&self, tenant: TenantId) -> Vec<TriggerListing> {
        self.cache
            .triggers(tenant)
            .map(|triggers| triggers.listing())
            .unwrap_or_default()
    }

    /// Returns the reply for `message`, if any trigger fires.
    ///
    /// Direct messages, the bot's own messages, and command invocations are
    /// never answered.
    #[must_use]
    pub fn reply_for(&self, message: &InboundMessage) -> Option<String> {
        let tenant = message.tenant?;
        if message.author_id == self.bot_user_id || self.config.is_command(&message.content) {
            return None;
        }
        let reply = self.cache.match_message(tenant, &message.content);
        if reply.is_some() {
            debug!(%tenant, author_id = message.author_id, "auto-reply fired");
        }
        reply
    }
}
