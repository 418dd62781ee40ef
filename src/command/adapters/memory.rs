//! In-memory adapters for unit testing without a live connection.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::command::domain::Channel;
use crate::command::ports::{CommandErrorChannel, CommandErrorEvent, ConnectionState};
use crate::tenant::TenantId;

/// Connection state holding a fixed set of channels.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnectionState {
    channels: Arc<RwLock<HashMap<(TenantId, u64), Channel>>>,
}

impl InMemoryConnectionState {
    /// Creates an empty connection state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `channel` visible to lookups.
    pub fn add_channel(&self, channel: Channel) {
        if let Ok(mut channels) = self.channels.write() {
            channels.insert((channel.tenant, channel.id), channel);
        }
    }
}

impl ConnectionState for InMemoryConnectionState {
    fn channel(&self, tenant: TenantId, channel_id: u64) -> Option<Channel> {
        self.channels
            .read()
            .ok()
            .and_then(|channels| channels.get(&(tenant, channel_id)).cloned())
    }
}

/// Error channel that records every event it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingErrorChannel {
    events: Arc<RwLock<Vec<CommandErrorEvent>>>,
}

impl RecordingErrorChannel {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<CommandErrorEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandErrorChannel for RecordingErrorChannel {
    async fn dispatch(&self, event: CommandErrorEvent) {
        if let Ok(mut events) = self.events.write() {
            events.push(event);
        }
    }
}
