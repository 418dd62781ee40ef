//! Production error channels.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::command::ports::{CommandErrorChannel, CommandErrorEvent};

/// Forwards events to a `tokio` queue drained by the chat layer.
#[derive(Debug, Clone)]
pub struct QueueErrorChannel {
    sender: mpsc::UnboundedSender<CommandErrorEvent>,
}

impl QueueErrorChannel {
    /// Creates a channel and the receiver the chat layer drains.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CommandErrorEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl CommandErrorChannel for QueueErrorChannel {
    async fn dispatch(&self, event: CommandErrorEvent) {
        if let Err(err) = self.sender.send(event) {
            warn!(
                invocation_id = %err.0.context().invocation_id(),
                "error event dropped: receiver closed"
            );
        }
    }
}

/// Logs events and otherwise discards them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorChannel;

#[async_trait]
impl CommandErrorChannel for TracingErrorChannel {
    async fn dispatch(&self, event: CommandErrorEvent) {
        info!(
            invocation_id = %event.context().invocation_id(),
            command = %event.context().qualified_name(),
            reason = event.reason(),
            "command error event"
        );
    }
}
