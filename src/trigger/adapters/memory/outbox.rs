//! Outbox that records notices instead of delivering them.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::command::domain::{InvocationContext, InvocationId};
use crate::trigger::ports::{AutoReplyNotice, AutoReplyOutbox};

/// Outbox keeping every notice alongside the invocation it answers.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutbox {
    sent: Arc<RwLock<Vec<(InvocationId, AutoReplyNotice)>>>,
}

impl RecordingOutbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices sent so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<AutoReplyNotice> {
        self.sent
            .read()
            .map(|sent| sent.iter().map(|(_, notice)| notice.clone()).collect())
            .unwrap_or_default()
    }

    /// Notices sent in reply to `invocation`.
    #[must_use]
    pub fn notices_for(&self, invocation: InvocationId) -> Vec<AutoReplyNotice> {
        self.sent
            .read()
            .map(|sent| {
                sent.iter()
                    .filter(|(id, _)| *id == invocation)
                    .map(|(_, notice)| notice.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl AutoReplyOutbox for RecordingOutbox {
    async fn send(&self, context: &InvocationContext, notice: AutoReplyNotice) {
        if let Ok(mut sent) = self.sent.write() {
            sent.push((context.invocation_id(), notice));
        }
    }
}
