//! Trigger cache and auto-reply services.

mod auto_reply;
mod cache;
mod commands;

pub use auto_reply::{
    AutoReplyConfig, AutoReplyError, AutoReplyResult, AutoReplyService,
    DEFAULT_MAX_TRIGGERS_PER_TENANT, InboundMessage,
};
pub use cache::{TriggerCache, TriggerCacheError, TriggerCacheResult};
pub use commands::{AutoReplyCommandError, auto_reply_commands};
