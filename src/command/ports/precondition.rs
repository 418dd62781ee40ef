//! Precondition gate run before a handler is invoked.

use async_trait::async_trait;

use crate::command::domain::InvocationContext;

/// Boolean check deciding whether a resolved command may run.
#[async_trait]
pub trait Precondition: Send + Sync {
    /// Returns `false` to stop the invocation.
    async fn check(&self, context: &InvocationContext) -> bool;
}

#[async_trait]
impl<F> Precondition for F
where
    F: Fn(&InvocationContext) -> bool + Send + Sync,
{
    async fn check(&self, context: &InvocationContext) -> bool {
        self(context)
    }
}

/// Precondition that accepts every invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl Precondition for AllowAll {
    async fn check(&self, _context: &InvocationContext) -> bool {
        true
    }
}
