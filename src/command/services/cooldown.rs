//! Rate-limiting precondition.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::command::domain::InvocationContext;
use crate::command::ports::Precondition;
use crate::tenant::TenantId;

/// Bucket an invocation is counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CooldownBucket {
    Tenant(TenantId),
    Direct(u64),
}

impl CooldownBucket {
    const fn of(context: &InvocationContext) -> Self {
        match context.tenant() {
            Some(tenant) => Self::Tenant(tenant),
            None => Self::Direct(context.invoker().author_id),
        }
    }
}

/// Allows one invocation per tenant per period.
///
/// Direct-message invocations are bucketed by author instead.
#[derive(Debug)]
pub struct TenantCooldown<C: Clock> {
    period: TimeDelta,
    clock: C,
    last_used: Mutex<HashMap<CooldownBucket, DateTime<Utc>>>,
}

impl<C: Clock> TenantCooldown<C> {
    /// Creates a cooldown of `period`.
    #[must_use]
    pub fn new(period: TimeDelta, clock: C) -> Self {
        Self {
            period,
            clock,
            last_used: Mutex::new(HashMap::new()),
        }
    }

    /// Cooldown period.
    #[must_use]
    pub const fn period(&self) -> TimeDelta {
        self.period
    }

    /// Number of buckets still inside their cooldown window.
    #[must_use]
    pub fn tracked_buckets(&self) -> usize {
        self.last_used
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> Precondition for TenantCooldown<C> {
    async fn check(&self, context: &InvocationContext) -> bool {
        let bucket = CooldownBucket::of(context);
        let now = self.clock.utc();
        let mut last_used = self.last_used.lock().unwrap_or_else(PoisonError::into_inner);
        last_used.retain(|_, used| now.signed_duration_since(*used) < self.period);

        if let Some(previous) = last_used.get(&bucket)
            && now.signed_duration_since(*previous) < self.period
        {
            return false;
        }
        last_used.insert(bucket, now);
        true
    }
}
