//! Application services for the command subsystem.

mod coercion;
mod cooldown;
mod resolver;

pub use coercion::{Coercion, CoercionRegistry, CoercionScope};
pub use cooldown::TenantCooldown;
pub use resolver::{CommandResolver, DispatchOutcome, ResolvedCommand, ResolverConfig, locate};
