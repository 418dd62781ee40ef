//! Given steps for auto-reply BDD scenarios.

use super::world::{AutoReplyWorld, run_async};
use cogwheel::tenant::TenantId;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an auto-reply service for tenant {tenant:u64}")]
fn service_for_tenant(world: &mut AutoReplyWorld, tenant: u64) -> Result<(), eyre::Report> {
    world.tenant = Some(TenantId::new(tenant).wrap_err("scenario tenant")?);
    Ok(())
}

#[given(r#"the trigger "{trigger}" replies "{content}" on exact match"#)]
fn exact_trigger(
    world: &mut AutoReplyWorld,
    trigger: String,
    content: String,
) -> Result<(), eyre::Report> {
    let tenant = world.tenant()?;
    run_async(world.service.set(tenant, &trigger, &content, false))
        .wrap_err("register exact trigger")
}

#[given(r#"the trigger "{trigger}" replies "{content}" on partial match"#)]
fn partial_trigger(
    world: &mut AutoReplyWorld,
    trigger: String,
    content: String,
) -> Result<(), eyre::Report> {
    let tenant = world.tenant()?;
    run_async(world.service.set(tenant, &trigger, &content, true))
        .wrap_err("register partial trigger")
}

#[given("the tenant already has {count:usize} triggers")]
fn tenant_with_triggers(world: &mut AutoReplyWorld, count: usize) -> Result<(), eyre::Report> {
    let tenant = world.tenant()?;
    for n in 0..count {
        run_async(world.service.set(tenant, &format!("filler {n}"), "filler", false))
            .wrap_err_with(|| format!("register filler trigger {n}"))?;
    }
    Ok(())
}
