//! When steps for auto-reply BDD scenarios.

use super::world::{AutoReplyWorld, MEMBER_ID, run_async};
use cogwheel::trigger::services::InboundMessage;
use rstest_bdd_macros::when;

#[when(r#"a member posts "{content}""#)]
fn member_posts(world: &mut AutoReplyWorld, content: String) -> Result<(), eyre::Report> {
    let message = InboundMessage::in_tenant(world.tenant()?, MEMBER_ID, content);
    world.last_reply = Some(world.service.reply_for(&message));
    Ok(())
}

#[when(r#"the trigger "{trigger}" is registered"#)]
fn register_trigger(world: &mut AutoReplyWorld, trigger: String) -> Result<(), eyre::Report> {
    let tenant = world.tenant()?;
    world.last_set_result = Some(run_async(
        world.service.set(tenant, &trigger, "reply", false),
    ));
    Ok(())
}

#[when(r#"the trigger "{trigger}" is deleted"#)]
fn delete_trigger(world: &mut AutoReplyWorld, trigger: String) -> Result<(), eyre::Report> {
    let tenant = world.tenant()?;
    world.last_delete_result = Some(run_async(world.service.delete(tenant, &trigger)));
    Ok(())
}
