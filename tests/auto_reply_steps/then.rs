//! Then steps for auto-reply BDD scenarios.

use super::world::AutoReplyWorld;
use cogwheel::trigger::services::AutoReplyError;
use rstest_bdd_macros::then;

#[then(r#"the bot replies "{expected}""#)]
fn bot_replies(world: &AutoReplyWorld, expected: String) -> Result<(), eyre::Report> {
    let reply = world
        .last_reply
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no message was posted"))?;
    if reply.as_deref() != Some(expected.as_str()) {
        return Err(eyre::eyre!("expected reply {expected:?}, got {reply:?}"));
    }
    Ok(())
}

#[then("the bot stays silent")]
fn bot_stays_silent(world: &AutoReplyWorld) -> Result<(), eyre::Report> {
    let reply = world
        .last_reply
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no message was posted"))?;
    if let Some(text) = reply {
        return Err(eyre::eyre!("expected no reply, got {text:?}"));
    }
    Ok(())
}

#[then("registration fails because the tenant is full")]
fn registration_fails_full(world: &AutoReplyWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_set_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing registration result in scenario world"))?;
    if !matches!(result, Err(AutoReplyError::CapacityExceeded { limit: 50, .. })) {
        return Err(eyre::eyre!("expected capacity error, got {result:?}"));
    }
    Ok(())
}

#[then("deletion fails because the trigger does not exist")]
fn deletion_fails_missing(world: &AutoReplyWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_delete_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing deletion result in scenario world"))?;
    if !matches!(result, Err(AutoReplyError::NotFound(_))) {
        return Err(eyre::eyre!("expected not-found error, got {result:?}"));
    }
    Ok(())
}
