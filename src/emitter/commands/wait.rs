use futures::FutureExt;

use crate::emitter::context::EmitContext;
use crate::emitter::emission::Emission;
use crate::emitter::literal::seconds;
use crate::emitter::registry::EmitFuture;
use crate::error::{EmitError, Result};
use crate::parser::Step;

/// Recorded timeout in ms, or the configured default
fn timeout_ms(step: &Step, ctx: &EmitContext) -> Result<u64> {
    match step.value() {
        Some(raw) => raw.trim().parse().map_err(|_| EmitError::InvalidArgument {
            command: step.name.clone(),
            message: format!("'{}' is not a timeout in milliseconds", raw),
        }),
        None => Ok(ctx.config.default_wait_timeout_ms),
    }
}

async fn wait_for(step: &Step, ctx: &EmitContext, method: &str) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    let timeout = seconds(timeout_ms(step, ctx)?);
    Ok(Emission::statement(format!(
        "$I->{}({}, {});",
        method, lookup, timeout
    )))
}

pub fn emit_wait_for_element_present<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    wait_for(step, ctx, "waitForElement").boxed()
}

pub fn emit_wait_for_element_not_present<'a>(
    step: &'a Step,
    ctx: &'a EmitContext,
) -> EmitFuture<'a> {
    wait_for(step, ctx, "waitForElementNotPresent").boxed()
}

pub fn emit_wait_for_element_visible<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    wait_for(step, ctx, "waitForElementVisible").boxed()
}

pub fn emit_wait_for_element_not_visible<'a>(
    step: &'a Step,
    ctx: &'a EmitContext,
) -> EmitFuture<'a> {
    wait_for(step, ctx, "waitForElementNotVisible").boxed()
}

pub fn emit_wait_for_element_editable<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    wait_for(step, ctx, "waitForElementClickable").boxed()
}

pub fn emit_wait_for_element_not_editable<'a>(
    step: &'a Step,
    ctx: &'a EmitContext,
) -> EmitFuture<'a> {
    wait_for(step, ctx, "waitForElementNotEditable").boxed()
}

/// `waitForText` records the expected text in the value and has no timeout
pub fn emit_wait_for_text<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let lookup = ctx.locate(step.require_target()?).await?;
        let text = ctx.text(step.value().unwrap_or(""));
        Ok(Emission::statement(format!(
            "$I->waitForText({}, {}, {});",
            text,
            seconds(ctx.config.wait_for_text_timeout_ms),
            lookup
        )))
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recorded_timeout_is_converted() {
        let ctx = EmitContext::default();
        let out = emit_wait_for_element_visible(
            &Step::new("waitForElementVisible", "id=panel", "5000"),
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$I->waitForElementVisible(WebDriverBy::id("panel"), 5);"#)
        );
    }

    #[tokio::test]
    async fn test_default_timeout() {
        let ctx = EmitContext::default();
        let out = emit_wait_for_element_present(&Step::new("waitForElementPresent", "id=a", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$I->waitForElement(WebDriverBy::id("a"), 30);"#)
        );
    }

    #[tokio::test]
    async fn test_invalid_timeout() {
        let ctx = EmitContext::default();
        let err = emit_wait_for_element_not_present(
            &Step::new("waitForElementNotPresent", "id=a", "soon"),
            &ctx,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EmitError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_text() {
        let ctx = EmitContext::default();
        let out = emit_wait_for_text(&Step::new("waitForText", "css=.status", "Done"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(
                r#"$I->waitForText("Done", 30, WebDriverBy::cssSelector(".status"));"#
            )
        );
    }
}
