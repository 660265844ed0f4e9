//! `assert*` / `verify*` generators.
//!
//! Each emits the comparison as a Codeception assertion call; nothing is
//! evaluated here.

use futures::FutureExt;

use crate::emitter::context::EmitContext;
use crate::emitter::emission::{Block, Emission};
use crate::emitter::registry::EmitFuture;
use crate::error::Result;
use crate::parser::Step;

const EDITABLE: &str = "$element->isEnabled() && $element->getAttribute(\"readonly\") === null";

fn expected(step: &Step, ctx: &EmitContext) -> String {
    ctx.text(step.value().unwrap_or(""))
}

async fn assert_element_text(step: &Step, ctx: &EmitContext, method: &str) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    Ok(Emission::statement(format!(
        "$I->{}({}, $I->findElement({})->getText());",
        method,
        expected(step, ctx),
        lookup
    )))
}

async fn assert_selected(step: &Step, ctx: &EmitContext, selected: bool) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    let method = if selected { "assertTrue" } else { "assertFalse" };
    Ok(Emission::statement(format!(
        "$I->{}($I->findElement({})->isSelected());",
        method, lookup
    )))
}

async fn assert_editable(step: &Step, ctx: &EmitContext, editable: bool) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    let method = if editable { "assertTrue" } else { "assertFalse" };
    Ok(Block::braced(vec![
        format!("$element = $I->findElement({});", lookup),
        format!("$I->{}({});", method, EDITABLE),
        "unset($element);".to_string(),
    ])
    .into())
}

async fn assert_presence(step: &Step, ctx: &EmitContext, present: bool) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    let check = if present {
        "$I->assertGreaterThan(0, count($elements));"
    } else {
        "$I->assertCount(0, $elements);"
    };
    Ok(Block::braced(vec![
        format!("$elements = $I->findElements({});", lookup),
        check.to_string(),
        "unset($elements);".to_string(),
    ])
    .into())
}

async fn assert_value(step: &Step, ctx: &EmitContext, method: &str) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    Ok(Block::braced(vec![
        format!(
            "$value = $I->findElement({})->getAttribute(\"value\");",
            lookup
        ),
        format!("$I->{}({}, $value);", method, expected(step, ctx)),
        "unset($value);".to_string(),
    ])
    .into())
}

/// Compares a stored variable (target) with the expected value
pub fn emit_assert<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let name = step.require_target()?;
        Ok(Emission::statement(format!(
            "$I->assertEquals({}, {});",
            expected(step, ctx),
            ctx.variable_lookup(name)
        )))
    }
    .boxed()
}

/// Shared by `assertAlert`, `assertConfirmation` and `assertPrompt`
pub fn emit_assert_alert<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let text = ctx.text(step.target().unwrap_or(""));
        Ok(Emission::statement(format!(
            "$I->assertEquals({}, $I->switchTo()->alert()->getText());",
            text
        )))
    }
    .boxed()
}

pub fn emit_assert_checked<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_selected(step, ctx, true).boxed()
}

pub fn emit_assert_not_checked<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_selected(step, ctx, false).boxed()
}

pub fn emit_assert_editable<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_editable(step, ctx, true).boxed()
}

pub fn emit_assert_not_editable<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_editable(step, ctx, false).boxed()
}

pub fn emit_assert_element_present<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_presence(step, ctx, true).boxed()
}

pub fn emit_assert_element_not_present<'a>(
    step: &'a Step,
    ctx: &'a EmitContext,
) -> EmitFuture<'a> {
    assert_presence(step, ctx, false).boxed()
}

pub fn emit_assert_text<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_element_text(step, ctx, "assertEquals").boxed()
}

pub fn emit_assert_not_text<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_element_text(step, ctx, "assertNotEquals").boxed()
}

/// Shared by `assertValue` and `assertSelectedValue`
pub fn emit_assert_value<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    assert_value(step, ctx, "assertEquals").boxed()
}

pub fn emit_assert_not_selected_value<'a>(
    step: &'a Step,
    ctx: &'a EmitContext,
) -> EmitFuture<'a> {
    assert_value(step, ctx, "assertNotEquals").boxed()
}

/// Looks up the label of the option whose value is currently selected
pub fn emit_assert_selected_label<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let lookup = ctx.locate(step.require_target()?).await?;
        Ok(Block::braced(vec![
            format!("$element = $I->findElement({});", lookup),
            "$value = $element->getAttribute(\"value\");".to_string(),
            "$selectedText = $element->findElement(WebDriverBy::xpath(\"option[@value='\" . $value . \"']\"))->getText();"
                .to_string(),
            format!("$I->assertEquals({}, $selectedText);", expected(step, ctx)),
            "unset($element, $value, $selectedText);".to_string(),
        ])
        .into())
    }
    .boxed()
}

pub fn emit_assert_title<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let title = ctx.text(step.target().unwrap_or(""));
        Ok(Emission::statement(format!(
            "$I->assertEquals({}, $I->getTitle());",
            title
        )))
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assert_text_embeds_escaped_literal() {
        let ctx = EmitContext::default();
        let out = emit_assert_text(&Step::new("assertText", "id=msg", "Saved \"draft\""), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(
                r#"$I->assertEquals("Saved \"draft\"", $I->findElement(WebDriverBy::id("msg"))->getText());"#
            )
        );
    }

    #[tokio::test]
    async fn test_assert_variable() {
        let ctx = EmitContext::default();
        let out = emit_assert(&Step::new("assert", "count", "3"), &ctx).await.unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$I->assertEquals("3", $this->vars["count"]);"#)
        );
    }

    #[tokio::test]
    async fn test_title_and_alert() {
        let ctx = EmitContext::default();
        let title = emit_assert_title(&Step::new("assertTitle", "Home", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(
            title,
            Emission::statement(r#"$I->assertEquals("Home", $I->getTitle());"#)
        );

        let alert = emit_assert_alert(&Step::new("assertAlert", "Are you sure?", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(
            alert,
            Emission::statement(
                r#"$I->assertEquals("Are you sure?", $I->switchTo()->alert()->getText());"#
            )
        );
    }

    #[tokio::test]
    async fn test_element_presence_blocks() {
        let ctx = EmitContext::default();
        let present = emit_assert_element_present(&Step::new("assertElementPresent", "id=a", ""), &ctx)
            .await
            .unwrap()
            .render("");
        assert!(present.contains("$I->assertGreaterThan(0, count($elements));"));

        let absent =
            emit_assert_element_not_present(&Step::new("assertElementNotPresent", "id=a", ""), &ctx)
                .await
                .unwrap()
                .render("");
        assert!(absent.contains("$I->assertCount(0, $elements);"));
        assert!(absent.ends_with("unset($elements);\n}"));
    }

    #[tokio::test]
    async fn test_not_selected_value() {
        let ctx = EmitContext::default();
        let out = emit_assert_not_selected_value(
            &Step::new("assertNotSelectedValue", "id=size", "XL"),
            &ctx,
        )
        .await
        .unwrap()
        .render("");
        assert!(out.contains(r#"$I->assertNotEquals("XL", $value);"#));
    }
}
