//! Element interaction: clicks, mouse, checkboxes, typing and selects.
//!
//! Each generator waits for the element when the action needs it, performs
//! the action, and unsets any element handle it introduced.

use futures::FutureExt;

use crate::emitter::context::EmitContext;
use crate::emitter::emission::{Block, Emission};
use crate::emitter::keys::{normalize, KeyInput};
use crate::emitter::literal::php_string;
use crate::emitter::registry::EmitFuture;
use crate::error::Result;
use crate::parser::Step;

/// `{ waitForElementClickable; <action>(locator) }`
async fn clickable_action(step: &Step, ctx: &EmitContext, action: &str) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    Ok(Block::braced(vec![
        format!("$I->waitForElementClickable({});", lookup),
        format!("$I->{}({});", action, lookup),
    ])
    .into())
}

/// `{ $element = findElement; <lines>; unset($element) }`
async fn with_element(step: &Step, ctx: &EmitContext, lines: Vec<String>) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    let mut inner = vec![format!("$element = $I->findElement({});", lookup)];
    inner.extend(lines);
    inner.push("unset($element);".to_string());
    Ok(Block::braced(inner).into())
}

/// Click only when the checked state differs from `checked`
async fn set_checked(step: &Step, ctx: &EmitContext, checked: bool) -> Result<Emission> {
    let lookup = ctx.locate(step.require_target()?).await?;
    let guard = if checked {
        "!$element->isSelected()"
    } else {
        "$element->isSelected()"
    };
    Ok(Block::braced(vec![
        format!("$I->waitForElementClickable({});", lookup),
        format!("$element = $I->findElement({});", lookup),
        format!("if ({}) $element->click();", guard),
        "unset($element);".to_string(),
    ])
    .into())
}

pub fn emit_click<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    clickable_action(step, ctx, "click").boxed()
}

pub fn emit_double_click<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    clickable_action(step, ctx, "doubleClick").boxed()
}

pub fn emit_mouse_down<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    clickable_action(step, ctx, "clickAndHold").boxed()
}

pub fn emit_mouse_up<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    with_element(step, ctx, vec!["$I->release($element);".to_string()]).boxed()
}

pub fn emit_mouse_move<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    with_element(step, ctx, vec!["$I->moveToElement($element);".to_string()]).boxed()
}

/// Moves the pointer to the top-left corner of the page body
pub fn emit_mouse_out<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        Ok(Block::braced(vec![
            "$element = $I->findElement(WebDriverBy::tagName(\"body\"));".to_string(),
            "$I->moveToElement($element, 0, 0);".to_string(),
            "unset($element);".to_string(),
        ])
        .into())
    }
    .boxed()
}

pub fn emit_check<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    set_checked(step, ctx, true).boxed()
}

pub fn emit_uncheck<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    set_checked(step, ctx, false).boxed()
}

pub fn emit_submit<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let lookup = ctx.locate(step.require_target()?).await?;
        Ok(Emission::statement(format!("$I->submitForm({}, []);", lookup)))
    }
    .boxed()
}

pub fn emit_send_keys<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let lookup = ctx.locate(step.require_target()?).await?;
        let keys = normalize(
            &step.name,
            &KeyInput::from_recorded(step.value().unwrap_or("")),
            &ctx.vars,
        )?;
        Ok(Emission::statement(format!(
            "$I->findElement({})->sendKeys({});",
            lookup, keys
        )))
    }
    .boxed()
}

/// Waits for the element, clears it, then sends the keys
pub fn emit_type<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let lookup = ctx.locate(step.require_target()?).await?;
        let keys = normalize(
            &step.name,
            &KeyInput::from_recorded(step.value().unwrap_or("")),
            &ctx.vars,
        )?;
        Ok(Block::braced(vec![
            format!("$I->waitForElement({});", lookup),
            format!("$element = $I->findElement({});", lookup),
            "$element->clear();".to_string(),
            format!("$element->sendKeys({});", keys),
            "unset($element);".to_string(),
        ])
        .into())
    }
    .boxed()
}

pub fn emit_edit_content<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let content = ctx.text(step.value().unwrap_or(""));
        let script = "if (arguments[0].contentEditable === 'true') { arguments[0].innerText = arguments[1]; }";
        with_element(
            step,
            ctx,
            vec![format!(
                "$I->executeJS({}, [$element, {}]);",
                php_string(script),
                content
            )],
        )
        .await
    }
    .boxed()
}

/// Shared by `select`, `addSelection` and `removeSelection`
pub fn emit_select<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let dropdown = ctx.locate(step.require_target()?).await?;
        let option = ctx.select_option(step.require_value()?).await?;
        Ok(Block::braced(vec![
            format!("$dropdown = $I->findElement({});", dropdown),
            format!("$dropdown->findElement({})->click();", option),
            "unset($dropdown);".to_string(),
        ])
        .into())
    }
    .boxed()
}

pub fn emit_drag_and_drop<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let dragged = ctx.locate(step.require_target()?).await?;
        let dropped = ctx.locate(step.require_value()?).await?;
        Ok(Emission::statement(format!(
            "$I->dragAndDrop({}, {});",
            dragged, dropped
        )))
    }
    .boxed()
}
