//! Handling of alerts, confirmations and prompts that are already visible.

use futures::FutureExt;

use crate::emitter::context::EmitContext;
use crate::emitter::emission::{Block, Emission};
use crate::emitter::registry::EmitFuture;
use crate::parser::Step;

pub fn emit_answer_on_visible_prompt<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let answer = ctx.text(step.target().unwrap_or(""));
        Ok(Block::braced(vec![
            "$alert = $I->switchTo()->alert();".to_string(),
            format!("$alert->sendKeys({});", answer),
            "$alert->accept();".to_string(),
            "unset($alert);".to_string(),
        ])
        .into())
    }
    .boxed()
}

pub fn emit_choose_ok<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { Ok(Emission::statement("$I->acceptPopup();")) }.boxed()
}

/// Shared by visible confirmations and prompts
pub fn emit_choose_cancel<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { Ok(Emission::statement("$I->cancelPopup();")) }.boxed()
}
