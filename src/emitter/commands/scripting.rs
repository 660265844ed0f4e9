//! Script execution, `run` and `echo`.

use futures::FutureExt;

use crate::emitter::context::EmitContext;
use crate::emitter::emission::Emission;
use crate::emitter::registry::EmitFuture;
use crate::emitter::script::{js_call, Script};
use crate::parser::Step;

/// Assign to the value variable when one was recorded
fn store_or_run(step: &Step, ctx: &EmitContext, call: String) -> Emission {
    match step.value() {
        Some(name) => Emission::statement(ctx.vars.write(name, &call)),
        None => Emission::statement(format!("{};", call)),
    }
}

pub fn emit_execute_script<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let script = Script::parse(step.require_target()?);
        let call = js_call("executeJS", &script.body, &script.arguments(&ctx.vars));
        Ok(store_or_run(step, ctx, call))
    }
    .boxed()
}

/// The body is expected to evaluate to a promise; its outcome resolves the
/// WebDriver callback
pub fn emit_execute_async_script<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let script = Script::parse(step.require_target()?);
        let body = format!(
            "var callback = arguments[arguments.length - 1];{}.then(callback).catch(callback);",
            script.body
        );
        let call = js_call("executeAsyncJS", &body, &script.arguments(&ctx.vars));
        Ok(store_or_run(step, ctx, call))
    }
    .boxed()
}

pub fn emit_run_script<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let script = Script::parse(step.require_target()?);
        Ok(Emission::statement(format!(
            "{};",
            js_call("executeJS", &script.body, &script.arguments(&ctx.vars))
        )))
    }
    .boxed()
}

/// Calls the method generated for another test of the same project
pub fn emit_run<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let method = ctx.method_name(step.require_target()?);
        Ok(Emission::statement(format!("$this->{}($I);", method)))
    }
    .boxed()
}

pub fn emit_echo<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let message = ctx.text(step.target().unwrap_or(""));
        Ok(Emission::statement(format!("$I->comment({});", message)))
    }
    .boxed()
}
