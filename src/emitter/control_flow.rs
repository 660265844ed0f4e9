//! Control-flow generators.
//!
//! Openers declare `ending_level_adjustment: 1` and closers
//! `starting_level_adjustment: -1`; the flattening pass keeps the ambient
//! level. Conditions are script bodies evaluated in the browser and coerced
//! to bool.

use futures::FutureExt;

use super::context::EmitContext;
use super::emission::{Block, LeveledStatement};
use super::registry::EmitFuture;
use super::script::Script;
use crate::error::Result;
use crate::parser::Step;

/// Boolean-coerced evaluation of the step's condition script
fn condition(step: &Step, ctx: &EmitContext) -> Result<String> {
    let script = Script::parse(step.require_target()?);
    Ok(format!("(bool) {}", script.expression_call(&ctx.vars)))
}

fn line(text: impl Into<String>) -> Vec<LeveledStatement> {
    vec![LeveledStatement::new(0, text)]
}

pub fn emit_if<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let guard = condition(step, ctx)?;
        Ok(Block::opening(line(format!("if ({}) {{", guard))).into())
    }
    .boxed()
}

pub fn emit_else_if<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let guard = condition(step, ctx)?;
        Ok(Block::continuing(line(format!("}} elseif ({}) {{", guard))).into())
    }
    .boxed()
}

pub fn emit_else<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { Ok(Block::continuing(line("} else {")).into()) }.boxed()
}

pub fn emit_end<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { Ok(Block::closing(line("}")).into()) }.boxed()
}

pub fn emit_do<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { Ok(Block::opening(line("do {")).into()) }.boxed()
}

pub fn emit_repeat_if<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let guard = condition(step, ctx)?;
        Ok(Block::closing(line(format!("}} while ({});", guard))).into())
    }
    .boxed()
}

pub fn emit_while<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let guard = condition(step, ctx)?;
        Ok(Block::opening(line(format!("while ({}) {{", guard))).into())
    }
    .boxed()
}

/// Iterates the collection variable (target), binding each item to the
/// iterator variable (value) at the top of the loop body
pub fn emit_for_each<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let collection = step.require_target()?;
        let iterator = step.require_value()?;
        if !ctx.vars.is_bound(collection) {
            log::warn!(
                "forEach iterates '{}' before any step stores it",
                collection
            );
        }
        Ok(Block::opening(vec![
            LeveledStatement::new(
                0,
                format!("foreach ({} as $collectionItem) {{", ctx.vars.read(collection)),
            ),
            LeveledStatement::new(1, ctx.vars.write(iterator, "$collectionItem")),
        ])
        .into())
    }
    .boxed()
}

/// Repeats the body a fixed number of times; the count may be a variable
pub fn emit_times<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let count = ctx.text(step.require_target()?);
        Ok(Block::opening(line(format!(
            "foreach (array_fill(0, (int) {}, null) as $_) {{",
            count
        )))
        .into())
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::emission::Emission;
    use crate::emitter::CommandRegistry;

    async fn emit_all(steps: &[Step]) -> Vec<Emission> {
        let registry = CommandRegistry::new();
        let ctx = EmitContext::default();
        let mut out = Vec::new();
        for step in steps {
            out.push(registry.emit(step, &ctx).await.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_if_chain_is_balanced() {
        let emitted = emit_all(&[
            Step::new("if", "${n} > 1", ""),
            Step::new("elseIf", "${n} == 1", ""),
            Step::new("else", "", ""),
            Step::new("end", "", ""),
        ])
        .await;
        let total: i32 = emitted.iter().map(Emission::net_adjustment).sum();
        assert_eq!(total, 0);
        assert_eq!(
            emitted[0].render(""),
            r#"if ((bool) $I->executeJS("return (arguments[0] > 1);", [$this->vars["n"]])) {"#
        );
        assert_eq!(
            emitted[1].render(""),
            r#"} elseif ((bool) $I->executeJS("return (arguments[0] == 1);", [$this->vars["n"]])) {"#
        );
        assert_eq!(emitted[2].render(""), "} else {");
        assert_eq!(emitted[3].render(""), "}");
    }

    #[tokio::test]
    async fn test_loops_are_balanced() {
        for opener in [
            Step::new("while", "true", ""),
            Step::new("times", "3", ""),
            Step::new("forEach", "items", "item"),
        ] {
            let emitted = emit_all(&[opener.clone(), Step::new("end", "", "")]).await;
            let total: i32 = emitted.iter().map(Emission::net_adjustment).sum();
            assert_eq!(total, 0, "{} is unbalanced", opener.name);
        }

        let emitted = emit_all(&[
            Step::new("do", "", ""),
            Step::new("repeatIf", "${again}", ""),
        ])
        .await;
        assert_eq!(emitted[0].net_adjustment() + emitted[1].net_adjustment(), 0);
        assert_eq!(
            emitted[1].render(""),
            r#"} while ((bool) $I->executeJS("return (arguments[0]);", [$this->vars["again"]]));"#
        );
    }

    #[tokio::test]
    async fn test_for_each_binds_iterator() {
        let ctx = EmitContext::default();
        let out = emit_for_each(&Step::new("forEach", "names", "name"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out.render("    "),
            "foreach ($this->vars[\"names\"] as $collectionItem) {\n    \
             $this->vars[\"name\"] = $collectionItem;"
        );
        assert!(ctx.vars.is_bound("name"));
    }

    #[tokio::test]
    async fn test_times_accepts_variable_count() {
        let ctx = EmitContext::default();
        let out = emit_times(&Step::new("times", "${n}", ""), &ctx).await.unwrap();
        assert_eq!(
            out.render(""),
            r#"foreach (array_fill(0, (int) $this->vars["n"], null) as $_) {"#
        );
    }

    #[tokio::test]
    async fn test_condition_requires_target() {
        let ctx = EmitContext::default();
        assert!(emit_if(&Step::new("if", "", ""), &ctx).await.is_err());
    }
}
