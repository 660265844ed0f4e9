//! `store*` generators.
//!
//! Every store writes through the variable scope, which also records the
//! name as bound. A step recorded without a variable name stores nothing.

use futures::FutureExt;

use crate::emitter::context::EmitContext;
use crate::emitter::emission::Emission;
use crate::emitter::literal::php_string;
use crate::emitter::registry::EmitFuture;
use crate::error::{EmitError, Result};
use crate::parser::Step;

fn assign(ctx: &EmitContext, name: &str, expression: &str) -> Emission {
    Emission::statement(ctx.vars.write(name, expression))
}

/// Split an attribute locator at its last `@` into (element locator, attribute)
pub fn split_attribute_locator<'s>(step: &Step, raw: &'s str) -> Result<(&'s str, &'s str)> {
    match raw.rsplit_once('@') {
        Some((locator, attribute)) if !locator.is_empty() && !attribute.is_empty() => {
            Ok((locator, attribute))
        }
        _ => Err(EmitError::InvalidArgument {
            command: step.name.clone(),
            message: format!("expected <locator>@<attribute>, got '{}'", raw),
        }),
    }
}

/// `store`: target is the value, value is the variable name
pub fn emit_store<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.value() else {
            return Ok(Emission::Empty);
        };
        let value = ctx.text(step.target().unwrap_or(""));
        Ok(assign(ctx, name, &value))
    }
    .boxed()
}

pub fn emit_store_text<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.value() else {
            return Ok(Emission::Empty);
        };
        let lookup = ctx.locate(step.require_target()?).await?;
        Ok(assign(
            ctx,
            name,
            &format!("$I->findElement({})->getText()", lookup),
        ))
    }
    .boxed()
}

pub fn emit_store_attribute<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.value() else {
            return Ok(Emission::Empty);
        };
        let (locator, attribute) = split_attribute_locator(step, step.require_target()?)?;
        let lookup = ctx.locate(locator).await?;
        Ok(assign(
            ctx,
            name,
            &format!(
                "$I->findElement({})->getAttribute({})",
                lookup,
                php_string(attribute)
            ),
        ))
    }
    .boxed()
}

/// `storeTitle`: the variable name is recorded in the value
pub fn emit_store_title<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.value() else {
            return Ok(Emission::Empty);
        };
        Ok(assign(ctx, name, "$I->getTitle()"))
    }
    .boxed()
}

pub fn emit_store_value<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.value() else {
            return Ok(Emission::Empty);
        };
        let lookup = ctx.locate(step.require_target()?).await?;
        Ok(assign(
            ctx,
            name,
            &format!("$I->findElement({})->getAttribute(\"value\")", lookup),
        ))
    }
    .boxed()
}

/// Decodes the recorded JSON at run time into an associative array
pub fn emit_store_json<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.value() else {
            return Ok(Emission::Empty);
        };
        let json = php_string(step.target().unwrap_or("null"));
        Ok(assign(ctx, name, &format!("json_decode({}, true)", json)))
    }
    .boxed()
}

/// `storeWindowHandle`: the variable name is the target
pub fn emit_store_window_handle<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.target() else {
            return Ok(Emission::Empty);
        };
        Ok(assign(ctx, name, "$I->getWindowHandle()"))
    }
    .boxed()
}

pub fn emit_store_xpath_count<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let Some(name) = step.value() else {
            return Ok(Emission::Empty);
        };
        let lookup = ctx.locate(step.require_target()?).await?;
        Ok(assign(
            ctx,
            name,
            &format!("count($I->findElements({}))", lookup),
        ))
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_attribute_locator() {
        let step = Step::new("storeAttribute", "", "");
        assert_eq!(
            split_attribute_locator(&step, "css=#field@data-id").unwrap(),
            ("css=#field", "data-id")
        );
        assert_eq!(
            split_attribute_locator(&step, "xpath=//a[@href]@href").unwrap(),
            ("xpath=//a[@href]", "href")
        );
        assert!(split_attribute_locator(&step, "css=#field").is_err());
    }

    #[tokio::test]
    async fn test_store_text_binds_variable() {
        let ctx = EmitContext::default();
        let out = emit_store_text(&Step::new("storeText", "id=total", "total"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(
                r#"$this->vars["total"] = $I->findElement(WebDriverBy::id("total"))->getText();"#
            )
        );
        assert!(ctx.vars.is_bound("total"));
    }

    #[tokio::test]
    async fn test_store_without_name_is_empty() {
        let ctx = EmitContext::default();
        let out = emit_store_text(&Step::new("storeText", "bogus", ""), &ctx)
            .await
            .unwrap();
        assert!(out.is_empty());
        assert!(ctx.vars.bound_names().is_empty());
    }

    #[tokio::test]
    async fn test_store_literal_and_json() {
        let ctx = EmitContext::default();
        let out = emit_store(&Step::new("store", "Hello ${name}", "greeting"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$this->vars["greeting"] = "Hello " . $this->vars["name"];"#)
        );

        let out = emit_store_json(&Step::new("storeJson", r#"{"a":1}"#, "data"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$this->vars["data"] = json_decode("{\"a\":1}", true);"#)
        );
    }

    #[tokio::test]
    async fn test_store_window_handle_uses_target() {
        let ctx = EmitContext::default();
        let out = emit_store_window_handle(&Step::new("storeWindowHandle", "root", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$this->vars["root"] = $I->getWindowHandle();"#)
        );
    }

    #[tokio::test]
    async fn test_store_xpath_count() {
        let ctx = EmitContext::default();
        let out = emit_store_xpath_count(&Step::new("storeXpathCount", "//li", "items"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(
                r#"$this->vars["items"] = count($I->findElements(WebDriverBy::xpath("//li")));"#
            )
        );
    }

    #[tokio::test]
    async fn test_store_attribute_reads_named_attribute() {
        let ctx = EmitContext::default();
        let out = emit_store_attribute(
            &Step::new("storeAttribute", "css=a.next@href", "link"),
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(
            out,
            Emission::statement(
                r#"$this->vars["link"] = $I->findElement(WebDriverBy::cssSelector("a.next"))->getAttribute("href");"#
            )
        );
        assert!(ctx.vars.is_bound("link"));
    }

    #[tokio::test]
    async fn test_store_value_and_title() {
        let ctx = EmitContext::default();
        let out = emit_store_value(&Step::new("storeValue", "name=email", "email"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(
                r#"$this->vars["email"] = $I->findElement(WebDriverBy::name("email"))->getAttribute("value");"#
            )
        );

        let out = emit_store_title(&Step::new("storeTitle", "", "title"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$this->vars["title"] = $I->getTitle();"#)
        );
        assert!(ctx.vars.is_bound("title"));
    }
}
