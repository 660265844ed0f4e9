use futures::FutureExt;
use regex::Regex;
use std::sync::LazyLock;

use crate::emitter::addressing::{emit_frame_switch, emit_window_switch};
use crate::emitter::context::EmitContext;
use crate::emitter::emission::Emission;
use crate::emitter::literal::seconds;
use crate::emitter::registry::EmitFuture;
use crate::error::{EmitError, Result};
use crate::parser::Step;

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(file|http|https)://").unwrap());

/// Absolute targets are used as-is; relative ones are joined onto `base_url`
pub fn resolve_url(base_url: &str, target: &str) -> String {
    if ABSOLUTE_URL.is_match(target) {
        return target.to_string();
    }
    if target.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), target)
    } else {
        format!("{}{}", base_url, target)
    }
}

/// Parse a `WIDTHxHEIGHT` size
fn parse_size(raw: &str) -> Option<(u32, u32)> {
    let (width, height) = raw.split_once('x')?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

pub fn emit_open<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let url = resolve_url(&ctx.config.base_url, step.require_target()?);
        Ok(Emission::statement(format!("$I->amOnUrl({});", ctx.text(&url))))
    }
    .boxed()
}

pub fn emit_close<'a>(_step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { Ok(Emission::statement("$I->closeTab();")) }.boxed()
}

pub fn emit_set_window_size<'a>(step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let raw = step.require_target()?;
        let (width, height) = parse_size(raw).ok_or_else(|| EmitError::InvalidArgument {
            command: step.name.clone(),
            message: format!("expected WIDTHxHEIGHT, got '{}'", raw),
        })?;
        Ok(Emission::statement(format!(
            "$I->resizeWindow({}, {});",
            width, height
        )))
    }
    .boxed()
}

/// The pause duration may be recorded in either the target or the value
pub fn emit_pause<'a>(step: &'a Step, _ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move {
        let raw = step.target().or(step.value()).unwrap_or("0");
        let ms: u64 = raw.trim().parse().map_err(|_| EmitError::InvalidArgument {
            command: step.name.clone(),
            message: format!("'{}' is not a duration in milliseconds", raw),
        })?;
        Ok(Emission::statement(format!("$I->wait({});", seconds(ms))))
    }
    .boxed()
}

pub fn emit_select_frame<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { emit_frame_switch(step.require_target()?, ctx).await }.boxed()
}

pub fn emit_select_window<'a>(step: &'a Step, ctx: &'a EmitContext) -> EmitFuture<'a> {
    async move { emit_window_switch(step.require_target()?, ctx) }.boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ExportConfig;

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url("https://example.com/", "/login"),
            "https://example.com/login"
        );
        assert_eq!(
            resolve_url("https://example.com", "/login"),
            "https://example.com/login"
        );
        assert_eq!(
            resolve_url("https://example.com", "https://other.com/x"),
            "https://other.com/x"
        );
        assert_eq!(resolve_url("", "file:///tmp/a.html"), "file:///tmp/a.html");
    }

    #[tokio::test]
    async fn test_open_joins_base_url() {
        let ctx = EmitContext::with_config(ExportConfig::default().with_base_url("https://example.com"));
        let out = emit_open(&Step::new("open", "/login", ""), &ctx).await.unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$I->amOnUrl("https://example.com/login");"#)
        );
    }

    #[tokio::test]
    async fn test_open_interpolates_variables() {
        let ctx = EmitContext::default();
        let out = emit_open(&Step::new("open", "https://example.com/u/${id}", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(
            out,
            Emission::statement(r#"$I->amOnUrl("https://example.com/u/" . $this->vars["id"]);"#)
        );
    }

    #[tokio::test]
    async fn test_set_window_size() {
        let ctx = EmitContext::default();
        let out = emit_set_window_size(&Step::new("setWindowSize", "1280x800", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(out, Emission::statement("$I->resizeWindow(1280, 800);"));

        assert!(emit_set_window_size(&Step::new("setWindowSize", "wide", ""), &ctx)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_pause_converts_to_seconds() {
        let ctx = EmitContext::default();
        let out = emit_pause(&Step::new("pause", "1500", ""), &ctx).await.unwrap();
        assert_eq!(out, Emission::statement("$I->wait(1.5);"));

        let out = emit_pause(&Step::new("pause", "", "2000"), &ctx).await.unwrap();
        assert_eq!(out, Emission::statement("$I->wait(2);"));
    }

    #[tokio::test]
    async fn test_select_frame_and_window() {
        let ctx = EmitContext::default();
        let frame = emit_select_frame(&Step::new("selectFrame", "relative=top", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(frame, Emission::statement("$I->switchTo()->defaultContent();"));

        let window = emit_select_window(&Step::new("selectWindow", "win_ser_2", ""), &ctx)
            .await
            .unwrap();
        assert_eq!(
            window,
            Emission::statement("$I->switchTo()->window($I->getAllWindowHandles()[2]);")
        );

        assert!(emit_select_window(&Step::new("selectWindow", "relative=top", ""), &ctx)
            .await
            .is_err());
    }
}
