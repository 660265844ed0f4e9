//! Window and frame addressing.
//!
//! Resolution order, first match wins: `relative=top|parent`, `index=<n>`,
//! `handle=<id>`, `name=<label>`, `win_ser_local`, `win_ser_<n>`. Frames fall
//! back to an element locator; windows fail instead.

use super::context::EmitContext;
use super::emission::{Block, Emission};
use crate::error::{EmitError, Result};

/// What a target string addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Window,
    Frame,
}

impl TargetKind {
    fn as_str(self) -> &'static str {
        match self {
            TargetKind::Window => "window",
            TargetKind::Frame => "frame",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressingMode {
    /// `relative=top` or `relative=parent`
    TopLevel,
    /// `index=<n>`
    Index(u32),
    /// `handle=<id>`
    Handle(String),
    /// `name=<label>`
    Name(String),
    /// `win_ser_local`: the first known handle
    SerialLocal,
    /// `win_ser_<n>`: the n-th known handle
    Serial(usize),
    /// Frames only: an element locator resolved by the locator resolver
    Element(String),
}

impl AddressingMode {
    pub fn parse(target: &str, kind: TargetKind) -> Result<Self> {
        let unsupported = || EmitError::UnsupportedAddressing {
            kind: kind.as_str(),
            target: target.to_string(),
        };

        match kind {
            TargetKind::Frame => {
                if target == "relative=top" || target == "relative=parent" {
                    Ok(AddressingMode::TopLevel)
                } else if let Some(index) = target.strip_prefix("index=") {
                    index
                        .trim()
                        .parse()
                        .map(AddressingMode::Index)
                        .map_err(|_| unsupported())
                } else if let Some(label) = target.strip_prefix("name=") {
                    Ok(AddressingMode::Name(label.to_string()))
                } else {
                    Ok(AddressingMode::Element(target.to_string()))
                }
            }
            TargetKind::Window => {
                if let Some(handle) = target.strip_prefix("handle=") {
                    Ok(AddressingMode::Handle(handle.to_string()))
                } else if let Some(label) = target.strip_prefix("name=") {
                    Ok(AddressingMode::Name(label.to_string()))
                } else if target == "win_ser_local" {
                    Ok(AddressingMode::SerialLocal)
                } else if let Some(ordinal) = target.strip_prefix("win_ser_") {
                    ordinal
                        .parse()
                        .map(AddressingMode::Serial)
                        .map_err(|_| unsupported())
                } else {
                    Err(unsupported())
                }
            }
        }
    }
}

/// Emit the switch for a `selectFrame` target
pub async fn emit_frame_switch(target: &str, ctx: &EmitContext) -> Result<Emission> {
    match AddressingMode::parse(target, TargetKind::Frame)? {
        AddressingMode::TopLevel => Ok(Emission::statement(
            "$I->switchTo()->defaultContent();",
        )),
        AddressingMode::Index(index) => Ok(Emission::statement(format!(
            "$I->switchTo()->frame({});",
            index
        ))),
        AddressingMode::Name(label) => Ok(Emission::statement(format!(
            "$I->switchTo()->frame({});",
            ctx.text(&label)
        ))),
        AddressingMode::Element(locator) => {
            let lookup = ctx.locate(&locator).await?;
            Ok(Block::braced(vec![
                format!("$element = $I->findElement({});", lookup),
                "$I->switchTo()->frame($element);".to_string(),
                "unset($element);".to_string(),
            ])
            .into())
        }
        mode => Err(EmitError::UnsupportedAddressing {
            kind: "frame",
            target: format!("{} ({:?})", target, mode),
        }),
    }
}

/// Emit the switch for a `selectWindow` target
pub fn emit_window_switch(target: &str, ctx: &EmitContext) -> Result<Emission> {
    let handle = match AddressingMode::parse(target, TargetKind::Window)? {
        AddressingMode::Handle(handle) => ctx.text(&handle),
        AddressingMode::Name(label) => ctx.text(&label),
        AddressingMode::SerialLocal => "$I->getAllWindowHandles()[0]".to_string(),
        AddressingMode::Serial(index) => format!("$I->getAllWindowHandles()[{}]", index),
        mode => {
            return Err(EmitError::UnsupportedAddressing {
                kind: "window",
                target: format!("{} ({:?})", target, mode),
            })
        }
    };
    Ok(Emission::statement(format!(
        "$I->switchTo()->window({});",
        handle
    )))
}
