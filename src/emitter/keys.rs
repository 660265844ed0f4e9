//! Key/value normalization for `sendKeys` and `type`.
//!
//! Recorded values mix literal text, `${name}` variable references and
//! `${KEY_<NAME>}` key tokens. Values without key tokens stay scalar.

use regex::Regex;
use std::sync::LazyLock;

use super::literal::{interpolate, php_string, variable_ref};
use super::variables::VariableScope;
use crate::error::{EmitError, Result};

static KEY_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\{KEY_([A-Z0-9_]+)\}$").unwrap());

/// Splits a value into text, variable and key tokens
static TOKENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{[A-Za-z0-9_.]+\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Single(String),
    Sequence(Vec<String>),
}

impl KeyInput {
    /// Values containing key tokens become a token sequence
    pub fn from_recorded(raw: &str) -> Self {
        if raw.contains("${KEY_") {
            KeyInput::Sequence(tokenize(raw))
        } else {
            KeyInput::Single(raw.to_string())
        }
    }
}

/// Ordered tokens of `raw`; every `${...}` reference is its own token
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in TOKENS.find_iter(raw) {
        if m.start() > last {
            tokens.push(raw[last..m.start()].to_string());
        }
        tokens.push(m.as_str().to_string());
        last = m.end();
    }
    if last < raw.len() {
        tokens.push(raw[last..].to_string());
    }
    tokens
}

/// `WebDriverKeys` constant for a recorded key name (without `KEY_`), or
/// `None` when php-webdriver has no such key
pub fn key_constant(name: &str) -> Option<String> {
    let constant = match name {
        "ESC" | "ESCAPE" => "ESCAPE",
        "CTRL" | "CONTROL" => "CONTROL",
        "BKSP" | "BACKSPACE" => "BACKSPACE",
        "DEL" | "DELETE" => "DELETE",
        "INS" | "INSERT" => "INSERT",
        "PGUP" | "PAGE_UP" => "PAGE_UP",
        "PGDN" | "PAGE_DOWN" => "PAGE_DOWN",
        "NUM_PLUS" | "ADD" => "ADD",
        "NUM_MINUS" | "SUBTRACT" => "SUBTRACT",
        "NUM_MULTIPLY" | "MULTIPLY" => "MULTIPLY",
        "NUM_DIVISION" | "DIVIDE" => "DIVIDE",
        "NUM_PERIOD" | "DECIMAL" => "DECIMAL",
        "RETURN" | "RETURN_KEY" => "RETURN_KEY",
        "COMMAND" | "META" => "META",
        "LEFT" | "UP" | "RIGHT" | "DOWN" | "ENTER" | "TAB" | "HOME" | "END" | "SHIFT"
        | "ALT" | "SPACE" | "SEMICOLON" | "EQUALS" | "PAUSE" | "CANCEL" | "HELP"
        | "CLEAR" | "SEPARATOR" | "NULL" => name,
        other => {
            if let Some(digit) = other
                .strip_prefix("NUMPAD")
                .or_else(|| other.strip_prefix("NUM"))
                .filter(|d| d.len() == 1 && d.as_bytes()[0].is_ascii_digit())
            {
                return Some(format!("WebDriverKeys::NUMPAD{}", digit));
            }
            let is_function_key = other
                .strip_prefix('F')
                .and_then(|n| n.parse::<u8>().ok())
                .is_some_and(|n| (1..=12).contains(&n));
            if !is_function_key {
                return None;
            }
            other
        }
    };
    Some(format!("WebDriverKeys::{}", constant))
}

fn token_expression(command: &str, token: &str, scope: &VariableScope) -> Result<String> {
    if let Some(caps) = KEY_TOKEN.captures(token) {
        return key_constant(&caps[1]).ok_or_else(|| EmitError::InvalidArgument {
            command: command.to_string(),
            message: format!("unknown key '{}'", token),
        });
    }
    Ok(match variable_ref(token) {
        Some(name) => scope.read(name),
        None => php_string(token),
    })
}

/// Argument expression for a send-keys call made by `command`
pub fn normalize(command: &str, input: &KeyInput, scope: &VariableScope) -> Result<String> {
    match input {
        KeyInput::Single(value) => Ok(interpolate(value, scope)),
        KeyInput::Sequence(tokens) => {
            let parts = tokens
                .iter()
                .map(|token| token_expression(command, token, scope))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", parts.join(", ")))
        }
    }
}
