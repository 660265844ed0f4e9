//! New-window handling.
//!
//! A step recorded with `opensWindow` is wrapped so the generated code
//! snapshots the known window handles before the step and, afterwards,
//! binds whichever handle is new to the step's `windowHandleName`. The
//! polling itself lives in a `waitForWindow` helper method on the class,
//! which throws when no window shows up in time.

use super::emission::{Block, Emission, LeveledStatement};
use super::literal::{php_string, seconds};
use super::variables::{VariableScope, WINDOW_HANDLES_SLOT};
use crate::error::{EmitError, Result};
use crate::parser::Step;

/// Name of the generated helper method
pub const WAIT_FOR_WINDOW: &str = "waitForWindow";

/// Message thrown by generated code when no new window appears
pub const NEW_WINDOW_TIMEOUT_MESSAGE: &str = "New window did not appear before timeout";

/// A helper method the exporter adds to the generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    /// Parameter list without the surrounding parentheses
    pub parameters: String,
    pub commands: Vec<LeveledStatement>,
}

impl MethodDeclaration {
    /// Everything between `function` and the opening brace
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameters)
    }
}

/// Wraps window-opening steps with handle bookkeeping
#[derive(Debug, Clone, Copy)]
pub struct WindowCapture {
    default_timeout_secs: u64,
}

impl WindowCapture {
    pub fn new(default_timeout_secs: u64) -> Self {
        Self {
            default_timeout_secs,
        }
    }

    pub fn wrap(&self, step: &Step, emitted: Emission, vars: &VariableScope) -> Result<Emission> {
        let handle_name = step
            .window_handle_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| EmitError::MissingField {
                command: step.name.clone(),
                field: "windowHandleName",
            })?;
        let timeout = match step.window_timeout {
            Some(ms) => seconds(ms),
            None => self.default_timeout_secs.to_string(),
        };

        let (mut commands, starting, ending) = match emitted {
            Emission::Empty => (Vec::new(), 0, 0),
            Emission::Statement(text) => (vec![LeveledStatement::new(0, text)], 0, 0),
            Emission::Block(block) => (
                block.commands,
                block.starting_level_adjustment,
                block.ending_level_adjustment,
            ),
        };
        commands.insert(
            0,
            LeveledStatement::new(
                0,
                vars.write(WINDOW_HANDLES_SLOT, "$I->getAllWindowHandles()"),
            ),
        );
        commands.push(LeveledStatement::new(
            0,
            vars.write(
                handle_name,
                &format!("$this->{}($I, {})", WAIT_FOR_WINDOW, timeout),
            ),
        ));

        Ok(Emission::Block(Block {
            commands,
            starting_level_adjustment: starting,
            ending_level_adjustment: ending,
        }))
    }
}

/// The `waitForWindow` helper: polls until a handle not present in the
/// snapshot appears, throwing once the timeout passes
pub fn emit_wait_for_window(default_timeout_secs: u64, vars: &VariableScope) -> MethodDeclaration {
    let line = |level: usize, text: &str| LeveledStatement::new(level, text);
    let commands = vec![
        line(0, &format!("$handlesThen = {};", vars.read(WINDOW_HANDLES_SLOT))),
        line(0, "$deadline = microtime(true) + $timeout;"),
        line(0, "do {"),
        line(1, "$newHandles = array_values(array_diff($I->getAllWindowHandles(), $handlesThen));"),
        line(1, "if (count($newHandles) > 0) {"),
        line(2, "return $newHandles[0];"),
        line(1, "}"),
        line(1, "$I->wait(0.1);"),
        line(0, "} while (microtime(true) < $deadline);"),
        line(
            0,
            &format!(
                "throw new \\RuntimeException({});",
                php_string(NEW_WINDOW_TIMEOUT_MESSAGE)
            ),
        ),
    ];

    MethodDeclaration {
        name: WAIT_FOR_WINDOW.to_string(),
        parameters: format!("AcceptanceTester $I, $timeout = {}", default_timeout_secs),
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_step() -> Step {
        Step {
            opens_window: true,
            window_handle_name: Some("popup".to_string()),
            ..Step::new("click", "id=open", "")
        }
    }

    #[test]
    fn test_wrap_snapshots_then_binds() {
        let vars = VariableScope::new();
        let wrapped = WindowCapture::new(2)
            .wrap(
                &window_step(),
                Emission::statement("$I->click(WebDriverBy::id(\"open\"));"),
                &vars,
            )
            .unwrap();

        assert_eq!(
            wrapped.render(""),
            "$this->vars[\"windowHandles\"] = $I->getAllWindowHandles();\n\
             $I->click(WebDriverBy::id(\"open\"));\n\
             $this->vars[\"popup\"] = $this->waitForWindow($I, 2);"
        );
        assert!(vars.is_bound("popup"));
    }

    #[test]
    fn test_wrap_uses_recorded_timeout() {
        let vars = VariableScope::new();
        let step = Step {
            window_timeout: Some(4500),
            ..window_step()
        };
        let wrapped = WindowCapture::new(2)
            .wrap(&step, Emission::statement("x();"), &vars)
            .unwrap();
        assert!(wrapped.render("").ends_with("$this->waitForWindow($I, 4.5);"));
    }

    #[test]
    fn test_wrap_requires_handle_name() {
        let step = Step {
            opens_window: true,
            ..Step::new("click", "id=open", "")
        };
        let err = WindowCapture::new(2)
            .wrap(&step, Emission::Empty, &VariableScope::new())
            .unwrap_err();
        assert!(matches!(err, EmitError::MissingField { field: "windowHandleName", .. }));
    }

    #[test]
    fn test_helper_throws_on_timeout() {
        let method = emit_wait_for_window(2, &VariableScope::new());
        assert_eq!(method.name, "waitForWindow");
        assert_eq!(method.signature(), "waitForWindow(AcceptanceTester $I, $timeout = 2)");
        let last = method.commands.last().unwrap();
        assert_eq!(
            last.text,
            "throw new \\RuntimeException(\"New window did not appear before timeout\");"
        );
    }
}
