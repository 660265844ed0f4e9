//! Embedded JavaScript bodies and their argument lists.

use super::literal::{php_string, VARIABLE_REF};
use super::variables::VariableScope;

/// A script body with its declared input variables.
///
/// `${name}` references in the recorded text are rewritten to
/// `arguments[i]`; `argv[i]` holds the variable passed in that slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub body: String,
    pub argv: Vec<String>,
}

impl Script {
    pub fn parse(raw: &str) -> Self {
        let mut argv: Vec<String> = Vec::new();
        let body = VARIABLE_REF
            .replace_all(raw.trim(), |caps: &regex::Captures| {
                let name = &caps[1];
                let index = match argv.iter().position(|existing| existing == name) {
                    Some(index) => index,
                    None => {
                        argv.push(name.to_string());
                        argv.len() - 1
                    }
                };
                format!("arguments[{}]", index)
            })
            .to_string();
        Self { body, argv }
    }

    /// Argument expressions resolved through the variable scope
    pub fn arguments(&self, scope: &VariableScope) -> Vec<String> {
        self.argv.iter().map(|name| scope.read(name)).collect()
    }

    /// `$I->executeJS(...)` call evaluating the body as an expression
    pub fn expression_call(&self, scope: &VariableScope) -> String {
        js_call(
            "executeJS",
            &format!("return ({});", self.body),
            &self.arguments(scope),
        )
    }
}

/// `$I-><method>("<script>", [args])`, omitting an empty argument list
pub fn js_call(method: &str, script: &str, args: &[String]) -> String {
    if args.is_empty() {
        format!("$I->{}({})", method, php_string(script))
    } else {
        format!(
            "$I->{}({}, [{}])",
            method,
            php_string(script),
            args.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collects_arguments_in_order() {
        let script = Script::parse("  return ${a} + ${b} * ${a};  ");
        assert_eq!(script.body, "return arguments[0] + arguments[1] * arguments[0];");
        assert_eq!(script.argv, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_expression_call() {
        let scope = VariableScope::new();
        let script = Script::parse("${count} > 3");
        assert_eq!(
            script.expression_call(&scope),
            r#"$I->executeJS("return (arguments[0] > 3);", [$this->vars["count"]])"#
        );
    }

    #[test]
    fn test_call_without_arguments() {
        let scope = VariableScope::new();
        let script = Script::parse("true");
        assert_eq!(
            script.expression_call(&scope),
            r#"$I->executeJS("return (true);")"#
        );
    }
}
