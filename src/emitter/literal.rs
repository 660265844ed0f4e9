//! Literal escaping and `${name}` interpolation.
//!
//! Every recorded string embedded in generated code passes through
//! [`php_string`]; there is no other quoting path.

use regex::Regex;
use std::sync::LazyLock;

use super::variables::VariableScope;

/// `${name}` reference to a stored variable
pub static VARIABLE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_.]+)\}").unwrap());

/// Quote `value` as a PHP double-quoted string literal
pub fn php_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Name of the variable when `raw` is exactly one `${name}` reference
pub fn variable_ref(raw: &str) -> Option<&str> {
    let caps = VARIABLE_REF.captures(raw)?;
    let whole = caps.get(0)?;
    (whole.start() == 0 && whole.end() == raw.len())
        .then(|| caps.get(1).map(|m| m.as_str()))
        .flatten()
}

/// PHP expression for a recorded value, with `${name}` references read from
/// the variable scope and the surrounding text quoted
pub fn interpolate(raw: &str, scope: &VariableScope) -> String {
    if let Some(name) = variable_ref(raw) {
        return scope.read(name);
    }

    let mut parts = Vec::new();
    let mut last = 0;
    for caps in VARIABLE_REF.captures_iter(raw) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            parts.push(php_string(&raw[last..whole.start()]));
        }
        parts.push(scope.read(name.as_str()));
        last = whole.end();
    }
    if last < raw.len() || parts.is_empty() {
        parts.push(php_string(&raw[last..]));
    }
    parts.join(" . ")
}

/// Render a millisecond duration as Codeception seconds ("1500" -> "1.5")
pub fn seconds(ms: u64) -> String {
    let whole = ms / 1000;
    let frac = ms % 1000;
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{}.{:03}", whole, frac)
            .trim_end_matches('0')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_php_string_escapes() {
        assert_eq!(php_string("plain"), r#""plain""#);
        assert_eq!(php_string(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(php_string("cost $5"), r#""cost \$5""#);
        assert_eq!(php_string("a\\b"), r#""a\\b""#);
        assert_eq!(php_string("line\nbreak\t"), r#""line\nbreak\t""#);
        assert_eq!(php_string("bell\u{7}"), r#""bell\u{7}""#);
    }

    #[test]
    fn test_variable_ref_requires_whole_value() {
        assert_eq!(variable_ref("${user}"), Some("user"));
        assert_eq!(variable_ref("hi ${user}"), None);
        assert_eq!(variable_ref("user"), None);
    }

    #[test]
    fn test_interpolate() {
        let scope = VariableScope::new();
        assert_eq!(interpolate("plain", &scope), r#""plain""#);
        assert_eq!(interpolate("", &scope), r#""""#);
        assert_eq!(interpolate("${id}", &scope), r#"$this->vars["id"]"#);
        assert_eq!(
            interpolate("Hello ${name}!", &scope),
            r#""Hello " . $this->vars["name"] . "!""#
        );
        assert_eq!(
            interpolate("${a}${b}", &scope),
            r#"$this->vars["a"] . $this->vars["b"]"#
        );
    }

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(30000), "30");
        assert_eq!(seconds(1500), "1.5");
        assert_eq!(seconds(250), "0.25");
        assert_eq!(seconds(0), "0");
    }
}
