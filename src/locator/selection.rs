use async_trait::async_trait;

use super::{css_string, xpath_string, SelectionResolver};
use crate::emitter::literal::php_string;
use crate::error::{EmitError, Result};

/// Ways a recorded step identifies an `<option>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSelector {
    Label(String),
    Value(String),
    Id(String),
    /// Zero-based position among the options
    Index(usize),
}

impl OptionSelector {
    /// Parse `label=`, `value=`, `id=` or `index=`; a bare string is a label
    pub fn parse(descriptor: &str) -> Result<Self> {
        let Some((kind, value)) = descriptor.split_once('=') else {
            return Ok(OptionSelector::Label(descriptor.to_string()));
        };
        match kind {
            "label" => Ok(OptionSelector::Label(value.to_string())),
            "value" => Ok(OptionSelector::Value(value.to_string())),
            "id" => Ok(OptionSelector::Id(value.to_string())),
            "index" => value
                .trim()
                .parse()
                .map(OptionSelector::Index)
                .map_err(|_| EmitError::UnsupportedSelection(descriptor.to_string())),
            _ => Err(EmitError::UnsupportedSelection(descriptor.to_string())),
        }
    }

    pub fn to_php(&self) -> String {
        match self {
            OptionSelector::Label(label) => format!(
                "WebDriverBy::xpath({})",
                php_string(&format!(".//option[. = {}]", xpath_string(label)))
            ),
            OptionSelector::Value(value) => format!(
                "WebDriverBy::cssSelector({})",
                php_string(&format!("option[value={}]", css_string(value)))
            ),
            OptionSelector::Id(id) => format!(
                "WebDriverBy::cssSelector({})",
                php_string(&format!("option[id={}]", css_string(id)))
            ),
            OptionSelector::Index(index) => format!(
                "WebDriverBy::cssSelector({})",
                php_string(&format!("option:nth-child({})", index + 1))
            ),
        }
    }
}

/// Default resolver producing `WebDriverBy` option lookups
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDriverBySelection;

#[async_trait]
impl SelectionResolver for WebDriverBySelection {
    async fn resolve(&self, option: &str) -> Result<String> {
        Ok(OptionSelector::parse(option)?.to_php())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptors() {
        assert_eq!(
            OptionSelector::parse("label=Blue").unwrap(),
            OptionSelector::Label("Blue".into())
        );
        assert_eq!(
            OptionSelector::parse("Blue").unwrap(),
            OptionSelector::Label("Blue".into())
        );
        assert_eq!(
            OptionSelector::parse("index=2").unwrap(),
            OptionSelector::Index(2)
        );
        assert!(OptionSelector::parse("index=two").is_err());
        assert!(OptionSelector::parse("text=Blue").is_err());
    }

    #[tokio::test]
    async fn test_resolve_expressions() {
        assert_eq!(
            WebDriverBySelection.resolve("label=Blue").await.unwrap(),
            r#"WebDriverBy::xpath(".//option[. = 'Blue']")"#
        );
        assert_eq!(
            WebDriverBySelection.resolve("value=b").await.unwrap(),
            r#"WebDriverBy::cssSelector("option[value='b']")"#
        );
        assert_eq!(
            WebDriverBySelection.resolve("index=0").await.unwrap(),
            r#"WebDriverBy::cssSelector("option:nth-child(1)")"#
        );
    }
}
