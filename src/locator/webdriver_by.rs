use async_trait::async_trait;

use super::LocatorResolver;
use crate::emitter::literal::php_string;
use crate::error::{EmitError, Result};

/// Element locator strategies understood by the recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Select by element id
    Id(String),
    /// Select by `name` attribute
    Name(String),
    /// Select by CSS selector
    Css(String),
    /// Select by XPath
    XPath(String),
    /// Select a link by its exact text
    LinkText(String),
    /// Select a link by part of its text
    PartialLinkText(String),
}

impl Locator {
    /// Parse `strategy=value`; bare `//...` and `(...)` strings are XPath
    pub fn parse(locator: &str) -> Result<Self> {
        if locator.starts_with("//") || locator.starts_with('(') {
            return Ok(Locator::XPath(locator.to_string()));
        }

        let (strategy, value) = locator
            .split_once('=')
            .ok_or_else(|| EmitError::UnsupportedLocator(locator.to_string()))?;
        let value = value.to_string();

        match strategy {
            "id" => Ok(Locator::Id(value)),
            "name" => Ok(Locator::Name(value)),
            "css" => Ok(Locator::Css(value)),
            "xpath" => Ok(Locator::XPath(value)),
            "link" | "linkText" => Ok(Locator::LinkText(value)),
            "partialLinkText" => Ok(Locator::PartialLinkText(value)),
            _ => Err(EmitError::UnsupportedLocator(locator.to_string())),
        }
    }

    /// php-webdriver `WebDriverBy` expression
    pub fn to_php(&self) -> String {
        let (method, value) = match self {
            Locator::Id(v) => ("id", v),
            Locator::Name(v) => ("name", v),
            Locator::Css(v) => ("cssSelector", v),
            Locator::XPath(v) => ("xpath", v),
            Locator::LinkText(v) => ("linkText", v),
            Locator::PartialLinkText(v) => ("partialLinkText", v),
        };
        format!("WebDriverBy::{}({})", method, php_string(value))
    }
}

/// Default resolver producing `WebDriverBy` lookups
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDriverByLocator;

#[async_trait]
impl LocatorResolver for WebDriverByLocator {
    async fn resolve(&self, locator: &str) -> Result<String> {
        Ok(Locator::parse(locator)?.to_php())
    }
}
