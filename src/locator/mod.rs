//! Element and option addressing collaborators.
//!
//! Generators never build lookup expressions themselves; they hand the
//! recorded locator string to a [`LocatorResolver`] (or an option descriptor
//! to a [`SelectionResolver`]) and embed whatever expression comes back.

pub mod selection;
pub mod webdriver_by;

use async_trait::async_trait;

use crate::error::Result;

pub use selection::{OptionSelector, WebDriverBySelection};
pub use webdriver_by::{Locator, WebDriverByLocator};

/// Turns a recorded element locator into a lookup expression
#[async_trait]
pub trait LocatorResolver: Send + Sync {
    /// Fails when the locator syntax is not recognized
    async fn resolve(&self, locator: &str) -> Result<String>;
}

/// Turns a recorded "select option" descriptor into a lookup expression
#[async_trait]
pub trait SelectionResolver: Send + Sync {
    async fn resolve(&self, option: &str) -> Result<String>;
}

/// Quote `value` for use inside a single-quoted CSS attribute selector
pub(crate) fn css_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Quote `value` as an XPath string literal
pub(crate) fn xpath_string(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
