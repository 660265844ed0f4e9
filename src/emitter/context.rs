use std::collections::HashMap;
use std::sync::Arc;

use super::emission::Emission;
use super::literal::interpolate;
use super::naming::sanitize_name;
use super::variables::VariableScope;
use super::window::WindowCapture;
use crate::error::Result;
use crate::locator::{LocatorResolver, SelectionResolver, WebDriverByLocator, WebDriverBySelection};
use crate::parser::Step;
use crate::utils::ExportConfig;

/// Capabilities handed to every generator.
///
/// One context is created per exported project; its variable scope is
/// never shared between exports.
pub struct EmitContext {
    pub config: Arc<ExportConfig>,
    pub vars: VariableScope,
    locator: Arc<dyn LocatorResolver>,
    selection: Arc<dyn SelectionResolver>,
    window: WindowCapture,
    /// Recorded test name -> generated method name
    methods: Arc<HashMap<String, String>>,
}

impl EmitContext {
    pub fn new(
        config: Arc<ExportConfig>,
        locator: Arc<dyn LocatorResolver>,
        selection: Arc<dyn SelectionResolver>,
    ) -> Self {
        let window = WindowCapture::new(config.window_timeout_secs);
        Self {
            config,
            vars: VariableScope::new(),
            locator,
            selection,
            window,
            methods: Arc::default(),
        }
    }

    /// Method names chosen for the tests of the project being exported
    pub fn with_methods(mut self, methods: Arc<HashMap<String, String>>) -> Self {
        self.methods = methods;
        self
    }

    /// Generated method for a recorded test name
    pub fn method_name(&self, test_name: &str) -> String {
        self.methods
            .get(test_name)
            .cloned()
            .unwrap_or_else(|| sanitize_name(test_name))
    }

    /// Context using the default `WebDriverBy` resolvers
    pub fn with_config(config: ExportConfig) -> Self {
        Self::new(
            Arc::new(config),
            Arc::new(WebDriverByLocator),
            Arc::new(WebDriverBySelection),
        )
    }

    /// Read expression for a recorded variable
    pub fn variable_lookup(&self, name: &str) -> String {
        self.vars.read(name)
    }

    /// PHP expression for a recorded literal, interpolating `${name}` references
    pub fn text(&self, raw: &str) -> String {
        interpolate(raw, &self.vars)
    }

    /// Lookup expression for an element locator
    pub async fn locate(&self, locator: &str) -> Result<String> {
        self.locator.resolve(locator).await
    }

    /// Lookup expression for an option descriptor
    pub async fn select_option(&self, option: &str) -> Result<String> {
        self.selection.resolve(option).await
    }

    /// Wrap a window-opening step's output with handle capture
    pub fn capture_new_window(&self, step: &Step, emitted: Emission) -> Result<Emission> {
        self.window.wrap(step, emitted, &self.vars)
    }
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::with_config(ExportConfig::default())
    }
}
