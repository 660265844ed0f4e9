//! Project export: runs every step of every test through the registry and
//! lays the results out as one Codeception Cest class.

pub mod render;

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::emitter::{
    emit_wait_for_window, sanitize_class_name, sanitize_name, Block, CommandRegistry,
    EmitContext, Emission, LeveledStatement,
};
use crate::locator::{LocatorResolver, SelectionResolver, WebDriverByLocator, WebDriverBySelection};
use crate::parser::{parse_project_file, Project, RecordedTest, Step};
use crate::utils::ExportConfig;

pub use render::{render_class, Flattener, TestMethod};

/// Generated source for one project
#[derive(Debug, Clone)]
pub struct ExportedClass {
    pub class_name: String,
    pub source: String,
}

impl ExportedClass {
    pub fn file_name(&self) -> String {
        format!("{}.php", self.class_name)
    }
}

pub struct Exporter {
    registry: CommandRegistry,
    config: ExportConfig,
    locator: Arc<dyn LocatorResolver>,
    selection: Arc<dyn SelectionResolver>,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            registry: CommandRegistry::new(),
            config,
            locator: Arc::new(WebDriverByLocator),
            selection: Arc::new(WebDriverBySelection),
        }
    }

    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_resolvers(
        mut self,
        locator: Arc<dyn LocatorResolver>,
        selection: Arc<dyn SelectionResolver>,
    ) -> Self {
        self.locator = locator;
        self.selection = selection;
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Config for one project; the project URL fills an empty base URL
    fn project_config(&self, project: &Project) -> Arc<ExportConfig> {
        let mut config = self.config.clone();
        if config.base_url.is_empty() {
            if let Some(url) = project.url.as_deref() {
                config.base_url = url.to_string();
            }
        }
        Arc::new(config)
    }

    fn context(&self, config: Arc<ExportConfig>) -> EmitContext {
        EmitContext::new(config, self.locator.clone(), self.selection.clone())
    }

    /// Export a project file from disk
    pub async fn export_file(&self, path: &Path) -> Result<ExportedClass> {
        let project = parse_project_file(path)?;
        self.export_project(&project)
            .await
            .with_context(|| format!("Failed to export {}", path.display()))
    }

    pub async fn export_project(&self, project: &Project) -> Result<ExportedClass> {
        let config = self.project_config(project);
        let class_name = format!("{}{}", sanitize_class_name(&project.name), config.class_suffix);
        log::info!(
            "Exporting project '{}' as {} ({} tests)",
            project.name,
            class_name,
            project.tests.len()
        );

        // Names are fixed before any body is emitted so `run` steps can
        // refer to tests that come later
        let names = method_names(&project.tests);
        let mut lookup = HashMap::new();
        for (test, name) in project.tests.iter().zip(&names) {
            lookup.entry(test.name.clone()).or_insert_with(|| name.clone());
        }
        let lookup = Arc::new(lookup);

        let mut methods = Vec::with_capacity(project.tests.len());
        for (test, name) in project.tests.iter().zip(names) {
            let ctx = self.context(config.clone()).with_methods(lookup.clone());
            let body = self.export_test(test, &ctx).await?;
            methods.push(TestMethod { name, body });
        }

        let opens_window = project
            .tests
            .iter()
            .flat_map(|test| &test.commands)
            .any(|step| step.opens_window && !step.is_disabled());
        let mut helpers = Vec::new();
        if opens_window {
            helpers.push(emit_wait_for_window(
                config.window_timeout_secs,
                &self.context(config.clone()).vars,
            ));
        }

        Ok(ExportedClass {
            source: render_class(&class_name, &config.indent, &methods, &helpers),
            class_name,
        })
    }

    /// Emit one test's steps, in order, into method body lines.
    ///
    /// Callers hand each test a fresh context, so variable bindings never
    /// leak between tests.
    pub async fn export_test(
        &self,
        test: &RecordedTest,
        ctx: &EmitContext,
    ) -> Result<Vec<LeveledStatement>> {
        let mut flattener = Flattener::new();

        for (index, step) in test.commands.iter().enumerate() {
            if step.is_disabled() {
                log::debug!("Skipping disabled step {} '{}'", index, step.name);
                continue;
            }
            if !self.registry.can_emit(&step.name) {
                log::warn!(
                    "Test '{}' step {}: '{}' is not supported, skipping",
                    test.name,
                    index,
                    step.name
                );
                continue;
            }

            log::debug!("Emitting step {} '{}'", index, step.name);
            let mut emitted = self
                .registry
                .emit(step, ctx)
                .await
                .with_context(|| format!("Test '{}' step {} ({})", test.name, index, step.name))?;

            if let Some(comment) = step_comment(step) {
                emitted = attach_comment(comment, emitted);
            }
            flattener
                .push(&emitted)
                .with_context(|| format!("Test '{}' step {} ({})", test.name, index, step.name))?;
        }

        flattener
            .finish()
            .with_context(|| format!("Test '{}'", test.name))
    }
}

/// Method name for every test, in project order; clashes get a numeric suffix
pub fn method_names(tests: &[RecordedTest]) -> Vec<String> {
    let mut used = HashSet::new();
    let mut names = Vec::with_capacity(tests.len());
    for test in tests {
        let base = sanitize_name(&test.name);
        let mut name = base.clone();
        let mut n = 2;
        while !used.insert(name.clone()) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        if name != base {
            log::warn!(
                "Test '{}' renamed to {} to avoid a duplicate method name",
                test.name,
                name
            );
        }
        names.push(name);
    }
    names
}

/// Put the comment line first, after any closing adjustment of the step, so
/// it sits at the same level as the code it annotates
fn attach_comment(comment: String, emitted: Emission) -> Emission {
    match emitted {
        Emission::Empty => Emission::Statement(comment),
        Emission::Statement(text) => Block::new(vec![
            LeveledStatement::new(0, comment),
            LeveledStatement::new(0, text),
        ])
        .into(),
        Emission::Block(mut block) => {
            block.commands.insert(0, LeveledStatement::new(0, comment));
            block.into()
        }
    }
}

/// `// comment` line for a step's recorded comment
fn step_comment(step: &Step) -> Option<String> {
    let comment = step.comment.as_deref()?.trim();
    if comment.is_empty() {
        return None;
    }
    let single_line = comment.lines().collect::<Vec<_>>().join(" ");
    Some(format!("// {}", single_line.replace("?>", "? >")))
}
