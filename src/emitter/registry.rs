use async_trait::async_trait;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;

use super::commands;
use super::context::EmitContext;
use super::emission::Emission;
use crate::error::Result;
use crate::parser::Step;

pub type EmitFuture<'a> = BoxFuture<'a, Result<Emission>>;

/// Signature of the built-in generators
pub type EmitFn = for<'a> fn(&'a Step, &'a EmitContext) -> EmitFuture<'a>;

/// Generates code for one step kind.
///
/// Implementations read only the step and the context; they never touch
/// anything else, so emitting the same step twice gives the same text.
#[async_trait]
pub trait CommandEmitter: Send + Sync {
    async fn emit(&self, step: &Step, ctx: &EmitContext) -> Result<Emission>;
}

struct FnEmitter(EmitFn);

#[async_trait]
impl CommandEmitter for FnEmitter {
    async fn emit(&self, step: &Step, ctx: &EmitContext) -> Result<Emission> {
        (self.0)(step, ctx).await
    }
}

/// Dispatch table from step name to generator
pub struct CommandRegistry {
    emitters: HashMap<String, Arc<dyn CommandEmitter>>,
}

impl CommandRegistry {
    /// Registry holding every built-in generator
    pub fn new() -> Self {
        let mut registry = Self::empty();
        commands::register_builtins(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            emitters: HashMap::new(),
        }
    }

    /// Add or replace the generator for `name`; the latest registration wins
    pub fn register(&mut self, name: &str, emitter: Arc<dyn CommandEmitter>) {
        if self.emitters.insert(name.to_string(), emitter).is_some() {
            log::debug!("Replaced emitter for '{}'", name);
        }
    }

    pub fn register_fn(&mut self, name: &str, emitter: EmitFn) {
        self.register(name, Arc::new(FnEmitter(emitter)));
    }

    pub fn can_emit(&self, name: &str) -> bool {
        self.emitters.contains_key(name)
    }

    /// Registered step names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.emitters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Generate code for `step`.
    ///
    /// Unknown step names produce [`Emission::Empty`]; callers decide whether
    /// to report them. Steps recorded with `opensWindow` get new-window
    /// handling around whatever their generator produced.
    pub async fn emit(&self, step: &Step, ctx: &EmitContext) -> Result<Emission> {
        let Some(emitter) = self.emitters.get(&step.name) else {
            log::debug!("No emitter registered for '{}'", step.name);
            return Ok(Emission::Empty);
        };

        let emitted = emitter.emit(step, ctx).await?;
        if step.opens_window {
            ctx.capture_new_window(step, emitted)
        } else {
            Ok(emitted)
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
