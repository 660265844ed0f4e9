//! Per-step code generation.
//!
//! A [`CommandRegistry`] maps recorded step names to generators; each
//! generator turns one [`Step`](crate::parser::Step) into an [`Emission`]
//! using only the step and the [`EmitContext`] it is handed.

pub mod addressing;
pub mod commands;
pub mod context;
pub mod control_flow;
pub mod emission;
pub mod keys;
pub mod literal;
pub mod naming;
pub mod registry;
pub mod script;
pub mod variables;
pub mod window;

pub use addressing::{AddressingMode, TargetKind};
pub use context::EmitContext;
pub use emission::{Block, Emission, LeveledStatement};
pub use naming::{sanitize_class_name, sanitize_name};
pub use registry::{CommandEmitter, CommandRegistry, EmitFn, EmitFuture};
pub use variables::VariableScope;
pub use window::{emit_wait_for_window, MethodDeclaration};
