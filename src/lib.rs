pub mod emitter;
pub mod error;
pub mod export;
pub mod locator;
pub mod parser;
pub mod utils;

// Re-export common items
pub use emitter::{CommandEmitter, CommandRegistry, EmitContext, Emission};
pub use error::EmitError;
pub use export::{ExportedClass, Exporter};
pub use utils::ExportConfig;
