pub mod config;

pub use config::ExportConfig;
