/// Errors raised while generating code for a single step.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("unsupported {kind} addressing: {target}")]
    UnsupportedAddressing { kind: &'static str, target: String },

    #[error("unsupported locator: {0}")]
    UnsupportedLocator(String),

    #[error("unsupported option selector: {0}")]
    UnsupportedSelection(String),

    #[error("`{command}` requires a {field}")]
    MissingField {
        command: String,
        field: &'static str,
    },

    #[error("invalid argument for `{command}`: {message}")]
    InvalidArgument { command: String, message: String },
}

pub type Result<T> = std::result::Result<T, EmitError>;
