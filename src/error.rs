//! Error types
//!
//! Configuration errors are raised while a function is being decorated.
//! Binding errors are raised when a function is called with arguments that
//! don't fit its declared parameters. Parse errors come straight from clap.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("flag {0} does not start with \"--\"")]
    MalformedFlag(String),

    #[error("Attempting to declare boolean with auto-default, but variable {0:?} is not a kwarg")]
    MissingDefault(String),

    #[error("Default value {value} for variable {name:?} is not boolean")]
    NonBooleanDefault { name: String, value: String },

    #[error("Variable {name:?} not found in spec of func {function}")]
    UnknownParameter { name: String, function: String },

    #[error("{defaults} defaults declared for only {params} parameters")]
    TooManyDefaults { defaults: usize, params: usize },

    #[error("parameter {0:?} without a default follows a parameter with one")]
    NonDefaultAfterDefault(String),

    #[error("parameter {0:?} declared twice")]
    DuplicateParameter(String),

    #[error("option {option} is already registered on {function}")]
    DuplicateOption { option: String, function: String },

    #[error("command {0:?} is already registered")]
    DuplicateCommand(String),

    #[error("output handler {0} must take the result as its only required positional argument")]
    InvalidOutputHandler(String),

    #[error("{function}() missing required argument {name:?}")]
    MissingArgument { name: String, function: String },

    #[error("{function}() got an unexpected argument {name:?}")]
    UnexpectedArgument { name: String, function: String },

    #[error("{function}() takes {max} positional arguments but {given} were given")]
    TooManyPositional {
        function: String,
        max: usize,
        given: usize,
    },

    #[error("{function}() got multiple values for argument {name:?}")]
    MultipleValues { name: String, function: String },

    #[error("argument {name:?} is {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: String,
    },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error was raised while decorating, rather than calling
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MalformedFlag(_)
                | Error::MissingDefault(_)
                | Error::NonBooleanDefault { .. }
                | Error::UnknownParameter { .. }
                | Error::TooManyDefaults { .. }
                | Error::NonDefaultAfterDefault(_)
                | Error::DuplicateParameter(_)
                | Error::DuplicateOption { .. }
                | Error::DuplicateCommand(_)
                | Error::InvalidOutputHandler(_)
        )
    }
}
