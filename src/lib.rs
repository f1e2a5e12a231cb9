//! clapwrap - decorators that turn plain functions into clap commands
//!
//! Functions are declared with their parameters and defaults, then
//! decorated with options. The declared defaults become option defaults, so
//! one function is usable both as a library call and as a command.
//!
//! # Architecture
//!
//! - [`core`]: [`Function`], parameter specs and metadata-preserving wrapping
//! - [`options`]: option builders, including the automatic and boolean ones
//! - [`call`]: redirecting a placeholder to a target function
//! - [`debug`]: the `--debug` post-mortem flag
//! - [`command`]: running functions and groups as clap commands
//!
//! ## Key Concepts
//!
//! - **Decorators** take a [`Function`] and return a new one; stack them
//!   with [`Function::with`].
//! - **Metadata travels with the value**: name, doc, [`ParameterSpec`] and
//!   registered options survive every layer of wrapping.
//! - **Configuration errors are immediate**: a bad flag or a missing
//!   default fails while decorating, not on the first call.

pub mod call;
pub mod cli;
pub mod command;
pub mod config;
pub mod core;
pub mod debug;
pub mod error;
pub mod options;

pub use call::{redirect, redirect_with_output_handler};
pub use command::{command_name, Group};
pub use config::Config;
pub use self::core::argspec::{get_parameter_spec, has_default, ParameterSpec};
pub use self::core::function::{CallArgs, Decorator, Function, Kwargs};
pub use self::core::value::{FromValue, Value};
pub use self::core::wrap::{attach, with_parameter_spec, wraps};
pub use debug::{debug, debug_with, DebugConfig, Debugger, Disposition};
pub use error::{Error, Result};
pub use options::{
    boolean, build_boolean_flag, build_defaulted, build_required, option, OptionType, Scalar,
    EXISTING_DIR, EXISTING_FILE, NEW_FILE_OR_DIR,
};
