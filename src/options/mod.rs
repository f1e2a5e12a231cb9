//! Options module - clap option registration
//!
//! - [`builder`]: explicit required, defaulted and boolean options
//! - [`auto`]: options whose default comes from the function's own spec
//! - [`types`]: value types, including path checks

pub mod auto;
pub mod builder;
pub mod types;

pub use auto::{boolean, option};
pub use builder::{
    build_boolean_flag, build_defaulted, build_required, OptionDescriptor, OptionKind, Requirement,
};
pub use types::{OptionType, PathKind, Scalar, EXISTING_DIR, EXISTING_FILE, NEW_FILE_OR_DIR};
