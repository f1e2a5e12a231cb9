//! Options that take their default from the function itself
//!
//! The default declared in a function's [`ParameterSpec`] decides how the
//! option is registered, so the default lives in exactly one place:
//!
//! ```
//! use clapwrap::{option, Function, ParameterSpec, Scalar};
//!
//! let spec = ParameterSpec::builder().arg_with_default("count", 42).build().unwrap();
//! let f = Function::new("f", spec, |kwargs| Ok(kwargs.get::<i64>("count")?.into()))
//!     .with(option("--count", Some('c'), Scalar::Int, "how many"))
//!     .unwrap();
//!
//! assert_eq!(f.run_from(["f"]).unwrap().as_int(), Some(42));
//! ```
//!
//! [`ParameterSpec`]: crate::core::argspec::ParameterSpec

use tracing::debug;

use crate::core::argspec::{has_default, param_name};
use crate::core::function::{Decorator, Function};
use crate::core::value::Value;
use crate::error::Error;
use crate::options::builder::{build_boolean_flag, build_defaulted, build_required};
use crate::options::types::OptionType;

/// Register an option, defaulted if the function declares a default for
/// the matching parameter and required otherwise
///
/// The default's type isn't checked against `ty`.
pub fn option(
    flag: &str,
    short_flag: Option<char>,
    ty: impl Into<OptionType>,
    help: &str,
) -> impl Decorator {
    let flag = flag.to_string();
    let help = help.to_string();
    let ty = ty.into();

    move |f: Function| {
        let name = param_name(&flag);
        match has_default(&f, &name)? {
            Some(default) => {
                debug!(function = f.name(), param = %name, %default, "option defaults from signature");
                build_defaulted(&flag, short_flag, ty, default, &help).decorate(f)
            }
            None => build_required(&flag, short_flag, ty, &help).decorate(f),
        }
    }
}

/// Register a `--flag`/`--no-flag` pair whose default is the function's
/// own boolean default for the matching parameter
///
/// # Errors
/// Fails while decorating if the parameter has no default or the default
/// isn't a bool.
pub fn boolean(flag: &str, help: &str) -> impl Decorator {
    let flag = flag.to_string();
    let help = help.to_string();

    move |f: Function| {
        let name = param_name(&flag);
        let default = has_default(&f, &name)?.ok_or_else(|| Error::MissingDefault(name.clone()))?;
        let Value::Bool(default) = default else {
            return Err(Error::NonBooleanDefault {
                name,
                value: default.repr(),
            });
        };
        build_boolean_flag(&flag, default, &help)?.decorate(f)
    }
}
