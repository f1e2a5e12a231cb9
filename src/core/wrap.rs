//! Wrap - carry metadata from a wrapped function onto its wrapper
//!
//! [`attach`] copies the name, doc and [`ParameterSpec`] of the wrapped
//! function onto the wrapper, along with its registered options. Because
//! [`Function::wrap`] goes through it, a wrapper built in this crate always
//! reports the innermost function's parameters, at any stacking depth.

use crate::core::argspec::{get_parameter_spec, ParameterSpec};
use crate::core::function::{Function, Kwargs};
use crate::core::value::Value;

/// Copy the metadata of `wrapped` onto `wrapper` and return it
///
/// Options registered on `wrapped` come first, followed by any of the
/// wrapper's own that don't clash with them (same parameter name, long
/// flag or short flag).
pub fn attach(mut wrapper: Function, wrapped: &Function) -> Function {
    wrapper.set_metadata(
        wrapped.name().to_string(),
        wrapped.documentation().map(str::to_string),
        get_parameter_spec(wrapped).clone(),
    );

    let own = std::mem::take(wrapper.options_mut());
    let options = wrapper.options_mut();
    options.extend(wrapped.options().iter().cloned());
    for option in own {
        if !options.iter().any(|o| o.conflicts_with(&option)) {
            options.push(option);
        }
    }

    wrapper
}

/// Curried [`attach`]: a function that attaches `wrapped`'s metadata to
/// whatever wrapper it is given
pub fn wraps(wrapped: &Function) -> impl FnOnce(Function) -> Function {
    let wrapped = wrapped.clone();
    move |wrapper| attach(wrapper, &wrapped)
}

impl Function {
    /// Build a wrapper around this function
    ///
    /// `wrapper` receives the wrapped function and the bound arguments. The
    /// result reports this function's name, doc, parameters and options.
    pub fn wrap<F>(&self, wrapper: F) -> Function
    where
        F: Fn(&Function, Kwargs) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let inner = self.clone();
        let generic = Function::new(
            format!("{}_wrapper", self.name()),
            ParameterSpec::variadic(),
            move |kwargs| wrapper(&inner, kwargs),
        );
        attach(generic, self)
    }
}

/// A pass-through wrapper that carries `f`'s metadata
pub fn with_parameter_spec(f: &Function) -> Function {
    f.wrap(|inner, kwargs| inner.call(kwargs.into()))
}
