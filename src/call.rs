//! Call redirection
//!
//! Decorating a target directly would consume it. Decorating a placeholder
//! instead keeps the target available as a plain library call, while the
//! placeholder becomes the command handler:
//!
//! ```
//! use clapwrap::{redirect, CallArgs, Function, ParameterSpec, Value};
//!
//! let spec = ParameterSpec::builder().arg("x").arg("y").build().unwrap();
//! let add = Function::new("add", spec, |kwargs| {
//!     Ok(Value::Int(kwargs.get::<i64>("x")? + kwargs.get::<i64>("y")?))
//! });
//!
//! let add_command = Function::placeholder("add_command").with(redirect(&add)).unwrap();
//! let total = add_command.call(CallArgs::new().arg(1).arg(2)).unwrap();
//! assert_eq!(total, Value::Int(3));
//! ```

use crate::core::function::{CallArgs, Decorator, Function};
use crate::error::Error;

/// Turn a placeholder into a call to `target`
///
/// The result keeps the placeholder's name but has `target`'s doc,
/// parameters and options. The placeholder's body never runs.
pub fn redirect(target: &Function) -> impl Decorator {
    let target = target.clone();

    move |placeholder: Function| {
        let wrapper = target.wrap(|target, kwargs| target.call(kwargs.into()));
        Ok(wrapper.renamed(placeholder.name()))
    }
}

/// Turn a placeholder into an output handler for `target`
///
/// Calling the result calls `target`, passes its return value to the
/// placeholder as the only positional argument, and returns the value. The
/// same function can then serve as a library call and as a command that
/// presents its result.
///
/// # Errors
/// Returns [`Error::InvalidOutputHandler`] while decorating if the
/// placeholder can't be called with the result alone.
pub fn redirect_with_output_handler(target: &Function) -> impl Decorator {
    let target = target.clone();

    move |placeholder: Function| {
        if !takes_single_result(&placeholder) {
            return Err(Error::InvalidOutputHandler(placeholder.name().to_string()));
        }
        let name = placeholder.name().to_string();
        let wrapper = target.wrap(move |target, kwargs| {
            let result = target.call(kwargs.into())?;
            placeholder.call(CallArgs::new().arg(result.clone()))?;
            Ok(result)
        });
        Ok(wrapper.renamed(name))
    }
}

/// First parameter takes the result; any others need defaults
fn takes_single_result(handler: &Function) -> bool {
    let spec = handler.parameter_spec();
    match spec.args().split_first() {
        Some((_, rest)) => rest.iter().all(|arg| spec.default_for(arg).is_some()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::argspec::{get_parameter_spec, ParameterSpec};
    use crate::core::value::Value;

    fn add() -> Function {
        let spec = ParameterSpec::builder().arg("x").arg("y").build().unwrap();
        Function::new("add", spec, |kwargs| {
            Ok(Value::Int(kwargs.get::<i64>("x")? + kwargs.get::<i64>("y")?))
        })
        .doc("add documentation")
    }

    #[test]
    fn test_redirect() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let placeholder = Function::new("_add", ParameterSpec::default(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::None)
        });

        let f = placeholder.with(redirect(&add())).unwrap();

        assert_eq!(f.call(CallArgs::new().arg(1).arg(2)).unwrap(), Value::Int(3));
        assert_eq!(f.name(), "_add");
        assert_eq!(f.documentation(), Some("add documentation"));
        assert_eq!(get_parameter_spec(&f).args(), ["x", "y"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_redirect_with_output_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let spec = ParameterSpec::builder().arg("result").build().unwrap();
        let show = Function::new("show_add", spec, move |kwargs| {
            sink.lock().unwrap().push(kwargs.get::<Value>("result")?);
            Ok(Value::None)
        });

        let f = show.with(redirect_with_output_handler(&add())).unwrap();

        assert_eq!(f.call(CallArgs::new().arg(1).arg(2)).unwrap(), Value::Int(3));
        assert_eq!(f.name(), "show_add");
        assert_eq!(*seen.lock().unwrap(), vec![Value::Int(3)]);
    }

    #[test]
    fn test_output_handler_skipped_on_error() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let spec = ParameterSpec::builder().arg("result").build().unwrap();
        let show = Function::new("show", spec, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::None)
        });
        let failing = Function::new("boom", ParameterSpec::default(), |_| {
            anyhow::bail!("an error")
        });

        let f = show.with(redirect_with_output_handler(&failing)).unwrap();

        assert!(f.call(CallArgs::new()).is_err());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_output_handler_needs_result_parameter() {
        let err = Function::placeholder("_show")
            .with(redirect_with_output_handler(&add()))
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, Error::InvalidOutputHandler(name) if name == "_show"));
    }

    #[test]
    fn test_output_handler_rejects_extra_required_parameters() {
        let spec = ParameterSpec::builder().arg("result").arg("style").build().unwrap();
        let show = Function::new("show", spec, |_| Ok(Value::None));
        assert!(show.with(redirect_with_output_handler(&add())).is_err());

        let spec = ParameterSpec::builder()
            .arg("result")
            .arg_with_default("style", "plain")
            .build()
            .unwrap();
        let show = Function::new("show", spec, |_| Ok(Value::None));
        assert!(show.with(redirect_with_output_handler(&add())).is_ok());
    }
}
