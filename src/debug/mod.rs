//! Debug module - post-mortem debugging for command handlers
//!
//! [`debug`] adds a `--debug`/`--no-debug` flag to a function. With the
//! flag on, an error from the function is printed, followed by a short
//! pause (long enough to hit C-c), and then handed to a [`Debugger`].
//! With the flag off, errors propagate unchanged.

pub mod debugger;

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::core::function::{Decorator, Function};
use crate::core::value::Value;
use crate::options::builder::build_boolean_flag;

pub use debugger::{default_debugger, Attach, Debugger, Disposition, Failure, Report};

/// Help text of the `--debug` flag
pub const DEBUG_HELP: &str = "drop into a debugger post-mortem on uncaught errors?";

/// Settings of the debug decorator, fixed when it is applied
#[derive(Clone)]
pub struct DebugConfig {
    /// Whether `--debug` is on when neither flag is given
    pub default: bool,
    /// Pause between printing the error and starting the debugger
    pub delay: Duration,
    /// Debugger to use; the resolved default when `None`
    pub debugger: Option<Arc<dyn Debugger>>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            default: false,
            delay: Duration::from_secs(3),
            debugger: None,
        }
    }
}

impl fmt::Debug for DebugConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugConfig")
            .field("default", &self.default)
            .field("delay", &self.delay)
            .field("debugger", &self.debugger.as_ref().map(|d| d.name().to_string()))
            .finish()
    }
}

/// Add a `--debug` flag that hands uncaught errors to a debugger
pub fn debug(
    default: bool,
    delay_secs: u64,
    debugger: Option<Arc<dyn Debugger>>,
) -> impl Decorator {
    debug_with(DebugConfig {
        default,
        delay: Duration::from_secs(delay_secs),
        debugger,
    })
}

/// [`debug`] with a prepared [`DebugConfig`]
pub fn debug_with(config: DebugConfig) -> impl Decorator {
    move |f: Function| {
        let flag = build_boolean_flag("--debug", config.default, DEBUG_HELP)?;

        let wrapper = f.wrap(move |inner, mut kwargs| {
            let enabled = kwargs
                .remove("debug")
                .and_then(|v| v.as_bool())
                .unwrap_or(config.default);

            match inner.call(kwargs.into()) {
                Err(error) if enabled => post_mortem(&config, inner.name(), error),
                result => result,
            }
        });

        flag.decorate(wrapper)
    }
}

fn post_mortem(config: &DebugConfig, function: &str, error: anyhow::Error) -> anyhow::Result<Value> {
    eprintln!("{:?}", error);
    eprintln!(
        "\nSleeping for {} seconds before debug, press C-c to exit",
        config.delay.as_secs()
    );
    thread::sleep(config.delay);

    let debugger = config.debugger.clone().unwrap_or_else(default_debugger);
    info!(function, debugger = debugger.name(), "starting post-mortem");

    let failure = Failure {
        function,
        error: &error,
        pid: std::process::id(),
    };
    match debugger.post_mortem(&failure) {
        Ok(Disposition::Suppress) => Ok(Value::None),
        Ok(Disposition::Propagate) => Err(error),
        Err(e) => {
            warn!(debugger = debugger.name(), error = %e, "post-mortem failed");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::argspec::{get_parameter_spec, ParameterSpec};
    use crate::core::function::CallArgs;

    struct MockDebugger {
        calls: AtomicUsize,
        disposition: Disposition,
    }

    impl MockDebugger {
        fn new(disposition: Disposition) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                disposition,
            })
        }

        fn called(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Debugger for MockDebugger {
        fn name(&self) -> &str {
            "mock"
        }

        fn post_mortem(&self, _failure: &Failure<'_>) -> anyhow::Result<Disposition> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.disposition)
        }
    }

    fn spec() -> ParameterSpec {
        ParameterSpec::builder().arg_with_default("x", 3).build().unwrap()
    }

    fn failing(default: bool, mock: &Arc<MockDebugger>) -> Function {
        let debugger: Arc<dyn Debugger> = mock.clone();
        Function::new("f", spec(), |_| anyhow::bail!("an error"))
            .with(debug(default, 0, Some(debugger)))
            .unwrap()
    }

    #[test]
    fn test_debug_preserves_metadata() {
        let f = Function::new("f", spec(), |_| Ok(Value::None))
            .doc("f documentation")
            .with(debug(false, 0, None))
            .unwrap();

        assert_eq!(f.name(), "f");
        assert_eq!(f.documentation(), Some("f documentation"));
        assert!(get_parameter_spec(&f).contains("x"));
        assert_eq!(f.options()[0].name, "debug");
    }

    #[test]
    fn test_debug_not_called_if_no_error() {
        for default in [true, false] {
            let mock = MockDebugger::new(Disposition::Propagate);
            let debugger: Arc<dyn Debugger> = mock.clone();
            let f = Function::new("f", spec(), |kwargs| Ok(Value::Int(kwargs.get::<i64>("x")?)))
                .with(debug(default, 0, Some(debugger)))
                .unwrap();

            assert_eq!(f.call(CallArgs::new()).unwrap(), Value::Int(3));
            assert_eq!(f.call(CallArgs::new().named("debug", !default)).unwrap(), Value::Int(3));
            assert_eq!(mock.called(), 0);
        }
    }

    #[test]
    fn test_debug_not_called_by_default() {
        let mock = MockDebugger::new(Disposition::Propagate);
        let f = failing(false, &mock);

        let err = f.call(CallArgs::new()).unwrap_err();
        assert_eq!(err.to_string(), "an error");
        assert_eq!(mock.called(), 0);
    }

    #[test]
    fn test_debug_called_if_debug() {
        let mock = MockDebugger::new(Disposition::Propagate);
        let f = failing(false, &mock);

        assert!(f.call(CallArgs::new().named("debug", true)).is_err());
        assert_eq!(mock.called(), 1);
    }

    #[test]
    fn test_debug_called_by_default() {
        let mock = MockDebugger::new(Disposition::Propagate);
        let f = failing(true, &mock);

        assert!(f.call(CallArgs::new()).is_err());
        assert_eq!(mock.called(), 1);
    }

    #[test]
    fn test_debug_not_called_if_no_debug() {
        let mock = MockDebugger::new(Disposition::Propagate);
        let f = failing(true, &mock);

        assert!(f.call(CallArgs::new().named("debug", false)).is_err());
        assert_eq!(mock.called(), 0);
    }

    #[test]
    fn test_suppressed_error_returns_none() {
        let mock = MockDebugger::new(Disposition::Suppress);
        let f = failing(true, &mock);

        assert_eq!(f.call(CallArgs::new()).unwrap(), Value::None);
        assert_eq!(mock.called(), 1);
    }

    #[test]
    fn test_debug_twice_rejected() {
        let err = Function::new("f", spec(), |_| Ok(Value::None))
            .with(debug(false, 0, None))
            .unwrap()
            .with(debug(false, 0, None))
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
