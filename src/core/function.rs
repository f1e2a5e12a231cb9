//! Function - a callable paired with its declared metadata
//!
//! Every decorator in this crate takes a [`Function`] and returns a new
//! one. The body, name, doc, [`ParameterSpec`] and registered options all
//! travel together, so there is no wrapping step that could drop them.
//!
//! # Usage
//! ```
//! use clapwrap::{CallArgs, Function, ParameterSpec};
//!
//! let spec = ParameterSpec::builder().arg("x").arg_with_default("y", 2).build().unwrap();
//! let add = Function::new("add", spec, |kwargs| {
//!     Ok((kwargs.get::<i64>("x")? + kwargs.get::<i64>("y")?).into())
//! });
//!
//! let total = add.call(CallArgs::new().arg(1)).unwrap();
//! assert_eq!(total.as_int(), Some(3));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::core::argspec::ParameterSpec;
use crate::core::value::{FromValue, Value};
use crate::error::{Error, Result};
use crate::options::{OptionDescriptor, Requirement};

/// Shared function body
pub type Body = Arc<dyn Fn(Kwargs) -> anyhow::Result<Value> + Send + Sync>;

/// A decorator: anything that turns one [`Function`] into another
///
/// Configuration errors are returned while decorating, never deferred to
/// the first call.
pub trait Decorator {
    fn decorate(self, f: Function) -> Result<Function>;
}

impl<F> Decorator for F
where
    F: FnOnce(Function) -> Result<Function>,
{
    fn decorate(self, f: Function) -> Result<Function> {
        self(f)
    }
}

/// A callable with its declared name, doc, parameters and options
#[derive(Clone)]
pub struct Function {
    name: String,
    doc: Option<String>,
    spec: ParameterSpec,
    options: Vec<OptionDescriptor>,
    body: Body,
}

impl Function {
    /// Declare a function
    pub fn new<F>(name: impl Into<String>, spec: ParameterSpec, body: F) -> Self
    where
        F: Fn(Kwargs) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            doc: None,
            spec,
            options: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// A placeholder with no parameters whose body does nothing
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, ParameterSpec::default(), |_| Ok(Value::None))
    }

    /// Set the documentation (shown as the command's about text)
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Apply a decorator
    pub fn with(self, decorator: impl Decorator) -> Result<Self> {
        decorator.decorate(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn documentation(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn parameter_spec(&self) -> &ParameterSpec {
        &self.spec
    }

    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    pub(crate) fn set_metadata(
        &mut self,
        name: String,
        doc: Option<String>,
        spec: ParameterSpec,
    ) {
        self.name = name;
        self.doc = doc;
        self.spec = spec;
    }

    pub(crate) fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub(crate) fn options_mut(&mut self) -> &mut Vec<OptionDescriptor> {
        &mut self.options
    }

    /// Register an option, rejecting clashes with ones already registered
    pub(crate) fn register_option(mut self, descriptor: OptionDescriptor) -> Result<Self> {
        if let Some(existing) = self.options.iter().find(|o| o.conflicts_with(&descriptor)) {
            return Err(Error::DuplicateOption {
                option: existing.flag(),
                function: self.name.clone(),
            });
        }
        self.options.push(descriptor);
        Ok(self)
    }

    /// Call the function
    ///
    /// Arguments are bound to the declared parameters first: positional
    /// ones in order, then named ones, then declared defaults for anything
    /// left over.
    pub fn call(&self, args: CallArgs) -> anyhow::Result<Value> {
        let kwargs = self.bind(args)?;
        (self.body)(kwargs)
    }

    fn bind(&self, args: CallArgs) -> Result<Kwargs> {
        let CallArgs { positional, named } = args;
        let params = self.spec.args();

        if positional.len() > params.len() {
            return Err(Error::TooManyPositional {
                function: self.name.clone(),
                max: params.len(),
                given: positional.len(),
            });
        }

        let mut bound: BTreeMap<String, Value> = params
            .iter()
            .cloned()
            .zip(positional)
            .collect();

        for (name, value) in named {
            if bound.contains_key(&name) {
                return Err(Error::MultipleValues {
                    name,
                    function: self.name.clone(),
                });
            }
            let known = self.spec.contains(&name)
                || self.spec.accepts_keywords()
                || self.options.iter().any(|o| o.name == name);
            if !known {
                return Err(Error::UnexpectedArgument {
                    name,
                    function: self.name.clone(),
                });
            }
            bound.insert(name, value);
        }

        for param in params {
            if bound.contains_key(param) {
                continue;
            }
            match self.spec.default_for(param) {
                Some(default) => {
                    bound.insert(param.clone(), default.clone());
                }
                None => {
                    return Err(Error::MissingArgument {
                        name: param.clone(),
                        function: self.name.clone(),
                    })
                }
            }
        }

        // Options outside the declared parameters (e.g. `debug`) fall back
        // to their registered default on direct calls
        for option in &self.options {
            if bound.contains_key(&option.name) {
                continue;
            }
            match &option.requirement {
                Requirement::Default(default) => {
                    bound.insert(option.name.clone(), default.clone());
                }
                Requirement::Required => {
                    return Err(Error::MissingArgument {
                        name: option.name.clone(),
                        function: self.name.clone(),
                    })
                }
            }
        }

        Ok(Kwargs(bound))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("spec", &self.spec)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Arguments for a call, before binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub named: BTreeMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }
}

impl From<Kwargs> for CallArgs {
    fn from(kwargs: Kwargs) -> Self {
        Self {
            positional: Vec::new(),
            named: kwargs.0,
        }
    }
}

/// Bound arguments, by parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs(BTreeMap<String, Value>);

impl Kwargs {
    /// Typed access to an argument
    ///
    /// # Errors
    /// Returns an error if the argument is absent or has another type.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self.0.get(name).unwrap_or(&Value::None);
        T::from_value(value).ok_or_else(|| Error::TypeMismatch {
            name: name.to_string(),
            expected: T::EXPECTED,
            actual: value.type_name().to_string(),
        })
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
