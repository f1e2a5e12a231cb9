//! Argspec - declared parameter metadata
//!
//! A [`ParameterSpec`] lists a function's named parameters in declaration
//! order, the defaults of its trailing parameters, and whether it accepts
//! arbitrary extra named arguments.
//!
//! # Key Points
//! - Defaults align to the rightmost parameters: in `(x, y=3)` only `y`
//!   has a default
//! - Specs are declared once, when a [`Function`] is created, and carried
//!   unchanged through every wrapping layer
//! - [`has_default`] is how option decorators find a parameter's default

use crate::core::function::Function;
use crate::core::value::Value;
use crate::error::{Error, Result};

/// Declared parameters of a function
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterSpec {
    /// Positional-or-keyword parameter names, in declaration order
    args: Vec<String>,

    /// Defaults for the trailing parameters, in declaration order
    defaults: Vec<Value>,

    /// Whether arbitrary extra named arguments are accepted
    keywords: bool,
}

impl ParameterSpec {
    /// Create a spec from parameter names and right-aligned defaults
    ///
    /// # Errors
    /// Returns an error if a name repeats or there are more defaults than
    /// parameters.
    pub fn new<I, S>(args: I, defaults: Vec<Value>, keywords: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        if defaults.len() > args.len() {
            return Err(Error::TooManyDefaults {
                defaults: defaults.len(),
                params: args.len(),
            });
        }

        for (i, name) in args.iter().enumerate() {
            if args[..i].contains(name) {
                return Err(Error::DuplicateParameter(name.clone()));
            }
        }

        Ok(Self {
            args,
            defaults,
            keywords,
        })
    }

    /// Start declaring a spec parameter by parameter
    ///
    /// # Examples
    /// ```
    /// use clapwrap::ParameterSpec;
    ///
    /// let spec = ParameterSpec::builder()
    ///     .arg("x")
    ///     .arg_with_default("y", 3)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(spec.args(), ["x", "y"]);
    /// ```
    pub fn builder() -> ParameterSpecBuilder {
        ParameterSpecBuilder::default()
    }

    /// Spec of a generic forwarding wrapper: no named parameters, any
    /// named argument accepted
    pub fn variadic() -> Self {
        Self {
            args: Vec::new(),
            defaults: Vec::new(),
            keywords: true,
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Defaults of the trailing parameters, or `None` if there are none
    pub fn defaults(&self) -> Option<&[Value]> {
        if self.defaults.is_empty() {
            None
        } else {
            Some(&self.defaults)
        }
    }

    pub fn accepts_keywords(&self) -> bool {
        self.keywords
    }

    pub fn contains(&self, name: &str) -> bool {
        self.args.iter().any(|a| a == name)
    }

    /// Default of a declared parameter
    ///
    /// Returns `None` if `name` isn't declared or has no default.
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        // Both lists are in declaration order; reversing lines them up
        // from the right
        let index = self.args.iter().rev().position(|a| a == name)?;
        self.defaults.iter().rev().nth(index)
    }

    /// Parameter name to default, for the parameters that have one
    pub fn default_map(&self) -> Vec<(&str, &Value)> {
        let offset = self.args.len() - self.defaults.len();
        self.args[offset..]
            .iter()
            .map(String::as_str)
            .zip(self.defaults.iter())
            .collect()
    }
}

/// Incremental [`ParameterSpec`] declaration
///
/// Errors are held until [`build`](Self::build) so declarations can chain.
#[derive(Debug, Default)]
pub struct ParameterSpecBuilder {
    args: Vec<String>,
    defaults: Vec<Value>,
    keywords: bool,
    error: Option<Error>,
}

impl ParameterSpecBuilder {
    /// Declare a parameter without a default
    pub fn arg(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.error.is_none() && !self.defaults.is_empty() {
            self.error = Some(Error::NonDefaultAfterDefault(name.clone()));
        }
        self.args.push(name);
        self
    }

    /// Declare a parameter with a default
    pub fn arg_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.args.push(name.into());
        self.defaults.push(default.into());
        self
    }

    /// Accept arbitrary extra named arguments
    pub fn keywords(mut self) -> Self {
        self.keywords = true;
        self
    }

    pub fn build(self) -> Result<ParameterSpec> {
        if let Some(err) = self.error {
            return Err(err);
        }
        ParameterSpec::new(self.args, self.defaults, self.keywords)
    }
}

/// Get the parameter metadata of `f`
///
/// Wrappers built with [`attach`](crate::core::wrap::attach) or
/// [`Function::wrap`] carry the spec of the function they wrap, so this
/// returns the innermost declaration however many layers sit on top.
pub fn get_parameter_spec(f: &Function) -> &ParameterSpec {
    f.parameter_spec()
}

/// Look up the default of parameter `name` in calls to `f`
///
/// Returns `Ok(Some(default))` if `name` has a default, `Ok(None)` if it
/// doesn't. A name outside the declared parameters has no default when `f`
/// accepts extra named arguments.
///
/// # Errors
/// Returns [`Error::UnknownParameter`] if `name` isn't declared and `f`
/// doesn't accept extra named arguments.
pub fn has_default(f: &Function, name: &str) -> Result<Option<Value>> {
    let spec = get_parameter_spec(f);

    if !spec.contains(name) {
        if !spec.accepts_keywords() {
            return Err(Error::UnknownParameter {
                name: name.to_string(),
                function: f.name().to_string(),
            });
        }
        return Ok(None);
    }

    if spec.defaults().is_none() {
        return Ok(None);
    }

    Ok(spec.default_for(name).cloned())
}

/// Parameter name for a flag: `--my-option` becomes `my_option`
pub fn param_name(flag: &str) -> String {
    flag.trim_matches('-').replace('-', "_")
}
