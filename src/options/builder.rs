//! Option builders
//!
//! Consistent ways to register clap options on a [`Function`]: required,
//! defaulted, and paired `--flag`/`--no-flag` switches. Help always shows
//! the default or that the option is required.

use clap::{Arg, ArgAction, ArgMatches};
use tracing::debug;

use crate::core::argspec::param_name;
use crate::core::function::{Decorator, Function};
use crate::core::value::Value;
use crate::error::{Error, Result};
use crate::options::types::{OptionType, Scalar};

/// Whether an option must be given on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    Required,
    Default(Value),
}

/// How an option appears on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    /// `--name VALUE`
    Value(OptionType),
    /// `--name` / `--no-name`
    Switch,
}

/// An option registered on a [`Function`]
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    /// Parameter the option is passed as (also the clap id)
    pub name: String,
    /// Long flag without the leading dashes
    pub long: String,
    pub short: Option<char>,
    pub kind: OptionKind,
    pub requirement: Requirement,
    pub help: String,
}

impl OptionDescriptor {
    fn value(
        flag: &str,
        short: Option<char>,
        ty: OptionType,
        requirement: Requirement,
        help: &str,
    ) -> Result<Self> {
        let long = flag.trim_start_matches('-');
        if long.is_empty() {
            return Err(Error::MalformedFlag(flag.to_string()));
        }

        Ok(Self {
            name: param_name(flag),
            long: long.to_string(),
            short,
            kind: OptionKind::Value(ty),
            requirement,
            help: help.to_string(),
        })
    }

    /// The long flag as typed on the command line
    pub fn flag(&self) -> String {
        format!("--{}", self.long)
    }

    fn negated_long(&self) -> String {
        format!("no-{}", self.long)
    }

    fn longs(&self) -> Vec<String> {
        match self.kind {
            OptionKind::Value(_) => vec![self.long.clone()],
            OptionKind::Switch => vec![self.long.clone(), self.negated_long()],
        }
    }

    /// Whether two options would clash on one command
    pub(crate) fn conflicts_with(&self, other: &OptionDescriptor) -> bool {
        let theirs = other.longs();
        self.name == other.name
            || self.longs().iter().any(|l| theirs.contains(l))
            || (self.short.is_some() && self.short == other.short)
    }

    /// clap arguments for this option
    pub fn to_args(&self) -> Vec<Arg> {
        match &self.kind {
            OptionKind::Value(ty) => vec![self.value_arg(ty)],
            OptionKind::Switch => self.switch_args(),
        }
    }

    fn value_arg(&self, ty: &OptionType) -> Arg {
        let mut help = self.help.clone();
        if ty.is_repeatable() {
            help.push_str(" (may be given multiple times)");
        }

        let mut arg = Arg::new(self.name.clone())
            .long(self.long.clone())
            .value_name(self.name.to_uppercase())
            .value_parser(ty.scalar().value_parser())
            .action(if ty.is_repeatable() {
                ArgAction::Append
            } else {
                ArgAction::Set
            });

        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if matches!(ty.scalar(), Scalar::Int | Scalar::Float) {
            arg = arg.allow_negative_numbers(true);
        }

        arg = match &self.requirement {
            Requirement::Required => {
                help.push_str(" [required]");
                arg.required(true)
            }
            Requirement::Default(Value::None) => arg,
            Requirement::Default(Value::List(items)) if items.is_empty() => arg,
            Requirement::Default(Value::List(items)) => {
                arg.default_values(items.iter().map(|v| v.to_string()))
            }
            Requirement::Default(value) => arg.default_value(value.to_string()),
        };

        arg.help(help)
    }

    fn switch_args(&self) -> Vec<Arg> {
        let default = match &self.requirement {
            Requirement::Default(value) => value.to_string(),
            Requirement::Required => "false".to_string(),
        };
        let negated = self.negated_long();

        let on = Arg::new(self.name.clone())
            .long(self.long.clone())
            .action(ArgAction::SetTrue)
            .help(format!("{} [default: {}]", self.help, default))
            .overrides_with(negated.clone());
        let off = Arg::new(negated.clone())
            .long(negated)
            .action(ArgAction::SetTrue)
            .help(format!("Turn off --{}", self.long))
            .overrides_with(self.name.clone());

        vec![on, off]
    }

    /// Read this option's value out of parsed matches
    pub fn extract(&self, matches: &ArgMatches) -> Value {
        match &self.kind {
            OptionKind::Value(ty) if ty.is_repeatable() => ty.scalar().get_many(matches, &self.name),
            OptionKind::Value(ty) => ty
                .scalar()
                .get_one(matches, &self.name)
                .unwrap_or(Value::None),
            OptionKind::Switch => {
                if matches.get_flag(&self.negated_long()) {
                    Value::Bool(false)
                } else if matches.get_flag(&self.name) {
                    Value::Bool(true)
                } else {
                    match &self.requirement {
                        Requirement::Default(value) => value.clone(),
                        Requirement::Required => Value::Bool(false),
                    }
                }
            }
        }
    }
}

fn register(f: Function, descriptor: OptionDescriptor) -> Result<Function> {
    debug!(
        function = f.name(),
        option = %descriptor.flag(),
        requirement = ?descriptor.requirement,
        "registering option"
    );
    f.register_option(descriptor)
}

/// Register an option that must be given on the command line
pub fn build_required(
    flag: &str,
    short_flag: Option<char>,
    ty: impl Into<OptionType>,
    help: &str,
) -> impl Decorator {
    let descriptor = OptionDescriptor::value(flag, short_flag, ty.into(), Requirement::Required, help);
    move |f: Function| register(f, descriptor?)
}

/// Register an option that falls back to `default` when omitted
pub fn build_defaulted(
    flag: &str,
    short_flag: Option<char>,
    ty: impl Into<OptionType>,
    default: impl Into<Value>,
    help: &str,
) -> impl Decorator {
    let descriptor = OptionDescriptor::value(
        flag,
        short_flag,
        ty.into(),
        Requirement::Default(default.into()),
        help,
    );
    move |f: Function| register(f, descriptor?)
}

/// Register a `--flag`/`--no-flag` pair
///
/// # Errors
/// Returns [`Error::MalformedFlag`] straight away if `flag` doesn't start
/// with `--`.
pub fn build_boolean_flag(flag: &str, default: bool, help: &str) -> Result<impl Decorator> {
    let stripped = match flag.strip_prefix("--") {
        Some(s) if !s.is_empty() && !s.starts_with('-') => s,
        _ => return Err(Error::MalformedFlag(flag.to_string())),
    };

    let descriptor = OptionDescriptor {
        name: param_name(flag),
        long: stripped.to_string(),
        short: None,
        kind: OptionKind::Switch,
        requirement: Requirement::Default(Value::Bool(default)),
        help: help.to_string(),
    };
    Ok(move |f: Function| register(f, descriptor))
}
