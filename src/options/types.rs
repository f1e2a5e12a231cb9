//! Option value types
//!
//! Each [`Scalar`] maps to a clap value parser, and to the [`Value`]
//! variant the parsed argument is handed to the function as.

use std::path::PathBuf;

use clap::builder::ValueParser;
use clap::{value_parser, ArgMatches};

use crate::core::value::Value;

/// Type of a single option value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Bool,
    Int,
    Float,
    Str,
    Path(PathKind),
}

/// What a path option must point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    ExistingFile,
    ExistingDir,
    Any,
}

/// A path to a file that must already exist
pub const EXISTING_FILE: Scalar = Scalar::Path(PathKind::ExistingFile);

/// A path to a directory that must already exist
pub const EXISTING_DIR: Scalar = Scalar::Path(PathKind::ExistingDir);

/// Any path, existing or not
pub const NEW_FILE_OR_DIR: Scalar = Scalar::Path(PathKind::Any);

/// Declared type of an option: one value, or one per occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Scalar(Scalar),
    Repeatable(Scalar),
}

impl OptionType {
    pub fn repeatable(scalar: Scalar) -> Self {
        OptionType::Repeatable(scalar)
    }

    pub fn scalar(&self) -> Scalar {
        match self {
            OptionType::Scalar(s) | OptionType::Repeatable(s) => *s,
        }
    }

    pub fn is_repeatable(&self) -> bool {
        matches!(self, OptionType::Repeatable(_))
    }
}

impl From<Scalar> for OptionType {
    fn from(scalar: Scalar) -> Self {
        OptionType::Scalar(scalar)
    }
}

impl Scalar {
    pub(crate) fn value_parser(&self) -> ValueParser {
        match self {
            Scalar::Bool => ValueParser::bool(),
            Scalar::Int => value_parser!(i64).into(),
            Scalar::Float => ValueParser::new(parse_float),
            Scalar::Str => ValueParser::string(),
            Scalar::Path(PathKind::ExistingFile) => ValueParser::new(existing_file),
            Scalar::Path(PathKind::ExistingDir) => ValueParser::new(existing_dir),
            Scalar::Path(PathKind::Any) => ValueParser::new(any_path),
        }
    }

    /// Value of a single-valued option, if present or defaulted
    pub(crate) fn get_one(&self, matches: &ArgMatches, id: &str) -> Option<Value> {
        match self {
            Scalar::Bool => matches.get_one::<bool>(id).copied().map(Value::Bool),
            Scalar::Int => matches.get_one::<i64>(id).copied().map(Value::Int),
            Scalar::Float => matches.get_one::<f64>(id).copied().map(Value::Float),
            Scalar::Str => matches.get_one::<String>(id).cloned().map(Value::Str),
            Scalar::Path(_) => matches.get_one::<PathBuf>(id).cloned().map(Value::Path),
        }
    }

    /// Values of a repeatable option, in the order given
    pub(crate) fn get_many(&self, matches: &ArgMatches, id: &str) -> Value {
        match self {
            Scalar::Bool => many::<bool>(matches, id, Value::Bool),
            Scalar::Int => many::<i64>(matches, id, Value::Int),
            Scalar::Float => many::<f64>(matches, id, Value::Float),
            Scalar::Str => many::<String>(matches, id, Value::Str),
            Scalar::Path(_) => many::<PathBuf>(matches, id, Value::Path),
        }
    }
}

fn many<T>(matches: &ArgMatches, id: &str, into: fn(T) -> Value) -> Value
where
    T: Clone + Send + Sync + 'static,
{
    let values = matches
        .get_many::<T>(id)
        .map(|vals| vals.cloned().map(into).collect())
        .unwrap_or_default();
    Value::List(values)
}

fn parse_float(s: &str) -> Result<f64, std::num::ParseFloatError> {
    s.parse()
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File {:?} does not exist.", s))
    }
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("Directory {:?} does not exist.", s))
    }
}

fn any_path(s: &str) -> Result<PathBuf, String> {
    if s.is_empty() {
        return Err("path cannot be empty".to_string());
    }
    Ok(PathBuf::from(s))
}
