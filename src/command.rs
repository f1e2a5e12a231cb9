//! Command module - run functions as clap commands
//!
//! A [`Function`] becomes a clap [`Command`] named after the function,
//! with its doc as the about text and one argument per registered option.
//! Parsing, `--help` and usage errors are all clap's.
//!
//! # Usage
//! ```
//! use clapwrap::{boolean, Function, Group, ParameterSpec, Value};
//!
//! let spec = ParameterSpec::builder().arg_with_default("loud", false).build().unwrap();
//! let hello = Function::new("_say_hello", spec, |kwargs| {
//!     Ok(Value::Bool(kwargs.get::<bool>("loud")?))
//! })
//! .with(boolean("--loud", "shout it"))
//! .unwrap();
//!
//! let app = Group::new("app").command(hello).unwrap();
//! let loud = app.run_from(["app", "say-hello", "--loud"]).unwrap();
//! assert_eq!(loud, Value::Bool(true));
//! ```

use std::ffi::OsString;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgMatches, Command};
use tracing::debug;

use crate::core::function::{CallArgs, Function};
use crate::core::value::Value;
use crate::error::{Error, Result};

/// Command name for a function: `_show_sum_` becomes `show-sum`
pub fn command_name(function_name: &str) -> String {
    function_name.trim_matches('_').replace('_', "-")
}

impl Function {
    /// The clap command for this function
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(command_name(self.name()));
        if let Some(doc) = self.documentation() {
            cmd = cmd.about(doc.to_string());
        }
        for option in self.options() {
            cmd = cmd.args(option.to_args());
        }
        cmd
    }

    /// Named arguments for a call, read from parsed matches
    pub fn call_args(&self, matches: &ArgMatches) -> CallArgs {
        self.options()
            .iter()
            .fold(CallArgs::new(), |args, option| {
                args.named(option.name.clone(), option.extract(matches))
            })
    }

    /// Parse `argv` (program name first) and call the function
    ///
    /// # Errors
    /// Returns [`Error::Cli`] for anything clap rejects, including `--help`,
    /// and [`Error::Failed`] if the call itself fails.
    pub fn run_from<I, T>(&self, argv: I) -> Result<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(argv)?;
        debug!(command = self.name(), "parsed arguments");
        Ok(self.call(self.call_args(&matches))?)
    }

    /// Run with the process arguments and turn the outcome into an exit code
    ///
    /// clap prints help and usage errors and exits (status 2 for usage
    /// errors). A failed call prints the error and exits with 1.
    pub fn main(&self) -> ExitCode {
        finish(self.run_from(std::env::args_os()))
    }
}

/// Functions registered as subcommands of one parent command
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    about: Option<String>,
    version: Option<String>,
    commands: Vec<Function>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            version: None,
            commands: Vec::new(),
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Register a function under its command name
    ///
    /// # Errors
    /// Returns [`Error::DuplicateCommand`] if the name is taken.
    pub fn command(mut self, f: Function) -> Result<Self> {
        let name = command_name(f.name());
        if self.find(&name).is_some() {
            return Err(Error::DuplicateCommand(name));
        }
        debug!(group = %self.name, command = %name, "registering command");
        self.commands.push(f);
        Ok(self)
    }

    pub fn commands(&self) -> &[Function] {
        &self.commands
    }

    fn find(&self, name: &str) -> Option<&Function> {
        self.commands.iter().find(|f| command_name(f.name()) == name)
    }

    /// The clap command, with one subcommand per registered function
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(self.name.clone())
            .subcommand_required(true)
            .arg_required_else_help(true);
        if let Some(about) = &self.about {
            cmd = cmd.about(about.clone());
        }
        if let Some(version) = &self.version {
            cmd = cmd.version(version.clone());
        }
        cmd.subcommands(self.commands.iter().map(Function::command))
    }

    /// Parse `argv` and call the selected command
    pub fn run_from<I, T>(&self, argv: I) -> Result<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.to_command().try_get_matches_from(argv)?;
        let (name, sub_matches) = match matches.subcommand() {
            Some(sub) => sub,
            None => {
                return Err(self
                    .to_command()
                    .error(ErrorKind::MissingSubcommand, "a subcommand is required")
                    .into())
            }
        };
        let f = self.find(name).ok_or_else(|| {
            self.to_command()
                .error(ErrorKind::InvalidSubcommand, format!("unknown command {}", name))
        })?;
        debug!(group = %self.name, command = name, "dispatching");
        Ok(f.call(f.call_args(sub_matches))?)
    }

    /// Run with the process arguments; see [`Function::main`]
    pub fn main(&self) -> ExitCode {
        finish(self.run_from(std::env::args_os()))
    }
}

fn finish(outcome: Result<Value>) -> ExitCode {
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(Error::Cli(err)) => err.exit(),
        Err(Error::Failed(err)) => {
            eprintln!("Error: {:?}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::argspec::ParameterSpec;

    fn named(name: &str) -> Function {
        Function::new(name, ParameterSpec::default(), |_| Ok(Value::None))
    }

    #[test]
    fn test_command_name() {
        assert_eq!(command_name("_show_sum"), "show-sum");
        assert_eq!(command_name("sum"), "sum");
        assert_eq!(command_name("__private__"), "private");
    }

    #[test]
    fn test_command_uses_doc() {
        let cmd = named("_f").doc("does f").command();
        assert_eq!(cmd.get_name(), "f");
        assert_eq!(cmd.get_about().unwrap().to_string(), "does f");
    }

    #[test]
    fn test_group_rejects_duplicate_names() {
        let err = Group::new("app")
            .command(named("show_sum"))
            .unwrap()
            .command(named("_show_sum"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCommand(name) if name == "show-sum"));
    }

    #[test]
    fn test_group_requires_subcommand() {
        let app = Group::new("app").command(named("f")).unwrap();
        let err = app.run_from(["app"]).unwrap_err();
        assert!(matches!(err, Error::Cli(_)));
    }

    #[test]
    fn test_group_dispatch() {
        let app = Group::new("app")
            .command(Function::new("one", ParameterSpec::default(), |_| Ok(Value::Int(1))))
            .unwrap()
            .command(Function::new("two", ParameterSpec::default(), |_| Ok(Value::Int(2))))
            .unwrap();
        assert_eq!(app.run_from(["app", "two"]).unwrap(), Value::Int(2));
    }
}
