//! CLI module - the demo command group
//!
//! Every command here is an ordinary [`Function`](crate::Function) that is
//! also callable as a library function; decorators supply the options.
//!
//! ```bash
//! clapwrap sum -n 1 -n 2 --start 10
//! clapwrap greet --name Ada --shout
//! clapwrap fail --debug
//! clapwrap config --json
//! ```

use crate::command::Group;
use crate::config::Config;
use crate::error::Result;

pub mod config;
pub mod fail;
pub mod greet;
pub mod sum;

/// Build the `clapwrap` command group
pub fn build(config: &Config) -> Result<Group> {
    Group::new("clapwrap")
        .about("Functions as commands: decorators for clap")
        .version(env!("CARGO_PKG_VERSION"))
        .command(sum::command()?)?
        .command(greet::command()?)?
        .command(fail::command(config)?)?
        .command(config::command(config)?)
}
