//! `clapwrap fail` command
//!
//! Always fails, to try out `--debug`.

use anyhow::Context;

use crate::config::Config;
use crate::core::argspec::ParameterSpec;
use crate::core::function::Function;
use crate::core::value::Value;
use crate::debug::debug_with;
use crate::error::Result;
use crate::options::{option, Scalar};

pub fn command(config: &Config) -> Result<Function> {
    let spec = ParameterSpec::builder()
        .arg_with_default("message", "something went wrong")
        .build()?;

    Function::new("fail", spec, |kwargs| {
        let message = kwargs.get::<String>("message")?;
        let result: anyhow::Result<Value> = Err(anyhow::anyhow!(message));
        result.context("fail command failed")
    })
    .doc("Fail on purpose")
    .with(option("--message", Some('m'), Scalar::Str, "error message"))?
    .with(debug_with(config.debug_config()))
}
