//! `clapwrap config` command
//!
//! Show the effective configuration.
//!
//! # Usage
//! ```bash
//! clapwrap config           # TOML
//! clapwrap config --json    # JSON
//! clapwrap config --path    # where config files are looked up
//! ```

use anyhow::Context;

use crate::config::{Config, CONFIG_ENV};
use crate::core::argspec::ParameterSpec;
use crate::core::function::Function;
use crate::core::value::Value;
use crate::error::Result;
use crate::options::boolean;

pub fn command(config: &Config) -> Result<Function> {
    let config = config.clone();
    let spec = ParameterSpec::builder()
        .arg_with_default("json", false)
        .arg_with_default("path", false)
        .build()?;

    Function::new("_config", spec, move |kwargs| {
        if kwargs.get::<bool>("path")? {
            show_paths();
        } else if kwargs.get::<bool>("json")? {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            let content = toml::to_string_pretty(&config).context("Failed to render config")?;
            println!("{}", content);
        }
        Ok(Value::None)
    })
    .doc("Show the effective configuration")
    .with(boolean("--json", "print as JSON?"))?
    .with(boolean("--path", "show config file locations?"))
}

fn show_paths() {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        println!("{}:  {}", CONFIG_ENV, path);
    }
    match Config::find_local_config() {
        Some(local) => println!("Local:  {}", local.display()),
        None => println!("Local:  (none)"),
    }
    match Config::global_config_path() {
        Some(global) => println!("Global: {}", global.display()),
        None => println!("Global: (unknown)"),
    }
}
