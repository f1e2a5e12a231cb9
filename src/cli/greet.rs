//! `clapwrap greet` command

use crate::call::redirect;
use crate::core::argspec::ParameterSpec;
use crate::core::function::Function;
use crate::core::value::Value;
use crate::error::Result;
use crate::options::{boolean, option, Scalar};

/// `greet(name, shout=False, times=1)`
pub fn greet() -> Result<Function> {
    let spec = ParameterSpec::builder()
        .arg("name")
        .arg_with_default("shout", false)
        .arg_with_default("times", 1)
        .build()?;

    Ok(Function::new("greet", spec, |kwargs| {
        let name = kwargs.get::<String>("name")?;
        let mut greeting = format!("Hello, {}!", name);
        if kwargs.get::<bool>("shout")? {
            greeting = greeting.to_uppercase();
        }
        for _ in 0..kwargs.get::<i64>("times")? {
            println!("{}", greeting);
        }
        Ok(Value::Str(greeting))
    })
    .doc("Greet someone"))
}

pub fn command() -> Result<Function> {
    let target = greet()?;

    Function::placeholder("_greet")
        .with(redirect(&target))?
        .with(option("--name", None, Scalar::Str, "who to greet"))?
        .with(boolean("--shout", "greet loudly?"))?
        .with(option("--times", Some('t'), Scalar::Int, "how many times"))
}
