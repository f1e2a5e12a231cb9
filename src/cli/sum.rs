//! `clapwrap sum` command
//!
//! [`add_all`] is the library function; the command prints its result.

use crate::call::redirect_with_output_handler;
use crate::core::argspec::ParameterSpec;
use crate::core::function::Function;
use crate::core::value::Value;
use crate::error::Result;
use crate::options::{option, OptionType, Scalar};

/// `add_all(number, start=0)`: sum of `number`, plus `start`
pub fn add_all() -> Result<Function> {
    let spec = ParameterSpec::builder()
        .arg("number")
        .arg_with_default("start", 0)
        .build()?;

    Ok(Function::new("add_all", spec, |kwargs| {
        let numbers = kwargs.get::<Vec<i64>>("number")?;
        let start = kwargs.get::<i64>("start")?;
        Ok(Value::Int(numbers.iter().sum::<i64>() + start))
    })
    .doc("Add up numbers"))
}

pub fn command() -> Result<Function> {
    let target = add_all()?;
    let print = ParameterSpec::builder().arg("total").build()?;

    Function::new("_sum", print, |kwargs| {
        println!("{}", kwargs.get::<Value>("total")?);
        Ok(Value::None)
    })
    .with(redirect_with_output_handler(&target))?
    .with(option(
        "--number",
        Some('n'),
        OptionType::repeatable(Scalar::Int),
        "a number to add",
    ))?
    .with(option("--start", None, Scalar::Int, "value to start from"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::function::CallArgs;

    #[test]
    fn test_add_all_direct_call() {
        let total = add_all()
            .unwrap()
            .call(CallArgs::new().arg(vec![1i64, 2, 3]))
            .unwrap();
        assert_eq!(total, Value::Int(6));
    }

    #[test]
    fn test_sum_command() {
        let cmd = command().unwrap();
        assert_eq!(cmd.name(), "_sum");
        assert_eq!(cmd.documentation(), Some("Add up numbers"));

        let total = cmd
            .run_from(["sum", "-n", "1", "-n", "2", "--start", "10"])
            .unwrap();
        assert_eq!(total, Value::Int(13));
    }

    #[test]
    fn test_sum_requires_a_number() {
        let err = command().unwrap().run_from(["sum"]).unwrap_err();
        assert!(matches!(err, crate::Error::Cli(_)));
    }
}
