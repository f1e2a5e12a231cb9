//! Integration tests for the option decorators, through the public API

use clap::error::ErrorKind;
use clapwrap::{
    boolean, build_boolean_flag, build_defaulted, build_required, has_default, option, Error,
    Function, ParameterSpec, Scalar, Value,
};

fn identity(param: &str, spec: ParameterSpec) -> Function {
    let param = param.to_string();
    Function::new("f", spec, move |kwargs| Ok(kwargs.get::<Value>(&param)?))
}

fn cli_kind(result: clapwrap::Result<Value>) -> ErrorKind {
    match result {
        Err(Error::Cli(err)) => err.kind(),
        other => panic!("expected a clap error, got {:?}", other),
    }
}

fn help_text(f: &Function) -> String {
    match f.run_from(["f", "--help"]) {
        Err(Error::Cli(err)) => {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
            err.to_string()
        }
        other => panic!("expected help, got {:?}", other),
    }
}

fn run_boolean_suite(f: &Function, default: bool) {
    assert!(help_text(f).contains("a clap flag"));
    assert_eq!(f.run_from(["f"]).unwrap(), Value::Bool(default));
    assert_eq!(f.run_from(["f", "--my-flag"]).unwrap(), Value::Bool(true));
    assert_eq!(f.run_from(["f", "--no-my-flag"]).unwrap(), Value::Bool(false));
}

#[test]
fn test_boolean_flag() {
    for default in [true, false] {
        let spec = ParameterSpec::builder().arg("my_flag").build().unwrap();
        let f = identity("my_flag", spec)
            .with(build_boolean_flag("--my-flag", default, "a clap flag").unwrap())
            .unwrap();
        run_boolean_suite(&f, default);
    }
}

#[test]
fn test_boolean() {
    for default in [true, false] {
        let spec = ParameterSpec::builder()
            .arg_with_default("my_flag", default)
            .build()
            .unwrap();
        let f = identity("my_flag", spec)
            .with(boolean("--my-flag", "a clap flag"))
            .unwrap();
        run_boolean_suite(&f, default);
    }
}

#[test]
fn test_boolean_requires_default() {
    let spec = ParameterSpec::builder().arg("my_flag").build().unwrap();
    let err = identity("my_flag", spec)
        .with(boolean("--my-flag", "a flag"))
        .unwrap_err();
    assert!(matches!(err, Error::MissingDefault(name) if name == "my_flag"));
}

#[test]
fn test_boolean_rejects_non_boolean_default() {
    let spec = ParameterSpec::builder()
        .arg_with_default("my_flag", "not_a_boolean")
        .build()
        .unwrap();
    let err = identity("my_flag", spec)
        .with(boolean("--my-flag", "a flag"))
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("not_a_boolean"));
    assert!(err.to_string().contains("my_flag"));
}

#[test]
fn test_boolean_flag_fails_fast_without_prefix() {
    assert!(matches!(
        build_boolean_flag("-my-flag", false, "a flag"),
        Err(Error::MalformedFlag(_))
    ));
}

#[test]
fn test_has_default() {
    let spec = ParameterSpec::builder()
        .arg("x")
        .arg_with_default("y", 3)
        .build()
        .unwrap();
    let f = identity("x", spec);

    assert!(matches!(has_default(&f, "z"), Err(Error::UnknownParameter { .. })));
    assert_eq!(has_default(&f, "x").unwrap(), None);
    assert_eq!(has_default(&f, "y").unwrap(), Some(Value::Int(3)));

    let no_defaults = identity("x", ParameterSpec::builder().arg("x").build().unwrap());
    assert_eq!(has_default(&no_defaults, "x").unwrap(), None);

    let keywords = identity("x", ParameterSpec::builder().keywords().build().unwrap());
    assert_eq!(has_default(&keywords, "anything").unwrap(), None);
}

fn run_required_option_suite(f: &Function) {
    assert!(help_text(f).contains("a clap option"));
    assert_eq!(cli_kind(f.run_from(["f"])), ErrorKind::MissingRequiredArgument);
    assert_eq!(
        cli_kind(f.run_from(["f", "--my-option", "not_an_integer"])),
        ErrorKind::ValueValidation
    );
    assert_eq!(f.run_from(["f", "--my-option", "3"]).unwrap(), Value::Int(3));
    assert_eq!(f.run_from(["f", "-m", "3"]).unwrap(), Value::Int(3));
}

#[test]
fn test_required_option() {
    let spec = ParameterSpec::builder().arg("my_option").build().unwrap();
    let f = identity("my_option", spec)
        .with(build_required("--my-option", Some('m'), Scalar::Int, "a clap option"))
        .unwrap();
    run_required_option_suite(&f);
}

#[test]
fn test_option_like_required_option_if_no_default() {
    let spec = ParameterSpec::builder().arg("my_option").build().unwrap();
    let f = identity("my_option", spec)
        .with(option("--my-option", Some('m'), Scalar::Int, "a clap option"))
        .unwrap();
    run_required_option_suite(&f);
}

fn run_default_option_suite(f: &Function) {
    let help = help_text(f);
    assert!(help.contains("a clap option"));
    assert!(help.contains("[default: 42]"));
    assert_eq!(
        cli_kind(f.run_from(["f", "--my-option", "not_an_integer"])),
        ErrorKind::ValueValidation
    );
    assert_eq!(f.run_from(["f"]).unwrap(), Value::Int(42));
    assert_eq!(f.run_from(["f", "--my-option", "3"]).unwrap(), Value::Int(3));
    assert_eq!(f.run_from(["f", "-m", "3"]).unwrap(), Value::Int(3));
}

#[test]
fn test_numeric_options_take_negative_values() {
    let spec = ParameterSpec::builder()
        .arg_with_default("start", 0)
        .arg_with_default("scale", 1.0)
        .build()
        .unwrap();
    let f = Function::new("f", spec, |kwargs| {
        Ok(Value::List(vec![
            kwargs.get::<Value>("start")?,
            kwargs.get::<Value>("scale")?,
        ]))
    })
    .with(option("--start", None, Scalar::Int, "value to start from"))
    .unwrap()
    .with(option("--scale", Some('s'), Scalar::Float, "scale factor"))
    .unwrap();

    assert_eq!(
        f.run_from(["f", "--start", "-5", "-s", "-0.5"]).unwrap(),
        Value::List(vec![Value::Int(-5), Value::Float(-0.5)])
    );
}

#[test]
fn test_default_option() {
    let spec = ParameterSpec::builder().arg("my_option").build().unwrap();
    let f = identity("my_option", spec)
        .with(build_defaulted("--my-option", Some('m'), Scalar::Int, 42, "a clap option"))
        .unwrap();
    run_default_option_suite(&f);
}

#[test]
fn test_option_like_default_option_if_default() {
    let spec = ParameterSpec::builder()
        .arg_with_default("my_option", 42)
        .build()
        .unwrap();
    let f = identity("my_option", spec)
        .with(option("--my-option", Some('m'), Scalar::Int, "a clap option"))
        .unwrap();
    run_default_option_suite(&f);

    // the default still applies to direct calls
    assert_eq!(f.call(Default::default()).unwrap(), Value::Int(42));
}

#[test]
fn test_usage_error_exit_code() {
    let spec = ParameterSpec::builder().arg("my_option").build().unwrap();
    let f = identity("my_option", spec)
        .with(option("--my-option", None, Scalar::Int, "a clap option"))
        .unwrap();
    match f.run_from(["f"]) {
        Err(Error::Cli(err)) => assert_eq!(err.exit_code(), 2),
        other => panic!("expected a usage error, got {:?}", other),
    }
}
