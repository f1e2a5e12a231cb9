//! Post-mortem debuggers
//!
//! A [`Debugger`] gets control after a wrapped function fails with the
//! debug flag on. Candidates are tried in order and the first available
//! one is used; the default order is `rust-gdb`, `gdb`, then [`Report`],
//! which is always available.

use std::process::Command;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::warn;

/// What happens to the error once the debugger is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The caller still gets the error
    Propagate,
    /// The error is consumed; the wrapped call returns `Value::None`
    Suppress,
}

/// Context of a failed call
#[derive(Debug)]
pub struct Failure<'a> {
    /// Name of the function that failed
    pub function: &'a str,
    pub error: &'a anyhow::Error,
    /// Process to attach to
    pub pid: u32,
}

/// Something that can start a post-mortem session for a failure
pub trait Debugger: Send + Sync {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }

    fn post_mortem(&self, failure: &Failure<'_>) -> Result<Disposition>;
}

/// Attach an external debugger to this process
///
/// The debugger runs as a child attaching to its parent. Linux with Yama
/// `ptrace_scope` at 1 or above refuses that, so the provider reports
/// itself unavailable there and resolution moves on.
#[derive(Debug, Clone)]
pub struct Attach {
    program: &'static str,
    args: &'static [&'static str],
}

impl Attach {
    pub const fn rust_gdb() -> Self {
        Self {
            program: "rust-gdb",
            args: &["-q", "-p"],
        }
    }

    pub const fn gdb() -> Self {
        Self {
            program: "gdb",
            args: &["-q", "-p"],
        }
    }

    pub const fn lldb() -> Self {
        Self {
            program: "lldb",
            args: &["-p"],
        }
    }
}

impl Debugger for Attach {
    fn name(&self) -> &str {
        self.program
    }

    fn is_available(&self) -> bool {
        let scope = std::fs::read_to_string(PTRACE_SCOPE).ok();
        ptrace_allowed(scope.as_deref()) && which::which(self.program).is_ok()
    }

    fn post_mortem(&self, failure: &Failure<'_>) -> Result<Disposition> {
        eprintln!(
            "Attaching {} to pid {} ({} failed)",
            self.program, failure.pid, failure.function
        );
        let status = Command::new(self.program)
            .args(self.args)
            .arg(failure.pid.to_string())
            .status()
            .with_context(|| format!("Failed to start {}", self.program))?;

        if !status.success() {
            warn!(debugger = self.program, %status, "debugger exited with an error");
        }
        Ok(Disposition::Propagate)
    }
}

const PTRACE_SCOPE: &str = "/proc/sys/kernel/yama/ptrace_scope";

/// Whether a child may attach to its parent under the given Yama scope
///
/// No Yama (or not Linux) means classic ptrace rules.
fn ptrace_allowed(scope: Option<&str>) -> bool {
    match scope.map(str::trim) {
        None => true,
        Some(scope) => scope == "0",
    }
}

/// Print the failure's cause chain
#[derive(Debug, Clone, Default)]
pub struct Report;

impl Debugger for Report {
    fn name(&self) -> &str {
        "report"
    }

    fn post_mortem(&self, failure: &Failure<'_>) -> Result<Disposition> {
        eprintln!(
            "{}",
            format!("post-mortem: {} failed", failure.function).red().bold()
        );
        for (depth, cause) in failure.error.chain().enumerate() {
            eprintln!("  {} {}", format!("{}:", depth).dimmed(), cause);
        }
        Ok(Disposition::Propagate)
    }
}

/// Look up a debugger by name
pub fn by_name(name: &str) -> Option<Arc<dyn Debugger>> {
    match name {
        "rust-gdb" => Some(Arc::new(Attach::rust_gdb())),
        "gdb" => Some(Arc::new(Attach::gdb())),
        "lldb" => Some(Arc::new(Attach::lldb())),
        "report" => Some(Arc::new(Report)),
        _ => None,
    }
}

/// Candidates in order of preference
pub fn default_candidates() -> Vec<Arc<dyn Debugger>> {
    let candidates: [Arc<dyn Debugger>; 3] = [
        Arc::new(Attach::rust_gdb()),
        Arc::new(Attach::gdb()),
        Arc::new(Report),
    ];
    candidates.into()
}

/// Pick the first available candidate
///
/// Prints a one-line notice when the preferred candidate isn't available.
pub fn resolve(candidates: &[Arc<dyn Debugger>]) -> Option<Arc<dyn Debugger>> {
    let (index, chosen) = candidates
        .iter()
        .enumerate()
        .find(|(_, d)| d.is_available())?;

    if index > 0 {
        let preferred = candidates[0].name();
        eprintln!(
            "{} not found, using {} for post-mortem. Try installing {}.",
            preferred,
            chosen.name(),
            preferred
        );
        warn!(preferred, chosen = chosen.name(), "debugger fallback");
    }

    Some(chosen.clone())
}

/// The default debugger, resolved once per process
pub fn default_debugger() -> Arc<dyn Debugger> {
    static DEFAULT: OnceLock<Arc<dyn Debugger>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| {
            resolve(&default_candidates()).unwrap_or_else(|| Arc::new(Report) as Arc<dyn Debugger>)
        })
        .clone()
}
