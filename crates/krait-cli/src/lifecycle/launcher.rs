//! Runtime launching.
//!
//! Builds the argument vector for the supervised `kraitd` runtime,
//! executes it under one of two strategies, and classifies the captured
//! output. The classification is a textual contract with the runtime's
//! own messages; it stays behind a function pointer so a structured
//! channel can replace it without touching the controller.

use std::env;
use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};

use super::error::LifecycleError;
use super::reactor::select_reactor;
use super::types::{LifecycleContext, StartRequest};

/// Substring in captured stdout marking a runtime-reported error.
const EXCEPTION_MARKER: &str = "exception";
/// Substring in captured stdout marking a stale plugin-registry entry.
const ALREADY_INSTALLED_MARKER: &str = "already installed";

/// Classified result of a supervised launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LaunchOutcome {
    /// The runtime started; `stdout` holds anything it printed.
    Success { stdout: String },
    /// The runtime found the application already installed, usually a
    /// stale registry cache; the caller retries the launch once.
    AlreadyRunning,
    /// The runtime reported an error; `detail` holds the diagnostic
    /// text captured from it.
    Failure { detail: String },
}

/// How the runtime process is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LaunchStrategy {
    /// Replace the current process image; never returns on success.
    /// Used for development mode and managed hosting, where the
    /// surrounding supervisor owns the process.
    ForegroundExec,
    /// Spawn a child, capture its output fully, and classify it.
    SupervisedSpawn,
}

/// Fully resolved launch: binary, argument vector, and strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchPlan {
    pub(crate) binary: OsString,
    pub(crate) arguments: Vec<String>,
    pub(crate) strategy: LaunchStrategy,
}

/// Builds the launch plan for the given application.
///
/// Argument order matters to the runtime's own option parser:
/// `--nodaemon` leads, reactor and syslog flags follow outside managed
/// hosting, then the application identifier, then any port override.
pub(super) fn build_launch_plan(
    context: LifecycleContext<'_>,
    request: StartRequest,
    application: &str,
) -> LaunchPlan {
    let mut arguments = vec![String::from("--nodaemon")];
    if !context.hosting.managed {
        if !context.config.auto_select_reactor {
            arguments.push(format!(
                "--reactor={}",
                select_reactor(context.config, context.platform)
            ));
        }
        if !context.config.development {
            // Production runs detach and log to syslog instead.
            arguments.retain(|argument| argument != "--nodaemon");
            arguments.push(String::from("--syslog"));
        }
    }
    arguments.push(application.to_owned());
    if let Some(port) = request.port_override {
        arguments.push(format!("--port={port}"));
    }

    let strategy = if context.hosting.managed || context.config.development {
        LaunchStrategy::ForegroundExec
    } else {
        LaunchStrategy::SupervisedSpawn
    };

    LaunchPlan {
        binary: resolve_runtime_binary(context.runtime_binary),
        arguments,
        strategy,
    }
}

fn resolve_runtime_binary(binary_override: Option<&OsStr>) -> OsString {
    binary_override
        .map(OsString::from)
        .or_else(|| env::var_os("KRAITD_BIN"))
        .unwrap_or_else(|| OsString::from("kraitd"))
}

/// Classifies captured runtime output into a launch outcome.
///
/// Any stderr text is a failure. An `exception` mention in stdout is a
/// runtime-reported error rather than a launcher crash. An
/// `already installed` mention asks for one clean retry.
pub(crate) fn classify_runtime_output(stdout: &str, stderr: &str) -> LaunchOutcome {
    if !stderr.is_empty() {
        return LaunchOutcome::Failure {
            detail: stderr.to_owned(),
        };
    }
    if stdout.contains(EXCEPTION_MARKER) {
        return LaunchOutcome::Failure {
            detail: stdout.to_owned(),
        };
    }
    if stdout.contains(ALREADY_INSTALLED_MARKER) {
        return LaunchOutcome::AlreadyRunning;
    }
    LaunchOutcome::Success {
        stdout: stdout.to_owned(),
    }
}

/// Signature of the output classifier so tests and future structured
/// channels can substitute [`classify_runtime_output`].
pub(crate) type OutputClassifier = fn(&str, &str) -> LaunchOutcome;

/// Executes a launch plan.
pub(crate) trait RuntimeLauncher {
    fn launch(&mut self, plan: &LaunchPlan) -> Result<LaunchOutcome, LifecycleError>;
}

/// Production launcher executing the real runtime binary.
pub(crate) struct ProcessLauncher {
    classifier: OutputClassifier,
}

impl ProcessLauncher {
    pub(crate) fn new() -> Self {
        Self {
            classifier: classify_runtime_output,
        }
    }
}

impl RuntimeLauncher for ProcessLauncher {
    fn launch(&mut self, plan: &LaunchPlan) -> Result<LaunchOutcome, LifecycleError> {
        match plan.strategy {
            LaunchStrategy::ForegroundExec => exec_foreground(plan),
            LaunchStrategy::SupervisedSpawn => self.spawn_supervised(plan),
        }
    }
}

impl ProcessLauncher {
    fn spawn_supervised(&self, plan: &LaunchPlan) -> Result<LaunchOutcome, LifecycleError> {
        let output = Command::new(&plan.binary)
            .args(&plan.arguments)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LifecycleError::LaunchRuntime {
                binary: plan.binary.clone(),
                source,
            })?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok((self.classifier)(&stdout, &stderr))
    }
}

#[cfg(unix)]
fn exec_foreground(plan: &LaunchPlan) -> Result<LaunchOutcome, LifecycleError> {
    use std::os::unix::process::CommandExt;

    // exec(2) only returns on failure; on success the runtime takes
    // over this process image and the controller never resumes.
    let source = Command::new(&plan.binary).args(&plan.arguments).exec();
    Err(LifecycleError::LaunchRuntime {
        binary: plan.binary.clone(),
        source,
    })
}

#[cfg(not(unix))]
fn exec_foreground(plan: &LaunchPlan) -> Result<LaunchOutcome, LifecycleError> {
    // No process-image replacement outside Unix; run the runtime in the
    // foreground with inherited streams instead.
    let status = Command::new(&plan.binary)
        .args(&plan.arguments)
        .status()
        .map_err(|source| LifecycleError::LaunchRuntime {
            binary: plan.binary.clone(),
            source,
        })?;
    if status.success() {
        Ok(LaunchOutcome::Success {
            stdout: String::new(),
        })
    } else {
        Ok(LaunchOutcome::Failure {
            detail: format!("runtime exited with {status}"),
        })
    }
}
