//! Hand-off of a written `.tex` file to the external LaTeX compiler.
//!
//! The compiler runs in the file's directory with the file name as its last argument. Its exit
//! status is logged and returned, never acted on: compiler diagnostics are the user's to read.

use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

/// Result of one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesetOutcome {
    Completed,
    /// The compiler ran and exited unsuccessfully (`None` when killed by a signal).
    Failed { exit_code: Option<i32> },
    /// The compiler could not be started at all.
    NotStarted { reason: String },
}

#[derive(Debug, Clone)]
pub struct Typesetter {
    program: String,
    args: Vec<String>,
}

impl Typesetter {
    /// `command` is split on whitespace: program first, then fixed arguments,
    /// e.g. `pdflatex -interaction=nonstopmode`.
    pub fn new(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_else(|| "pdflatex".to_string());
        Self {
            program,
            args: parts.collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn typeset(&self, tex_path: &Path) -> TypesetOutcome {
        let Some(file_name) = tex_path.file_name() else {
            return TypesetOutcome::NotStarted {
                reason: format!("{} has no file name", tex_path.display()),
            };
        };
        let workdir = tex_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(file_name)
            .current_dir(workdir)
            .status();

        match status {
            Ok(status) if status.success() => {
                info!(file = %tex_path.display(), program = %self.program, "Typeset complete");
                TypesetOutcome::Completed
            }
            Ok(status) => {
                warn!(
                    file = %tex_path.display(),
                    program = %self.program,
                    exit_code = ?status.code(),
                    "Typesetter exited unsuccessfully"
                );
                TypesetOutcome::Failed {
                    exit_code: status.code(),
                }
            }
            Err(e) => {
                warn!(
                    file = %tex_path.display(),
                    program = %self.program,
                    "Typesetter could not be started: {e}"
                );
                TypesetOutcome::NotStarted {
                    reason: e.to_string(),
                }
            }
        }
    }
}
