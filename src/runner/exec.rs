//! Runs planned steps through the platform shell.

use std::process::{Command, ExitStatus};

use super::plan::{Plan, Step};
use super::{RunError, RunResult};

/// How many steps actually ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecSummary {
    pub executed: usize,
    pub skipped_projects: usize,
}

/// Executes the plan in order, stopping at the first failing step.
///
/// With `dry_run` the commands are printed and nothing is started.
pub fn execute(plan: &Plan, dry_run: bool) -> RunResult<ExecSummary> {
    let mut summary = ExecSummary {
        skipped_projects: plan.skipped.len(),
        ..ExecSummary::default()
    };

    for step in &plan.steps {
        if dry_run {
            println!("[dry-run] {}: {}", step.project, step.command);
            continue;
        }

        println!("▶ {} ({}): {}", step.project, step.kind, step.command);
        tracing::info!("Running {} step in {}", step.kind, step.dir.display());

        let status = run_step(step)?;
        if !status.success() {
            return Err(RunError::CommandFailed {
                project: step.project.clone(),
                command: step.command.clone(),
                status: describe(status),
            });
        }
        summary.executed += 1;
    }

    Ok(summary)
}

fn run_step(step: &Step) -> RunResult<ExitStatus> {
    shell(&step.command)
        .current_dir(&step.dir)
        .status()
        .map_err(|source| RunError::Spawn {
            project: step.project.clone(),
            command: step.command.clone(),
            source,
        })
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::runner::plan::StepKind;
    use tempfile::TempDir;

    fn step(dir: &TempDir, command: &str) -> Step {
        Step {
            project: "app".to_string(),
            dir: dir.path().to_path_buf(),
            kind: StepKind::Script,
            command: command.to_string(),
        }
    }

    #[test]
    fn test_execute_runs_in_project_dir() {
        let dir = TempDir::new().unwrap();
        let plan = Plan {
            steps: vec![step(&dir, "touch ran.txt")],
            skipped: vec![],
        };

        let summary = execute(&plan, false).unwrap();
        assert_eq!(summary.executed, 1);
        assert!(dir.path().join("ran.txt").is_file());
    }

    #[test]
    fn test_dry_run_starts_nothing() {
        let dir = TempDir::new().unwrap();
        let plan = Plan {
            steps: vec![step(&dir, "touch ran.txt")],
            skipped: vec!["other".to_string()],
        };

        let summary = execute(&plan, true).unwrap();
        assert_eq!(summary.executed, 0);
        assert_eq!(summary.skipped_projects, 1);
        assert!(!dir.path().join("ran.txt").exists());
    }

    #[test]
    fn test_failure_stops_the_run() {
        let dir = TempDir::new().unwrap();
        let plan = Plan {
            steps: vec![step(&dir, "exit 3"), step(&dir, "touch after.txt")],
            skipped: vec![],
        };

        let err = execute(&plan, false).unwrap_err();
        assert!(matches!(
            err,
            RunError::CommandFailed { ref status, .. } if status == "exit code 3"
        ));
        assert!(!dir.path().join("after.txt").exists());
    }

    #[test]
    fn test_missing_directory_is_a_spawn_error() {
        let dir = TempDir::new().unwrap();
        let mut missing = step(&dir, "true");
        missing.dir = dir.path().join("nope");
        let plan = Plan {
            steps: vec![missing],
            skipped: vec![],
        };

        assert!(matches!(execute(&plan, false), Err(RunError::Spawn { .. })));
    }
}
