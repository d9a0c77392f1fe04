//! Runs test suites as shell commands.
//!
//! The child inherits stdin/stdout/stderr and the parent environment, with
//! the configured variables layered on top. The runner waits for the
//! process and reports its exit code; it never interprets output.

use agora_application::config::TestSuite;
use agora_application::ports::suite_runner::{SuiteOutcome, SuiteRunner, SuiteRunnerError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ProcessSuiteRunner {
    working_dir: Option<PathBuf>,
}

impl ProcessSuiteRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run suites from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn shell(command: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command]);
            c
        }
    }
}

#[async_trait]
impl SuiteRunner for ProcessSuiteRunner {
    async fn run(
        &self,
        suite: &TestSuite,
        env: &BTreeMap<String, String>,
    ) -> Result<SuiteOutcome, SuiteRunnerError> {
        let mut cmd = Self::shell(&suite.command);
        cmd.envs(env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!("Spawning `{}` with {} extra env var(s)", suite.command, env.len());
        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|source| SuiteRunnerError::Spawn {
            command: suite.command.clone(),
            source,
        })?;
        let status = child.wait().await.map_err(|source| SuiteRunnerError::Wait {
            command: suite.command.clone(),
            source,
        })?;

        let outcome = SuiteOutcome {
            exit_code: status.code(),
            duration: start.elapsed(),
        };
        debug!(
            "`{}` exited with {:?} after {:?}",
            suite.command, outcome.exit_code, outcome.duration
        );
        Ok(outcome)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn suite(command: &str) -> TestSuite {
        TestSuite::new("smoke", command)
    }

    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let outcome = ProcessSuiteRunner::new()
            .run(&suite("true"), &BTreeMap::new())
            .await
            .unwrap();
        assert!(outcome.success());
    }

    #[tokio::test]
    async fn test_exit_code_is_reported() {
        let outcome = ProcessSuiteRunner::new()
            .run(&suite("exit 3"), &BTreeMap::new())
            .await
            .unwrap();
        assert_eq!(outcome.exit_code, Some(3));
        assert!(!outcome.success());
    }

    #[tokio::test]
    async fn test_env_is_applied() {
        let env = BTreeMap::from([("DISPLAY".to_string(), ":99".to_string())]);
        let outcome = ProcessSuiteRunner::new()
            .run(&suite("test \"$DISPLAY\" = \":99\""), &env)
            .await
            .unwrap();
        assert!(outcome.success());
    }

    #[tokio::test]
    async fn test_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();
        let outcome = ProcessSuiteRunner::new()
            .in_dir(dir.path())
            .run(&suite("test -f marker"), &BTreeMap::new())
            .await
            .unwrap();
        assert!(outcome.success());
    }
}
