use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Env, ModelError};

/// Immutable description of one external program invocation.
///
/// A job captures everything needed to re-run the invoking command inside the
/// daemon: working directory, program, arguments and the full environment at
/// the time of submission. Fields are private; once constructed a job is
/// never mutated, only moved between the coordinator, the wire and the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Directory the program is started in.
    working_directory: PathBuf,
    /// Program to execute (e.g. `"make"`, `"/usr/bin/rsync"`).
    program: String,
    /// Command-line arguments passed to the program.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
    /// Environment snapshot forwarded to the program verbatim.
    #[serde(default, skip_serializing_if = "Env::is_empty")]
    env: Env,
}

impl Job {
    /// Create a new job.
    ///
    /// Fails if `program` is empty or whitespace-only.
    pub fn new<P, S>(
        working_directory: P,
        program: S,
        args: Vec<String>,
        env: Env,
    ) -> Result<Self, ModelError>
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(ModelError::EmptyProgram);
        }
        Ok(Self {
            working_directory: working_directory.into(),
            program,
            args,
            env,
        })
    }

    /// Get the working directory.
    pub fn working_directory(&self) -> &std::path::Path {
        &self.working_directory
    }

    /// Get the program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the command-line arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Get the environment snapshot.
    pub fn env(&self) -> &Env {
        &self.env
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)
    }
}

#[cfg(test)]
mod tests {
    use super::Job;
    use crate::{Env, ModelError};

    fn mk_job() -> Job {
        let mut env = Env::new();
        env.push("FOO", "bar");
        Job::new("/cwd", "echo", vec!["hello".into()], env).unwrap()
    }

    #[test]
    fn new_sets_all_fields() {
        let job = mk_job();
        assert_eq!(job.working_directory().to_str(), Some("/cwd"));
        assert_eq!(job.program(), "echo");
        assert_eq!(job.args(), ["hello"]);
        assert_eq!(job.env().get("FOO"), Some("bar"));
    }

    #[test]
    fn new_rejects_empty_program() {
        for bad in ["", "   "] {
            let res = Job::new("/cwd", bad, Vec::new(), Env::new());
            assert!(
                matches!(res, Err(ModelError::EmptyProgram)),
                "expected EmptyProgram for {bad:?}"
            );
        }
    }

    #[test]
    fn display_is_program_name() {
        let job = mk_job();
        assert_eq!(job.to_string(), "echo");
    }

    #[test]
    fn serde_roundtrip_json() {
        let job = mk_job();
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains("\"workingDirectory\""));
        assert!(json.contains("\"program\":\"echo\""));
        assert!(json.contains("\"env\":[\"FOO=bar\"]"));

        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }

    #[test]
    fn serde_defaults_args_and_env_when_missing() {
        let json = r#"{"workingDirectory":"/cwd","program":"true"}"#;
        let job: Job = serde_json::from_str(json).unwrap();

        assert!(job.args().is_empty());
        assert!(job.env().is_empty());
    }
}
