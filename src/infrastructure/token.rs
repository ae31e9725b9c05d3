//! Access token providers.

use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::traits::{CommandRunner, TokenProvider};

/// Token given directly (config or environment).
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> io::Result<String> {
        let token = self.0.trim();
        if token.is_empty() {
            return Err(io::Error::other("configured access token is empty"));
        }
        Ok(token.to_string())
    }
}

/// Token printed on stdout by an external command, e.g. `gcloud auth print-access-token`.
pub struct CommandToken {
    runner: Arc<dyn CommandRunner>,
    command: String,
}

impl CommandToken {
    pub fn new(runner: Arc<dyn CommandRunner>, command: impl Into<String>) -> Self {
        Self {
            runner,
            command: command.into(),
        }
    }
}

impl TokenProvider for CommandToken {
    fn access_token(&self) -> io::Result<String> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| io::Error::other("token command is empty"))?;
        let args: Vec<&str> = parts.collect();
        debug!("running token command: {}", program);

        let output = self.runner.run(program, &args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::other(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(io::Error::other(format!("{program} printed no token")));
        }
        Ok(token)
    }
}
