use async_trait::async_trait;
use catena_core::{CoreError, Options, Output, Result, Stage};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Environment variable carrying the options as JSON
pub const OPTIONS_ENV: &str = "CATENA_OPTIONS";

/// A stage that pipes its input through an external program
///
/// The input is written to the program's stdin and its stdout becomes the
/// output. A non-zero exit status fails the stage with the program's stderr.
#[derive(Debug, Clone)]
pub struct CommandStage {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandStage {
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
        }
    }

    fn failed(&self, message: impl Into<String>) -> CoreError {
        CoreError::stage_failed(&self.name, message)
    }
}

#[async_trait]
impl Stage for CommandStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: String, options: &Options) -> Result<Output> {
        let options_json = serde_json::to_string(options)
            .map_err(|e| self.failed(format!("cannot encode options: {}", e)))?;

        debug!(stage = %self.name, program = %self.program, "spawning command stage");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(OPTIONS_ENV, options_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.failed(format!("cannot start '{}': {}", self.program, e)))?;

        // Feed stdin while draining stdout so large inputs cannot deadlock
        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes()).await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failed(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        // A program may legitimately exit without reading all of its input
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| self.failed(format!("output is not UTF-8: {}", e)))?;
        Ok(Output::Text(stdout))
    }
}
