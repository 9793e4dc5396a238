use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::error::ProcessError;

/// Captured output of a successful tool run.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String
}

/// Argument builder shared by the fetch and transcode invocations.
pub struct CommandBuilder {
    binary: PathBuf,
    args: Vec<String>
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    // yt-dlp

    pub fn url(self, url: impl Into<String>) -> Self {
        self.arg(url)
    }

    pub fn format(self, selector: impl Into<String>) -> Self {
        self.arg("-f").arg(selector)
    }

    pub fn output(self, template: impl AsRef<Path>) -> Self {
        self.arg("-o").arg(template.as_ref().to_string_lossy().to_string())
    }

    pub fn cookies_file(self, path: impl AsRef<Path>) -> Self {
        self.arg("--cookies").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn cookies_file_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self.cookies_file(p),
            None => self
        }
    }

    // ffmpeg

    pub fn input(self, path: impl AsRef<Path>) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn stream_copy(self) -> Self {
        self.arg("-c").arg("copy")
    }

    pub fn no_video(self) -> Self {
        self.arg("-vn")
    }

    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.arg("-acodec").arg(codec)
    }

    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.arg("-ab").arg(bitrate)
    }

    /// `-y` followed by the output path, always the final ffmpeg arguments.
    pub fn overwrite_output(self, path: impl AsRef<Path>) -> Self {
        self.arg("-y").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);
        cmd
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command to completion.
    ///
    /// The child is killed if `timeout` elapses, if `cancel` fires, or if the
    /// returned future is dropped.
    pub async fn run(
        &self,
        timeout: Option<Duration>,
        cancel: &CancellationToken
    ) -> Result<ToolOutput, ProcessError> {
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled {
                binary: self.binary.clone()
            });
        }

        tracing::debug!(
            binary = %self.binary.display(),
            args = ?self.args,
            "spawning tool"
        );

        let mut cmd = self.build();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            binary: self.binary.clone(),
            source
        })?;

        let deadline = async move {
            match timeout {
                Some(limit) => {
                    tokio::time::sleep(limit).await;
                    limit
                }
                None => std::future::pending().await
            }
        };

        let output = tokio::select! {
            result = child.wait_with_output() => result.map_err(|source| ProcessError::Spawn {
                binary: self.binary.clone(),
                source
            })?,
            () = cancel.cancelled() => {
                tracing::info!(binary = %self.binary.display(), "tool cancelled");
                return Err(ProcessError::Cancelled {
                    binary: self.binary.clone()
                });
            }
            limit = deadline => {
                tracing::warn!(binary = %self.binary.display(), ?limit, "tool timed out");
                return Err(ProcessError::TimedOut {
                    binary: self.binary.clone(),
                    timeout: limit
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        for line in stderr.lines() {
            tracing::trace!(binary = %self.binary.display(), line = %line, "tool stderr");
        }

        if !output.status.success() {
            return Err(ProcessError::Exited {
                binary: self.binary.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string()
            });
        }

        Ok(ToolOutput { stdout })
    }
}
