use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::audio::AudioFetcher;
use crate::command::CommandBuilder;
use crate::config::FetchConfig;
use crate::error::{Error, ProcessError, Result};
use crate::types::{AudioRequest, FormatSelector, VideoRequest};
use crate::video::VideoFetcher;

/// Runs yt-dlp and ffmpeg with one [`FetchConfig`].
#[derive(Debug, Clone, Default)]
pub struct MediaFetch {
    config: FetchConfig
}

/// Result of probing both tools for their versions.
#[derive(Debug)]
pub struct ToolStatus {
    pub ytdlp: std::result::Result<String, ProcessError>,
    pub ffmpeg: std::result::Result<String, ProcessError>
}

impl ToolStatus {
    pub fn all_available(&self) -> bool {
        self.ytdlp.is_ok() && self.ffmpeg.is_ok()
    }
}

impl MediaFetch {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn video(&self) -> VideoFetcher {
        VideoFetcher::new(self.clone())
    }

    pub fn audio(&self) -> AudioFetcher {
        AudioFetcher::new(self.clone())
    }

    pub async fn fetch_video(&self, request: &VideoRequest) -> Result<std::path::PathBuf> {
        self.video().fetch(request).await
    }

    pub async fn fetch_audio(&self, request: &AudioRequest) -> Result<std::path::PathBuf> {
        self.audio().fetch(request).await
    }

    pub async fn ytdlp_version(&self) -> std::result::Result<String, ProcessError> {
        let output = CommandBuilder::new(&self.config.ytdlp)
            .arg("--version")
            .run(Some(self.config.version_timeout), &CancellationToken::new())
            .await?;
        Ok(output.stdout.trim().to_string())
    }

    /// First line of `ffmpeg -version`.
    pub async fn ffmpeg_version(&self) -> std::result::Result<String, ProcessError> {
        let output = CommandBuilder::new(&self.config.ffmpeg)
            .arg("-version")
            .run(Some(self.config.version_timeout), &CancellationToken::new())
            .await?;
        Ok(output.stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    pub async fn check_tools(&self) -> ToolStatus {
        let (ytdlp, ffmpeg) = tokio::join!(self.ytdlp_version(), self.ffmpeg_version());
        ToolStatus { ytdlp, ffmpeg }
    }

    pub(crate) async fn download(
        &self,
        url: &str,
        selector: &FormatSelector,
        template: &Path,
        cancel: &CancellationToken
    ) -> Result<()> {
        // A leading '-' would be read by yt-dlp as an option.
        let trimmed = url.trim();
        if trimmed.is_empty() || trimmed.starts_with('-') {
            return Err(Error::InvalidUrl(url.to_string()));
        }

        self.ytdlp_command()
            .format(selector.as_arg())
            .output(template)
            .url(url)
            .run(self.config.timeout, cancel)
            .await
            .map_err(Error::FetchFailed)?;
        Ok(())
    }

    /// Changes the container without re-encoding.
    pub(crate) async fn remux(
        &self,
        input: &Path,
        output: &Path,
        cancel: &CancellationToken
    ) -> Result<()> {
        CommandBuilder::new(&self.config.ffmpeg)
            .input(input)
            .stream_copy()
            .overwrite_output(output)
            .run(self.config.timeout, cancel)
            .await
            .map_err(Error::ConvertFailed)?;
        Ok(())
    }

    /// Drops any video stream and re-encodes the audio.
    pub(crate) async fn encode_audio(
        &self,
        input: &Path,
        output: &Path,
        codec: &str,
        bitrate: &str,
        cancel: &CancellationToken
    ) -> Result<()> {
        CommandBuilder::new(&self.config.ffmpeg)
            .input(input)
            .no_video()
            .audio_codec(codec)
            .audio_bitrate(bitrate)
            .overwrite_output(output)
            .run(self.config.timeout, cancel)
            .await
            .map_err(Error::ConvertFailed)?;
        Ok(())
    }

    fn ytdlp_command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.config.ytdlp)
            .cookies_file_opt(self.config.cookies_file.as_ref())
            .args(self.config.extra_args.iter().map(String::as_str))
    }
}
