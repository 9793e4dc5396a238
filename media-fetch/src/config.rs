use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Tool locations and execution settings shared by the fetchers.
///
/// Each fetcher owns its own copy, so differently configured fetchers can run
/// side by side.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub ytdlp: PathBuf,
    pub ffmpeg: PathBuf,
    pub output_dir: PathBuf,
    pub timeout: Option<Duration>,
    /// Bound for `--version` checks, independent of `timeout`.
    pub version_timeout: Duration,
    pub cookies_file: Option<PathBuf>,
    pub extra_args: Vec<String>
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self {
            ytdlp: PathBuf::from("yt-dlp"),
            ffmpeg: PathBuf::from("ffmpeg"),
            output_dir: PathBuf::from("."),
            timeout: None,
            version_timeout: DEFAULT_VERSION_TIMEOUT,
            cookies_file: None,
            extra_args: Vec::new()
        }
    }

    pub fn ytdlp(mut self, path: impl Into<PathBuf>) -> Self {
        self.ytdlp = path.into();
        self
    }

    pub fn ffmpeg(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg = path.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Upper bound for each individual tool run, not for the whole fetch.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn version_timeout(mut self, timeout: Duration) -> Self {
        self.version_timeout = timeout;
        self
    }

    pub fn cookies_file(mut self, path: Option<PathBuf>) -> Self {
        self.cookies_file = path;
        self
    }

    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

/// Splits a user-supplied argument string on whitespace, keeping
/// double-quoted segments together.
pub fn parse_extra_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.ytdlp, PathBuf::from("yt-dlp"));
        assert_eq!(config.ffmpeg, PathBuf::from("ffmpeg"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.timeout.is_none());
        assert_eq!(config.version_timeout, Duration::from_secs(10));
        assert!(config.cookies_file.is_none());
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = FetchConfig::new()
            .ytdlp("/opt/yt-dlp")
            .ffmpeg("/usr/local/bin/ffmpeg")
            .output_dir("/srv/media")
            .timeout(Some(Duration::from_secs(600)));
        assert_eq!(config.ytdlp, PathBuf::from("/opt/yt-dlp"));
        assert_eq!(config.ffmpeg, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/media"));
        assert_eq!(config.timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_parse_extra_args() {
        assert_eq!(
            parse_extra_args("--extractor-args youtube:player-client=mweb"),
            vec!["--extractor-args", "youtube:player-client=mweb"]
        );
        assert_eq!(
            parse_extra_args(r#"--user-agent "Mozilla/5.0 (X11)"  --no-part"#),
            vec!["--user-agent", "Mozilla/5.0 (X11)", "--no-part"]
        );
        assert_eq!(parse_extra_args(r#"--referer """#), vec!["--referer", ""]);
        assert!(parse_extra_args("   ").is_empty());
    }
}
