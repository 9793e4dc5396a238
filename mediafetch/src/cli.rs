use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use media_fetch::FetchConfig;
use media_fetch::config::parse_extra_args;

#[derive(Parser)]
#[command(name = "mediafetch")]
#[command(author, version, about = "Download video or audio with yt-dlp and convert it with ffmpeg")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub tools: ToolArgs,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Args)]
pub struct ToolArgs {
    /// yt-dlp binary (path or name on PATH)
    #[arg(long, env = "YTDLP_PATH", default_value = "yt-dlp", global = true)]
    pub ytdlp: PathBuf,

    /// ffmpeg binary (path or name on PATH)
    #[arg(long, env = "FFMPEG_PATH", default_value = "ffmpeg", global = true)]
    pub ffmpeg: PathBuf,

    /// Directory downloads and converted files are written to
    #[arg(short, long, env = "MEDIAFETCH_OUTPUT_DIR", default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// Kill a yt-dlp or ffmpeg run after this many seconds
    #[arg(long, env = "MEDIAFETCH_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Cookies file passed to yt-dlp
    #[arg(long, env = "MEDIAFETCH_COOKIES", global = true)]
    pub cookies: Option<PathBuf>,

    /// Extra yt-dlp arguments, whitespace separated, double quotes group
    #[arg(long, env = "MEDIAFETCH_EXTRA_ARGS", global = true, allow_hyphen_values = true)]
    pub extra_args: Option<String>
}

impl ToolArgs {
    pub fn to_config(&self) -> FetchConfig {
        FetchConfig::new()
            .ytdlp(&self.ytdlp)
            .ffmpeg(&self.ffmpeg)
            .output_dir(&self.output_dir)
            .timeout(self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs))
            .cookies_file(self.cookies.clone())
            .extra_args(self.extra_args.as_deref().map(parse_extra_args).unwrap_or_default())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a video, remuxing it into the requested container
    Video {
        /// Source URL
        url: String,

        /// Output container (default: mp4)
        #[arg(short, long)]
        format: Option<String>,

        /// Maximum video height (default: 720)
        #[arg(short, long)]
        resolution: Option<String>,

        /// Video codec to prefer (default: avc1)
        #[arg(short, long)]
        codec: Option<String>
    },

    /// Download audio and encode it
    Audio {
        /// Source URL
        url: String,

        /// Output format (default: mp3)
        #[arg(short, long)]
        format: Option<String>,

        /// ffmpeg audio codec (default: libmp3lame)
        #[arg(short, long)]
        codec: Option<String>,

        /// Audio bitrate (default: 128k)
        #[arg(short, long)]
        bitrate: Option<String>
    },

    /// Check that yt-dlp and ffmpeg are available
    CheckTools,

    /// Serve the HTTP API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8000")]
        port: u16
    }
}
