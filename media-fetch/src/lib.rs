//! Fetch video or audio with yt-dlp and convert it with ffmpeg.
//!
//! Both operations return the absolute path of the finished file. Files are
//! written to [`FetchConfig::output_dir`] under a per-call unique name.
//!
//! # Example
//!
//! ```no_run
//! use media_fetch::{AudioRequest, FetchConfig, MediaFetch, VideoRequest};
//!
//! #[tokio::main]
//! async fn main() -> media_fetch::Result<()> {
//!     let client = MediaFetch::new(FetchConfig::new().output_dir("/srv/media"));
//!
//!     let video = client
//!         .fetch_video(&VideoRequest::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ").resolution("1080"))
//!         .await?;
//!     println!("video: {}", video.display());
//!
//!     let audio = client
//!         .fetch_audio(&AudioRequest::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ"))
//!         .await?;
//!     println!("audio: {}", audio.display());
//!
//!     Ok(())
//! }
//! ```

mod audio;
mod client;
mod command;
pub mod config;
pub mod error;
mod template;
pub mod types;
mod video;

#[cfg(all(test, unix))]
mod test_support;

pub use audio::AudioFetcher;
pub use client::{MediaFetch, ToolStatus};
pub use config::FetchConfig;
pub use error::{Error, ProcessError, Result};
pub use template::{AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};
pub use tokio_util::sync::CancellationToken;
pub use types::{AudioRequest, FormatSelector, VideoRequest};
pub use video::VideoFetcher;
