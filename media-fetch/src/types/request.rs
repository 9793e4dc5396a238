use serde::Deserialize;

use super::FormatSelector;

pub const DEFAULT_VIDEO_FORMAT: &str = "mp4";
pub const DEFAULT_RESOLUTION: &str = "720";
pub const DEFAULT_VIDEO_CODEC: &str = "avc1";

pub const DEFAULT_AUDIO_FORMAT: &str = "mp3";
pub const DEFAULT_AUDIO_CODEC: &str = "libmp3lame";
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";

/// Absent and empty values both fall back to the default.
fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => default
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoRequest {
    pub url: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub codec: Option<String>
}

impl VideoRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    /// Target container extension.
    pub fn effective_format(&self) -> &str {
        or_default(self.format.as_deref(), DEFAULT_VIDEO_FORMAT)
    }

    /// Maximum video height.
    pub fn effective_resolution(&self) -> &str {
        or_default(self.resolution.as_deref(), DEFAULT_RESOLUTION)
    }

    /// Substring the video codec must contain.
    pub fn effective_codec(&self) -> &str {
        or_default(self.codec.as_deref(), DEFAULT_VIDEO_CODEC)
    }

    pub fn selector(&self) -> FormatSelector {
        FormatSelector::constrained(self.effective_resolution(), self.effective_codec())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioRequest {
    pub url: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub bitrate: Option<String>
}

impl AudioRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    pub fn bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.bitrate = Some(bitrate.into());
        self
    }

    pub fn effective_format(&self) -> &str {
        or_default(self.format.as_deref(), DEFAULT_AUDIO_FORMAT)
    }

    pub fn effective_codec(&self) -> &str {
        or_default(self.codec.as_deref(), DEFAULT_AUDIO_CODEC)
    }

    pub fn effective_bitrate(&self) -> &str {
        or_default(self.bitrate.as_deref(), DEFAULT_AUDIO_BITRATE)
    }
}
