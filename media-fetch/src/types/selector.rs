/// A yt-dlp `-f` format selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSelector {
    BestAudio,
    /// Best video no taller than `max_height` whose codec contains `vcodec`,
    /// merged with the best audio, else the best combined stream.
    Constrained { max_height: String, vcodec: String }
}

impl FormatSelector {
    pub fn constrained(max_height: impl Into<String>, vcodec: impl Into<String>) -> Self {
        FormatSelector::Constrained {
            max_height: max_height.into(),
            vcodec: vcodec.into()
        }
    }

    pub fn as_arg(&self) -> String {
        match self {
            FormatSelector::BestAudio => "bestaudio".to_string(),
            FormatSelector::Constrained { max_height, vcodec } => {
                format!("bestvideo[height<={max_height}][vcodec*={vcodec}]+bestaudio/best")
            }
        }
    }
}
