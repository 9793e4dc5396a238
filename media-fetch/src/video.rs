use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::client::MediaFetch;
use crate::error::Result;
use crate::template::{OutputTemplate, VIDEO_EXTENSIONS, absolute, remove_intermediate};
use crate::types::VideoRequest;

/// Downloads a video and remuxes it into the requested container if needed.
#[derive(Debug, Clone)]
pub struct VideoFetcher {
    client: MediaFetch
}

impl VideoFetcher {
    pub fn new(client: MediaFetch) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, request: &VideoRequest) -> Result<PathBuf> {
        self.fetch_with_cancel(request, &CancellationToken::new()).await
    }

    /// Fetches `request.url` and returns the absolute path of the result.
    ///
    /// When yt-dlp already produced the requested container the file is
    /// returned as is; otherwise it is stream-copied by ffmpeg and the
    /// download removed. Nothing is cleaned up on failure.
    #[tracing::instrument(skip(self, request, cancel), fields(url = %request.url))]
    pub async fn fetch_with_cancel(
        &self,
        request: &VideoRequest,
        cancel: &CancellationToken
    ) -> Result<PathBuf> {
        let format = request.effective_format();
        let template = OutputTemplate::new(&self.client.config().output_dir, "video");
        tracing::debug!(stem = template.stem(), "fetching video");

        self.client
            .download(&request.url, &request.selector(), &template.template(), cancel)
            .await?;

        let (downloaded, ext) = template.find_downloaded(VIDEO_EXTENSIONS).await?;

        if ext.eq_ignore_ascii_case(format) {
            tracing::info!(path = %downloaded.display(), "video downloaded");
            return absolute(&downloaded);
        }

        let output = template.with_extension(format);
        tracing::debug!(from = ext, to = format, "remuxing video");
        self.client.remux(&downloaded, &output, cancel).await?;
        remove_intermediate(&downloaded).await;

        tracing::info!(path = %output.display(), "video downloaded");
        absolute(&output)
    }
}
