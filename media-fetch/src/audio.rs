use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::client::MediaFetch;
use crate::error::{Error, Result};
use crate::template::{AUDIO_EXTENSIONS, OutputTemplate, absolute, remove_intermediate};
use crate::types::{AudioRequest, FormatSelector};

/// Downloads the best audio stream and always re-encodes it with ffmpeg.
#[derive(Debug, Clone)]
pub struct AudioFetcher {
    client: MediaFetch
}

impl AudioFetcher {
    pub fn new(client: MediaFetch) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, request: &AudioRequest) -> Result<PathBuf> {
        self.fetch_with_cancel(request, &CancellationToken::new()).await
    }

    #[tracing::instrument(skip(self, request, cancel), fields(url = %request.url))]
    pub async fn fetch_with_cancel(
        &self,
        request: &AudioRequest,
        cancel: &CancellationToken
    ) -> Result<PathBuf> {
        let template = OutputTemplate::new(&self.client.config().output_dir, "audio");
        tracing::debug!(stem = template.stem(), "fetching audio");

        self.client
            .download(&request.url, &FormatSelector::BestAudio, &template.template(), cancel)
            .await?;

        let (mut source, ext) = template.find_downloaded(AUDIO_EXTENSIONS).await?;
        let output = template.with_extension(request.effective_format());

        // ffmpeg cannot read and overwrite the same file.
        if source == output {
            let aside = template.with_extension(&format!("source.{ext}"));
            tokio::fs::rename(&source, &aside)
                .await
                .map_err(|e| Error::Io {
                    path: source.clone(),
                    source: e
                })?;
            source = aside;
        }

        tracing::debug!(
            from = ext,
            to = request.effective_format(),
            codec = request.effective_codec(),
            bitrate = request.effective_bitrate(),
            "encoding audio"
        );
        self.client
            .encode_audio(
                &source,
                &output,
                request.effective_codec(),
                request.effective_bitrate(),
                cancel
            )
            .await?;
        remove_intermediate(&source).await;

        tracing::info!(path = %output.display(), "audio downloaded");
        absolute(&output)
    }
}
