mod cli;
mod error;
mod handlers;
mod state;

use anyhow::{Context, bail};
use clap::Parser;
use media_fetch::{AudioRequest, CancellationToken, MediaFetch, VideoRequest};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "mediafetch=debug,media_fetch=debug,tower_http=debug"
    } else {
        "mediafetch=info,media_fetch=info,tower_http=debug"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into())
        )
        .init();

    let client = MediaFetch::new(cli.tools.to_config());

    match cli.command {
        Commands::Video {
            url,
            format,
            resolution,
            codec
        } => {
            let request = VideoRequest {
                url,
                format,
                resolution,
                codec
            };
            let token = CancellationToken::new();
            let path = cancel_on_interrupt(&token, client.video().fetch_with_cancel(&request, &token))
                .await
                .context("video fetch failed")?;
            println!("{}", path.display());
        }
        Commands::Audio {
            url,
            format,
            codec,
            bitrate
        } => {
            let request = AudioRequest {
                url,
                format,
                codec,
                bitrate
            };
            let token = CancellationToken::new();
            let path = cancel_on_interrupt(&token, client.audio().fetch_with_cancel(&request, &token))
                .await
                .context("audio fetch failed")?;
            println!("{}", path.display());
        }
        Commands::CheckTools => check_tools(&client).await?,
        Commands::Serve { host, port } => serve(client, &host, port).await?
    }

    Ok(())
}

/// Cancels `token` on Ctrl+C while `fut` runs.
async fn cancel_on_interrupt<F: Future>(token: &CancellationToken, fut: F) -> F::Output {
    let watcher = tokio::spawn({
        let token = token.clone();
        async move {
            if signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received, cancelling");
                token.cancel();
            }
        }
    });

    let output = fut.await;
    watcher.abort();
    output
}

async fn check_tools(client: &MediaFetch) -> anyhow::Result<()> {
    let status = client.check_tools().await;

    for (name, result) in [("yt-dlp", &status.ytdlp), ("ffmpeg", &status.ffmpeg)] {
        match result {
            Ok(version) => println!("✓ {name} ({version})"),
            Err(e) => println!("✗ {name} - {e}")
        }
    }

    if !status.all_available() {
        bail!("required tools are missing");
    }
    Ok(())
}

async fn serve(client: MediaFetch, host: &str, port: u16) -> anyhow::Result<()> {
    let status = client.check_tools().await;
    match &status.ytdlp {
        Ok(version) => tracing::info!("yt-dlp version: {}", version),
        Err(e) => tracing::warn!("yt-dlp not found or not executable: {}", e)
    }
    match &status.ffmpeg {
        Ok(version) => tracing::info!("ffmpeg version: {}", version),
        Err(e) => tracing::warn!("ffmpeg not found or not executable: {}", e)
    }

    tracing::info!("Writing files to {}", client.config().output_dir.display());

    let app = handlers::router(AppState::new(client));

    let addr = format!("{host}:{port}");
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
