use axum::{Json, extract::State};
use media_fetch::{AudioRequest, VideoRequest};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub path: String
}

#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub ytdlp: Option<String>,
    pub ffmpeg: Option<String>
}

#[tracing::instrument(skip(state, request), fields(url = %request.url))]
pub async fn fetch_video(
    State(state): State<AppState>,
    Json(request): Json<VideoRequest>
) -> Result<Json<FetchResponse>, AppError> {
    tracing::info!("Fetching video");
    let path = state.client.fetch_video(&request).await?;
    Ok(Json(FetchResponse {
        path: path.to_string_lossy().to_string()
    }))
}

#[tracing::instrument(skip(state, request), fields(url = %request.url))]
pub async fn fetch_audio(
    State(state): State<AppState>,
    Json(request): Json<AudioRequest>
) -> Result<Json<FetchResponse>, AppError> {
    tracing::info!("Fetching audio");
    let path = state.client.fetch_audio(&request).await?;
    Ok(Json(FetchResponse {
        path: path.to_string_lossy().to_string()
    }))
}

pub async fn tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    let status = state.client.check_tools().await;

    if let Err(e) = &status.ytdlp {
        tracing::warn!("yt-dlp not available: {}", e);
    }
    if let Err(e) = &status.ffmpeg {
        tracing::warn!("ffmpeg not available: {}", e);
    }

    Json(ToolsResponse {
        ytdlp: status.ytdlp.ok(),
        ffmpeg: status.ffmpeg.ok()
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode}
    };
    use http_body_util::BodyExt;
    use media_fetch::{FetchConfig, MediaFetch};
    use tower::ServiceExt;

    use crate::handlers::router;
    use crate::state::AppState;

    fn app(config: FetchConfig) -> axum::Router {
        router(AppState::new(MediaFetch::new(config)))
    }

    fn missing_tools() -> FetchConfig {
        FetchConfig::new()
            .ytdlp("nonexistent_tool_xyz_12345")
            .ffmpeg("nonexistent_tool_xyz_67890")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_url_is_bad_request() {
        let response = app(missing_tools())
            .oneshot(post_json("/api/video", r#"{"url": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("invalid URL"));
    }

    #[tokio::test]
    async fn test_option_like_url_is_bad_request() {
        for uri in ["/api/video", "/api/audio"] {
            let response = app(missing_tools())
                .oneshot(post_json(uri, r#"{"url": "--batch-file=/etc/hosts"}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = json_body(response).await;
            assert!(body["error"].as_str().unwrap().contains("--batch-file"));
        }
    }

    #[tokio::test]
    async fn test_missing_fetch_tool_is_unavailable() {
        let response = app(missing_tools())
            .oneshot(post_json("/api/audio", r#"{"url": "https://example.com/a"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_tools_reports_missing_binaries() {
        let response = app(missing_tools())
            .oneshot(Request::builder().uri("/api/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["ytdlp"].is_null());
        assert!(body["ffmpeg"].is_null());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_video_returns_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("yt-dlp");
        // -f <selector> -o <template> <url>
        std::fs::write(
            &script,
            "#!/bin/sh\nprintf 'x' > \"$(printf '%s' \"$4\" | sed 's/%(ext)s$/mp4/')\"\n"
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = missing_tools().ytdlp(&script).output_dir(dir.path());
        let response = app(config)
            .oneshot(post_json(
                "/api/video",
                r#"{"url": "https://example.com/v", "format": "mp4", "resolution": ""}"#
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let path = body["path"].as_str().unwrap();
        assert!(path.starts_with(&*dir.path().to_string_lossy()));
        assert!(path.ends_with(".mp4"));
    }
}
