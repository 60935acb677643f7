//! 헬스 체크 endpoint.
//!
//! 호스팅 플랫폼이 프로세스 생존 여부를 확인할 때 사용합니다. 명령어 처리와
//! 독립적으로 동작합니다.

use std::net::SocketAddr;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 상태 확인 응답 본문.
pub const LIVENESS_BODY: &str = "Gold Bot is running ✅";

/// 상태 확인 핸들러.
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_BODY)
}

/// liveness 라우터 생성.
pub fn router() -> Router {
    Router::new()
        .route("/", get(liveness))
        .layer(TraceLayer::new_for_http())
}

/// `0.0.0.0:{port}`에 리스너를 바인딩합니다.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Web server listening");
    Ok(listener)
}

/// 바인딩된 리스너로 liveness 서버를 실행합니다.
///
/// `shutdown`이 취소되면 종료합니다.
pub async fn serve(listener: TcpListener, shutdown: CancellationToken) -> std::io::Result<()> {
    axum::serve(listener, router())
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_liveness_returns_ok() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], LIVENESS_BODY.as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_path_not_found() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bind_fails_on_occupied_port() {
        let taken = bind(0).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        assert!(bind(port).await.is_err());
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let listener = bind(0).await.unwrap();
        let shutdown = CancellationToken::new();
        let server = tokio::spawn(serve(listener, shutdown.clone()));

        shutdown.cancel();
        server.await.unwrap().unwrap();
    }
}
