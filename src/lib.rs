//! PhotoShare 客户端核心
//!
//! 与平台无关的部分：HTTP 抽象、类型化 API、会话管理以及各页面的数据加载流程。
//! 浏览器端的实现（fetch、LocalStorage、组件）位于 `frontend` crate。

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod page;
pub mod request;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::{ImageFile, PhotoShareApi};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use fetch::{LoadTicket, LoadTracker, ViewState};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::{Credentials, Session, SessionStore};

pub use photoshare_shared as shared;

// =========================================================
// 端到端测试：真实 HTTP 传输
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ReqwestHttpClient;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    const TOKEN: &str = "e2e-token";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("photoshare=debug")
            .with_test_writer()
            .try_init();
    }

    async fn trending() -> Json<Value> {
        Json(json!({
            "data": [
                { "_id": "p1", "title": "Dunes", "blobUrl": "https://cdn/p1.jpg", "viewCount": 3 },
                { "title": "orphan", "blobUrl": "https://cdn/x.jpg" }
            ]
        }))
    }

    async fn create_comment(
        Path(photo_id): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if bearer != Some(format!("Bearer {}", TOKEN).as_str()) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Missing token" })));
        }
        match body["content"].as_str() {
            Some(content) if photo_id == "p1" => (
                StatusCode::CREATED,
                Json(json!({
                    "data": {
                        "_id": "c1",
                        "content": content,
                        "userDisplayName": "Ann",
                        "sentiment": "positive"
                    }
                })),
            ),
            _ => (StatusCode::BAD_REQUEST, Json(json!({ "error": "Bad body" }))),
        }
    }

    async fn not_found() -> (StatusCode, Json<Value>) {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Photo not found" })))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/api/photos/trending", get(trending))
            .route("/api/comments/{photo_id}", post(create_comment))
            .fallback(not_found);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    #[tokio::test]
    async fn reqwest_transport_end_to_end() {
        init_tracing();
        let base = spawn_server().await;
        let config = ClientConfig::with_api_base(&base).unwrap();
        let api = PhotoShareApi::new(ReqwestHttpClient::new(), &config);

        // 没有 `_id` 的记录被跳过，其余照常返回
        let trending = api.photos().trending().await.unwrap();
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].display_title(), "Dunes");
        assert_eq!(trending[0].view_count, 3);

        let err = api.photos().get("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message, "Photo not found");

        let err = api.comments().create("p1", "hello").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Unauthorized);

        let authed = api.authorized(TOKEN);
        let comment = authed.comments().create("p1", "hello").await.unwrap();
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.content, "hello");
        assert_eq!(comment.sentiment_emoji(), Some("😊"));
    }
}
