use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub use photoshare_shared::HttpMethod;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// multipart 表单中的一项
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// multipart/form-data 请求体
///
/// 保持字段顺序，boundary 由具体的客户端实现生成。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts
            .push((name.to_string(), FormPart::Text(value.into())));
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.parts.push((
            name.to_string(),
            FormPart::File {
                file_name: file_name.to_string(),
                content_type: content_type.to_string(),
                bytes,
            },
        ));
        self
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(key, part)| match part {
            FormPart::Text(v) if key == name => Some(v.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(String),
    Multipart(MultipartForm),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(RequestBody::Json(body.to_string()));
        self
    }

    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// 非 2xx 响应转换为 [`ApiError`]
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_response(self.status, &self.body))
        }
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器 fetch 返回的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 只有请求未能完成时才返回错误，非 2xx 状态码照常返回
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> HttpClient for &C {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
}

#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    // ("METHOD URL", 依次返回的 (Status, Body))，最后一个会一直重复
    responses: RefCell<HashMap<String, VecDeque<(u16, String)>>>,
    failures: RefCell<Vec<String>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), VecDeque::from([(status, body.to_string())]));
    }

    /// 同一个请求依次返回不同的响应
    pub fn mock_sequence(&self, method: HttpMethod, url: &str, replies: Vec<(u16, serde_json::Value)>) {
        let queue = replies
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), queue);
    }

    /// 模拟网络故障
    pub fn mock_network_error(&self, method: HttpMethod, url: &str) {
        self.failures.borrow_mut().push(Self::key(method, url));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn count(&self, method: HttpMethod, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: req.method,
            url: req.url.clone(),
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        let key = Self::key(req.method, &req.url);
        if self.failures.borrow().contains(&key) {
            return Err(ApiError::network(format!("connection refused: {}", req.url)));
        }

        let mut responses = self.responses.borrow_mut();
        let reply = responses.get_mut(&key).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });

        Ok(match reply {
            Some((status, body)) => HttpResponse { status, body },
            None => HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            },
        })
    }
}

// =========================================================
// 测试工具: ReqwestHttpClient (真实网络)
// =========================================================

#[cfg(test)]
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(test)]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        match req.body {
            Some(RequestBody::Json(body)) => builder = builder.body(body),
            Some(RequestBody::Multipart(form)) => {
                let mut multipart = reqwest::multipart::Form::new();
                for (name, part) in form.parts {
                    multipart = match part {
                        FormPart::Text(value) => multipart.text(name, value),
                        FormPart::File {
                            file_name,
                            content_type,
                            bytes,
                        } => {
                            let part = reqwest::multipart::Part::bytes(bytes)
                                .file_name(file_name)
                                .mime_str(&content_type)
                                .map_err(|e| ApiError::invalid_input(e.to_string()))?;
                            multipart.part(name, part)
                        }
                    };
                }
                builder = builder.multipart(multipart);
            }
            None => {}
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::network(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn mock_replays_sequence_then_repeats_last() {
        let client = MockHttpClient::new();
        client.mock_sequence(
            HttpMethod::Get,
            "http://api.test/x",
            vec![(200, json!({ "n": 1 })), (200, json!({ "n": 2 }))],
        );

        let mut seen = Vec::new();
        for _ in 0..3 {
            let resp = client
                .send(HttpRequest::new("http://api.test/x", HttpMethod::Get))
                .await
                .unwrap();
            seen.push(resp.json::<serde_json::Value>().unwrap()["n"].as_i64().unwrap());
        }
        assert_eq!(seen, vec![1, 2, 2]);
        assert_eq!(client.count(HttpMethod::Get, "http://api.test/x"), 3);
    }

    #[tokio::test]
    async fn unmocked_route_is_404_and_network_errors_surface() {
        let client = MockHttpClient::new();
        let resp = client
            .send(HttpRequest::new("http://api.test/missing", HttpMethod::Get))
            .await
            .unwrap();
        let err = resp.error_for_status().unwrap_err();
        assert!(err.is_not_found());

        client.mock_network_error(HttpMethod::Post, "http://api.test/down");
        let err = client
            .send(HttpRequest::new("http://api.test/down", HttpMethod::Post))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Network);
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::new("http://api.test/ratings/p1", HttpMethod::Post)
            .with_json(json!({ "value": 4 }));
        assert_eq!(req.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(req.body, Some(RequestBody::Json(r#"{"value":4}"#.to_string())));
    }

    #[test]
    fn multipart_keeps_field_order() {
        let form = MultipartForm::new()
            .file("image", "a.png", "image/png", vec![1, 2, 3])
            .text("title", "Sunset")
            .text("enableAI", "true");
        let names: Vec<_> = form.parts.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["image", "title", "enableAI"]);
        assert_eq!(form.get_text("title"), Some("Sunset"));
        assert_eq!(form.get_text("image"), None);
    }
}
