use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse, MultipartForm};
use photoshare_shared::{
    AuthPayload, Comment, CommentRequest, Endpoint, HEADER_AUTHORIZATION, LoginRequest, NewPhoto,
    Photo, RateRequest, RatingSummary, RegisterRequest, User, UserRating, UserStats,
    unwrap_envelope,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

// =========================================================
// 上传文件
// =========================================================

/// 用户选择的图片文件
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

// =========================================================
// 客户端入口
// =========================================================

/// 远程 API 的类型化封装
///
/// 所有响应均从 `{ data }` 信封中解出；只做一次请求，不重试、不缓存。
#[derive(Clone)]
pub struct PhotoShareApi<C> {
    client: C,
    base: Url,
    token: Option<String>,
}

impl<C: HttpClient> PhotoShareApi<C> {
    pub fn new(client: C, config: &ClientConfig) -> Self {
        Self {
            client,
            base: config.api_base.clone(),
            token: None,
        }
    }

    /// 借用同一个底层客户端，之后每个请求都带上 `Authorization: Bearer <token>`
    pub fn authorized(&self, token: &str) -> PhotoShareApi<&C> {
        PhotoShareApi {
            client: &self.client,
            base: self.base.clone(),
            token: Some(token.to_string()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn photos(&self) -> PhotoApi<'_, C> {
        PhotoApi { api: self }
    }

    pub fn comments(&self) -> CommentApi<'_, C> {
        CommentApi { api: self }
    }

    pub fn ratings(&self) -> RatingApi<'_, C> {
        RatingApi { api: self }
    }

    pub fn users(&self) -> UserApi<'_, C> {
        UserApi { api: self }
    }

    pub fn auth(&self) -> AuthApi<'_, C> {
        AuthApi { api: self }
    }

    /// 拼接端点的完整 URL，路径段与查询参数都会被转义
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        let query = endpoint.query();
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url.into()
    }

    fn request(&self, endpoint: &Endpoint) -> HttpRequest {
        let req = HttpRequest::new(&self.url_for(endpoint), endpoint.method());
        match &self.token {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn dispatch(&self, endpoint: &Endpoint, req: HttpRequest) -> ApiResult<HttpResponse> {
        tracing::debug!(%endpoint, "api request");
        let resp = self.client.send(req).await.inspect_err(|e| {
            tracing::warn!(%endpoint, error = %e, "api request did not complete");
        })?;
        resp.error_for_status().inspect_err(|e| {
            tracing::debug!(%endpoint, status = ?e.status, error = %e, "api request rejected");
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<Option<T>> {
        let resp = self.dispatch(&endpoint, self.request(&endpoint)).await?;
        decode(&resp)
    }

    async fn post_json<B, T>(&self, endpoint: Endpoint, body: &B) -> ApiResult<Option<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let req = self.request(&endpoint).with_json(serde_json::to_value(body)?);
        let resp = self.dispatch(&endpoint, req).await?;
        decode(&resp)
    }

    async fn send_only(&self, endpoint: Endpoint, req: HttpRequest) -> ApiResult<()> {
        self.dispatch(&endpoint, req).await.map(|_| ())
    }
}

/// 空响应体或 `data: null` 解码为 `None`
fn decode<T: DeserializeOwned>(resp: &HttpResponse) -> ApiResult<Option<T>> {
    if resp.body.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = resp.json()?;
    Ok(unwrap_envelope(value)
        .map(serde_json::from_value)
        .transpose()?)
}

/// 丢弃没有 `_id` 的照片，无法为它们生成链接
fn identified(photos: Option<Vec<Photo>>) -> Vec<Photo> {
    let mut photos = photos.unwrap_or_default();
    let before = photos.len();
    photos.retain(|p| !p.id.trim().is_empty());
    if photos.len() < before {
        tracing::warn!(skipped = before - photos.len(), "photos without id dropped");
    }
    photos
}

fn required<T>(value: Option<T>, what: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::decode(format!("Response is missing {}", what)))
}

// =========================================================
// photos
// =========================================================

pub struct PhotoApi<'a, C> {
    api: &'a PhotoShareApi<C>,
}

impl<C: HttpClient> PhotoApi<'_, C> {
    pub async fn list(&self, page: u32, page_size: u32) -> ApiResult<Vec<Photo>> {
        let photos = self
            .api
            .get(Endpoint::ListPhotos { page, page_size })
            .await?;
        Ok(identified(photos))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Photo> {
        required(self.api.get(Endpoint::Photo(id.to_string())).await?, "photo")
    }

    pub async fn by_creator(&self, creator_id: &str) -> ApiResult<Vec<Photo>> {
        let photos = self
            .api
            .get(Endpoint::PhotosByCreator(creator_id.to_string()))
            .await?;
        Ok(identified(photos))
    }

    pub async fn trending(&self) -> ApiResult<Vec<Photo>> {
        Ok(identified(self.api.get(Endpoint::TrendingPhotos).await?))
    }

    pub async fn search(&self, query: &str) -> ApiResult<Vec<Photo>> {
        Ok(identified(
            self.api
                .get(Endpoint::SearchPhotos(query.to_string()))
                .await?,
        ))
    }

    /// multipart 上传，`people` 原样发送
    pub async fn create(&self, photo: &NewPhoto, image: ImageFile) -> ApiResult<()> {
        let form = MultipartForm::new()
            .file("image", &image.name, &image.content_type, image.bytes)
            .text("title", photo.title.as_str())
            .text("caption", photo.caption.as_str())
            .text("location", photo.location.as_str())
            .text("people", photo.people.as_str())
            .text("enableAI", photo.enable_ai.to_string());

        let endpoint = Endpoint::CreatePhoto;
        let req = self.api.request(&endpoint).with_multipart(form);
        self.api.send_only(endpoint, req).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let endpoint = Endpoint::DeletePhoto(id.to_string());
        let req = self.api.request(&endpoint);
        self.api.send_only(endpoint, req).await
    }
}

// =========================================================
// comments
// =========================================================

pub struct CommentApi<'a, C> {
    api: &'a PhotoShareApi<C>,
}

impl<C: HttpClient> CommentApi<'_, C> {
    pub async fn list(&self, photo_id: &str) -> ApiResult<Vec<Comment>> {
        Ok(self
            .api
            .get(Endpoint::Comments(photo_id.to_string()))
            .await?
            .unwrap_or_default())
    }

    pub async fn create(&self, photo_id: &str, content: &str) -> ApiResult<Comment> {
        let body = CommentRequest {
            content: content.to_string(),
        };
        let created = self
            .api
            .post_json(Endpoint::CreateComment(photo_id.to_string()), &body)
            .await?;
        required(created, "comment")
    }
}

// =========================================================
// ratings
// =========================================================

pub struct RatingApi<'a, C> {
    api: &'a PhotoShareApi<C>,
}

impl<C: HttpClient> RatingApi<'_, C> {
    pub async fn summary(&self, photo_id: &str) -> ApiResult<RatingSummary> {
        Ok(self
            .api
            .get(Endpoint::RatingSummary(photo_id.to_string()))
            .await?
            .unwrap_or_default())
    }

    /// 当前用户的评分，未评分时 `value` 为 0
    pub async fn mine(&self, photo_id: &str) -> ApiResult<UserRating> {
        Ok(self
            .api
            .get(Endpoint::MyRating(photo_id.to_string()))
            .await?
            .unwrap_or_default())
    }

    pub async fn rate(&self, photo_id: &str, value: u8) -> ApiResult<()> {
        self.api
            .post_json::<_, serde_json::Value>(
                Endpoint::RatePhoto(photo_id.to_string()),
                &RateRequest { value },
            )
            .await
            .map(|_| ())
    }
}

// =========================================================
// users / auth
// =========================================================

pub struct UserApi<'a, C> {
    api: &'a PhotoShareApi<C>,
}

impl<C: HttpClient> UserApi<'_, C> {
    pub async fn creators(&self) -> ApiResult<Vec<User>> {
        Ok(self
            .api
            .get(Endpoint::Creators)
            .await?
            .unwrap_or_default())
    }

    /// 兼容 `{ data: stats }` 与裸对象两种响应
    pub async fn my_stats(&self) -> ApiResult<UserStats> {
        Ok(self.api.get(Endpoint::MyStats).await?.unwrap_or_default())
    }

    pub async fn me(&self) -> ApiResult<User> {
        required(self.api.get(Endpoint::Me).await?, "user")
    }
}

pub struct AuthApi<'a, C> {
    api: &'a PhotoShareApi<C>,
}

impl<C: HttpClient> AuthApi<'_, C> {
    pub async fn login(&self, body: &LoginRequest) -> ApiResult<AuthPayload> {
        required(self.api.post_json(Endpoint::Login, body).await?, "session")
    }

    pub async fn register(&self, body: &RegisterRequest) -> ApiResult<AuthPayload> {
        required(self.api.post_json(Endpoint::Register, body).await?, "session")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::request::{FormPart, HttpMethod, MockHttpClient, RequestBody};
    use crate::testing::{mock_api, photo_json, url};
    use serde_json::json;

    #[test]
    fn urls_escape_ids_and_queries() {
        let api = mock_api();
        assert_eq!(
            api.url_for(&Endpoint::Photo("a b/c".into())),
            "http://api.test/api/photos/a%20b%2Fc"
        );
        assert_eq!(
            api.url_for(&Endpoint::SearchPhotos("sunset & sea".into())),
            "http://api.test/api/photos/search?q=sunset+%26+sea"
        );
        assert_eq!(
            api.url_for(&Endpoint::ListPhotos {
                page: 1,
                page_size: 12
            }),
            "http://api.test/api/photos?page=1&pageSize=12"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let config = ClientConfig::with_api_base("http://api.test/api/").unwrap();
        let api = PhotoShareApi::new(MockHttpClient::new(), &config);
        assert_eq!(
            api.url_for(&Endpoint::TrendingPhotos),
            "http://api.test/api/photos/trending"
        );
    }

    #[tokio::test]
    async fn list_decodes_envelope_and_null_data() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/photos/trending"),
            200,
            json!({ "data": [photo_json("p1", "u1"), photo_json("p2", "u1")] }),
        );
        api.client().mock_response(
            HttpMethod::Get,
            &url("/photos/search?q=none"),
            200,
            json!({ "data": null }),
        );

        let trending = api.photos().trending().await.unwrap();
        assert_eq!(trending.len(), 2);
        assert_eq!(trending[1].id, "p2");

        let found = api.photos().search("none").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn photos_without_id_are_skipped() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/photos/search?q=sea"),
            200,
            json!({ "data": [photo_json("p1", "u1"), { "title": "no id" }, { "_id": "  " }] }),
        );

        let found = api.photos().search("sea").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p1");
    }

    #[tokio::test]
    async fn token_is_sent_as_bearer_header() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/users/creators"), 200, json!({ "data": [] }));

        api.authorized("t0k").users().creators().await.unwrap();

        let req = api.client().last_request().unwrap();
        assert_eq!(req.headers.get(HEADER_AUTHORIZATION).unwrap(), "Bearer t0k");
    }

    #[tokio::test]
    async fn anonymous_requests_have_no_auth_header() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/users/creators"), 200, json!({ "data": [] }));

        api.users().creators().await.unwrap();
        let req = api.client().last_request().unwrap();
        assert!(!req.headers.contains_key(HEADER_AUTHORIZATION));
    }

    #[tokio::test]
    async fn stats_accept_bare_object() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/users/me/stats"),
            200,
            json!({ "photoCount": 7, "totalViews": 120 }),
        );

        let stats = api.users().my_stats().await.unwrap();
        assert_eq!(stats.photo_count, Some(7));
        assert_eq!(stats.total_views, Some(120));
        assert_eq!(stats.comment_count, None);
    }

    #[tokio::test]
    async fn error_body_message_reaches_caller() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Post,
            &url("/comments/p1"),
            403,
            json!({ "message": "Comments are closed" }),
        );

        let err = api.comments().create("p1", "hi").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Forbidden);
        assert_eq!(err.to_string(), "Comments are closed");
    }

    #[tokio::test]
    async fn missing_photo_is_not_found() {
        let api = mock_api();
        let err = api.photos().get("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Get, &url("/photos/p1"), 200, json!({ "data": [1, 2] }));
        let err = api.photos().get("p1").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
    }

    #[tokio::test]
    async fn rate_posts_value() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Post, &url("/ratings/p1"), 200, json!({ "data": null }));

        api.ratings().rate("p1", 4).await.unwrap();
        let req = api.client().last_request().unwrap();
        assert_eq!(req.body, Some(RequestBody::Json(r#"{"value":4}"#.into())));
    }

    #[tokio::test]
    async fn upload_sends_all_form_fields() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Post, &url("/photos"), 201, json!({ "data": {} }));

        let photo = NewPhoto {
            title: "Dunes".into(),
            caption: "Morning".into(),
            location: "Sahara".into(),
            people: "Ann, Bo".into(),
            enable_ai: false,
        };
        let image = ImageFile {
            name: "dunes.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8],
        };
        api.photos().create(&photo, image).await.unwrap();

        let Some(RequestBody::Multipart(form)) = api.client().last_request().unwrap().body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.get_text("title"), Some("Dunes"));
        assert_eq!(form.get_text("people"), Some("Ann, Bo"));
        assert_eq!(form.get_text("enableAI"), Some("false"));
        assert!(matches!(
            &form.parts[0],
            (name, FormPart::File { content_type, .. }) if name == "image" && content_type == "image/jpeg"
        ));
    }

    #[test]
    fn image_mime_check() {
        let mut file = ImageFile {
            name: "a.txt".into(),
            content_type: "text/plain".into(),
            bytes: vec![],
        };
        assert!(!file.is_image());
        file.content_type = "IMAGE/PNG".into();
        assert!(file.is_image());
    }
}
