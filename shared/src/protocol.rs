//! 接口协议定义
//!
//! 描述客户端调用的每一个远程端点：HTTP 方法、路径段与查询参数。
//! 路径段保持未编码状态，由调用方在拼接 URL 时负责转义。

use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 远程 API 端点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    // --- photos ---
    ListPhotos { page: u32, page_size: u32 },
    Photo(String),
    PhotosByCreator(String),
    TrendingPhotos,
    SearchPhotos(String),
    CreatePhoto,
    DeletePhoto(String),

    // --- comments ---
    Comments(String),
    CreateComment(String),

    // --- ratings ---
    RatingSummary(String),
    MyRating(String),
    RatePhoto(String),

    // --- users / auth ---
    Creators,
    MyStats,
    Me,
    Login,
    Register,
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::CreatePhoto
            | Endpoint::CreateComment(_)
            | Endpoint::RatePhoto(_)
            | Endpoint::Login
            | Endpoint::Register => HttpMethod::Post,
            Endpoint::DeletePhoto(_) => HttpMethod::Delete,
            _ => HttpMethod::Get,
        }
    }

    /// 未编码的路径段
    ///
    /// 资源 id 作为独立的段返回，保证其中的 `/` 或空格不会改变路由。
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::ListPhotos { .. } | Endpoint::CreatePhoto => vec!["photos"],
            Endpoint::Photo(id) | Endpoint::DeletePhoto(id) => vec!["photos", id],
            Endpoint::PhotosByCreator(id) => vec!["photos", "creator", id],
            Endpoint::TrendingPhotos => vec!["photos", "trending"],
            Endpoint::SearchPhotos(_) => vec!["photos", "search"],
            Endpoint::Comments(id) | Endpoint::CreateComment(id) => vec!["comments", id],
            Endpoint::RatingSummary(id) | Endpoint::RatePhoto(id) => vec!["ratings", id],
            Endpoint::MyRating(id) => vec!["ratings", id, "me"],
            Endpoint::Creators => vec!["users", "creators"],
            Endpoint::MyStats => vec!["users", "me", "stats"],
            Endpoint::Me => vec!["users", "me"],
            Endpoint::Login => vec!["auth", "login"],
            Endpoint::Register => vec!["auth", "register"],
        }
    }

    /// 查询参数
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::ListPhotos { page, page_size } => vec![
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
            Endpoint::SearchPhotos(q) => vec![("q", q.clone())],
            _ => Vec::new(),
        }
    }

    /// 人类可读的路径（用于日志）
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_routes_match_backend_contract() {
        let list = Endpoint::ListPhotos {
            page: 2,
            page_size: 12,
        };
        assert_eq!(list.path(), "/photos");
        assert_eq!(
            list.query(),
            vec![("page", "2".to_string()), ("pageSize", "12".to_string())]
        );

        assert_eq!(Endpoint::Photo("p1".into()).path(), "/photos/p1");
        assert_eq!(
            Endpoint::PhotosByCreator("u1".into()).path(),
            "/photos/creator/u1"
        );
        assert_eq!(Endpoint::TrendingPhotos.path(), "/photos/trending");
        assert_eq!(Endpoint::CreatePhoto.method(), HttpMethod::Post);
        assert_eq!(Endpoint::DeletePhoto("p1".into()).method(), HttpMethod::Delete);
    }

    #[test]
    fn search_carries_query_string() {
        let search = Endpoint::SearchPhotos("sunset".into());
        assert_eq!(search.path(), "/photos/search");
        assert_eq!(search.query(), vec![("q", "sunset".to_string())]);
        assert_eq!(search.method(), HttpMethod::Get);
    }

    #[test]
    fn rating_and_comment_routes() {
        assert_eq!(Endpoint::MyRating("p1".into()).path(), "/ratings/p1/me");
        assert_eq!(Endpoint::RatePhoto("p1".into()).method(), HttpMethod::Post);
        assert_eq!(Endpoint::RatingSummary("p1".into()).method(), HttpMethod::Get);
        assert_eq!(Endpoint::CreateComment("p1".into()).path(), "/comments/p1");
        assert_eq!(
            Endpoint::MyStats.to_string(),
            "GET /users/me/stats".to_string()
        );
    }
}
