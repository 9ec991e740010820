//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。

use photoshare::page::access::Requirement;
use photoshare::page::explore::ListingMode;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::fmt::Display;
use url::form_urlencoded;

/// WHATWG URL 规范中路径段需要转义的字符
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    /// `/explore?q=&sort=` 与 `/search?q=` 共用同一个页面
    Explore {
        query: Option<String>,
        sort: Option<String>,
    },
    Photo(String),
    Dashboard,
    Profile,
    Login,
    Signup,
    Upload,
    NotFound,
}

/// 路径中的 `+` 是字面量，空格写作 `%20`
fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

impl AppRoute {
    /// 将 URL path 与查询串（可带或不带 `?`）解析为路由
    pub fn from_location(path: &str, search: &str) -> Self {
        let params: Vec<(String, String)> =
            form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect();
        let param = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/explore" => Self::Explore {
                query: param("q"),
                sort: param("sort"),
            },
            "/search" => Self::Explore {
                query: param("q"),
                sort: None,
            },
            "/dashboard" => Self::Dashboard,
            "/profile" => Self::Profile,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/upload" => Self::Upload,
            _ => match trimmed.strip_prefix("/photo/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Self::Photo(decode_segment(id))
                }
                _ => Self::NotFound,
            },
        }
    }

    pub fn explore() -> Self {
        Self::Explore {
            query: None,
            sort: None,
        }
    }

    pub fn search(query: &str) -> Self {
        Self::Explore {
            query: Some(query.to_string()),
            sort: None,
        }
    }

    pub fn trending() -> Self {
        Self::Explore {
            query: None,
            sort: Some("trending".to_string()),
        }
    }

    /// 获取路由对应的 URL（含查询串）
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Explore { query, sort } => {
                let mut qs = form_urlencoded::Serializer::new(String::new());
                if let Some(q) = query {
                    qs.append_pair("q", q);
                }
                if let Some(sort) = sort {
                    qs.append_pair("sort", sort);
                }
                let qs = qs.finish();
                match (query.is_some() && sort.is_none(), qs.is_empty()) {
                    (true, _) => format!("/search?{}", qs),
                    (false, true) => "/explore".to_string(),
                    (false, false) => format!("/explore?{}", qs),
                }
            }
            Self::Photo(id) => format!("/photo/{}", encode_segment(id)),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Upload => "/upload".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 页面的访问要求；不满足时页面渲染拒绝视图，而不是跳转
    pub fn requirement(&self) -> Requirement {
        match self {
            Self::Dashboard | Self::Upload => Requirement::Creator,
            Self::Profile => Requirement::SignedIn,
            _ => Requirement::Public,
        }
    }

    pub fn listing_mode(&self) -> Option<ListingMode> {
        match self {
            Self::Explore { query, sort } => Some(ListingMode::from_params(
                query.as_deref(),
                sort.as_deref(),
            )),
            _ => None,
        }
    }

    /// 已登录用户不应停留在登录/注册页
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_href(href: &str) -> AppRoute {
        match href.split_once('?') {
            Some((path, search)) => AppRoute::from_location(path, search),
            None => AppRoute::from_location(href, ""),
        }
    }

    #[test]
    fn parses_static_routes() {
        assert_eq!(AppRoute::from_location("/", ""), AppRoute::Home);
        assert_eq!(AppRoute::from_location("/dashboard/", ""), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_location("/upload", ""), AppRoute::Upload);
        assert_eq!(AppRoute::from_location("/creator/u1", ""), AppRoute::NotFound);
        assert_eq!(AppRoute::from_location("/photo/", ""), AppRoute::NotFound);
    }

    #[test]
    fn search_and_explore_share_listing() {
        let route = AppRoute::from_location("/search", "?q=sunset+beach");
        assert_eq!(route, AppRoute::search("sunset beach"));
        assert_eq!(
            route.listing_mode(),
            Some(ListingMode::Search("sunset beach".into()))
        );
        assert_eq!(route.to_path(), "/search?q=sunset+beach");

        let trending = from_href("/explore?sort=trending");
        assert_eq!(trending, AppRoute::trending());
        assert_eq!(trending.listing_mode(), Some(ListingMode::Trending));
        assert_eq!(trending.to_path(), "/explore?sort=trending");

        let latest = from_href("/explore");
        assert_eq!(latest.listing_mode(), Some(ListingMode::Latest));
        assert_eq!(latest.to_path(), "/explore");
    }

    #[test]
    fn photo_ids_round_trip() {
        let route = AppRoute::Photo("a b+c/d".into());
        let path = route.to_path();
        assert_eq!(path, "/photo/a%20b+c%2Fd");
        assert_eq!(from_href(&path), route);

        // 其他工具生成的链接里，`+` 仍是加号
        assert_eq!(
            AppRoute::from_location("/photo/x+y", ""),
            AppRoute::Photo("x+y".into())
        );
    }

    #[test]
    fn guards() {
        assert_eq!(AppRoute::Dashboard.requirement(), Requirement::Creator);
        assert_eq!(AppRoute::Profile.requirement(), Requirement::SignedIn);
        assert_eq!(
            AppRoute::Photo("p1".into()).requirement(),
            Requirement::Public
        );
        assert!(AppRoute::Signup.should_redirect_when_authenticated());
        assert!(!AppRoute::Home.should_redirect_when_authenticated());
    }
}
