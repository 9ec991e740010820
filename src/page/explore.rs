use crate::api::PhotoShareApi;
use crate::error::ApiResult;
use crate::request::HttpClient;
use photoshare_shared::format::pluralize;
use photoshare_shared::{PAGE_SIZE, Photo};

/// 列表页的三种模式，由查询参数决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingMode {
    Latest,
    Trending,
    Search(String),
}

impl ListingMode {
    /// `q` 非空时为搜索，否则 `sort=trending` 为热门，其余为最新
    pub fn from_params(q: Option<&str>, sort: Option<&str>) -> Self {
        match q.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => ListingMode::Search(q.to_string()),
            None if sort == Some("trending") => ListingMode::Trending,
            None => ListingMode::Latest,
        }
    }

    pub fn title(&self) -> String {
        match self {
            ListingMode::Latest => "Explore".to_string(),
            ListingMode::Trending => "Trending Photos".to_string(),
            ListingMode::Search(q) => format!("Search: {}", q),
        }
    }

    /// 只有最新列表支持分页
    pub fn is_paged(&self) -> bool {
        matches!(self, ListingMode::Latest)
    }
}

/// 获取某一页
///
/// 搜索与热门不分页，`page` 被忽略。
pub async fn fetch_page<C: HttpClient>(
    api: &PhotoShareApi<C>,
    mode: &ListingMode,
    page: u32,
) -> ApiResult<Vec<Photo>> {
    match mode {
        ListingMode::Search(q) => api.photos().search(q).await,
        ListingMode::Trending => api.photos().trending().await,
        ListingMode::Latest => api.photos().list(page, PAGE_SIZE).await,
    }
}

/// 已加载的列表
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub mode: ListingMode,
    pub photos: Vec<Photo>,
    pub page: u32,
    /// 最近一次获取的页是否是满页
    pub has_more: bool,
}

impl Listing {
    pub fn first_page(mode: ListingMode, photos: Vec<Photo>) -> Self {
        let has_more = is_full_page(&photos);
        Self {
            mode,
            photos,
            page: 1,
            has_more,
        }
    }

    pub async fn load<C: HttpClient>(api: &PhotoShareApi<C>, mode: ListingMode) -> ApiResult<Self> {
        let photos = fetch_page(api, &mode, 1).await?;
        Ok(Self::first_page(mode, photos))
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && self.mode.is_paged()
    }

    /// 下一页页码，不能继续加载时为 `None`
    pub fn next_page(&self) -> Option<u32> {
        self.can_load_more().then_some(self.page + 1)
    }

    /// 追加一页结果
    pub fn append(&mut self, page: u32, batch: Vec<Photo>) {
        self.has_more = is_full_page(&batch);
        self.page = page;
        self.photos.extend(batch);
    }

    pub async fn load_more<C: HttpClient>(&mut self, api: &PhotoShareApi<C>) -> ApiResult<()> {
        let Some(page) = self.next_page() else {
            return Ok(());
        };
        let batch = fetch_page(api, &self.mode, page).await?;
        self.append(page, batch);
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!("{} found", pluralize(self.photos.len(), "photo", "photos"))
    }
}

fn is_full_page(batch: &[Photo]) -> bool {
    batch.len() == PAGE_SIZE as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::testing::{mock_api, photos_json, url};

    fn ids(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    fn page_json(prefix: &str, n: usize) -> serde_json::Value {
        let ids = ids(prefix, n);
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        photos_json(&refs, "u1")
    }

    #[test]
    fn mode_from_query_params() {
        assert_eq!(
            ListingMode::from_params(Some("sunset"), Some("trending")),
            ListingMode::Search("sunset".into())
        );
        assert_eq!(
            ListingMode::from_params(Some("  "), Some("trending")),
            ListingMode::Trending
        );
        assert_eq!(ListingMode::from_params(None, None), ListingMode::Latest);
        assert_eq!(ListingMode::from_params(None, Some("new")), ListingMode::Latest);
    }

    #[tokio::test]
    async fn search_uses_search_endpoint_without_paging() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/photos/search?q=sunset"),
            200,
            page_json("s", 12),
        );

        let mode = ListingMode::from_params(Some("sunset"), None);
        let mut listing = Listing::load(&api, mode).await.unwrap();

        assert_eq!(listing.photos.len(), 12);
        assert!(!listing.can_load_more());
        assert_eq!(api.client().count(HttpMethod::Get, &url("/photos/search?q=sunset")), 1);
        assert_eq!(
            api.client().count(HttpMethod::Get, &url("/photos?page=1&pageSize=12")),
            0
        );

        listing.load_more(&api).await.unwrap();
        assert_eq!(api.client().request_count(), 1);
    }

    #[tokio::test]
    async fn latest_pages_until_a_short_page() {
        let api = mock_api();
        let client = api.client();
        client.mock_response(
            HttpMethod::Get,
            &url("/photos?page=1&pageSize=12"),
            200,
            page_json("a", 12),
        );
        client.mock_response(
            HttpMethod::Get,
            &url("/photos?page=2&pageSize=12"),
            200,
            page_json("b", 5),
        );

        let mut listing = Listing::load(&api, ListingMode::Latest).await.unwrap();
        assert!(listing.has_more);
        assert_eq!(listing.next_page(), Some(2));

        listing.load_more(&api).await.unwrap();
        assert_eq!(listing.photos.len(), 17);
        assert_eq!(listing.page, 2);
        assert!(!listing.has_more);
        assert_eq!(listing.next_page(), None);
        assert_eq!(listing.photos[12].id, "b0");
        assert_eq!(listing.summary(), "17 photos found");
    }

    #[test]
    fn short_first_page_has_no_more() {
        let listing = Listing::first_page(ListingMode::Latest, vec![Photo::default()]);
        assert!(!listing.has_more);
        assert_eq!(listing.summary(), "1 photo found");
    }

    #[tokio::test]
    async fn trending_never_pages() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/photos/trending"),
            200,
            page_json("t", 12),
        );
        let listing = Listing::load(&api, ListingMode::Trending).await.unwrap();
        assert!(listing.has_more);
        assert!(!listing.can_load_more());
        assert_eq!(listing.mode.title(), "Trending Photos");
    }
}
