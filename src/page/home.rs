use crate::api::PhotoShareApi;
use crate::error::ApiResult;
use crate::request::HttpClient;
use photoshare_shared::{PAGE_SIZE, Photo, User};

pub const HERO_TILES: usize = 3;
pub const FEATURED_CREATORS: usize = 6;

/// 首页数据
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeFeed {
    pub latest: Vec<Photo>,
    pub trending: Vec<Photo>,
    pub creators: Vec<User>,
}

/// 顶部计数器
#[derive(Debug, Clone, PartialEq)]
pub struct HeroCounter {
    pub label: &'static str,
    pub value: String,
}

impl HomeFeed {
    /// 三个列表并行获取，任一失败则整体失败
    pub async fn load<C: HttpClient>(api: &PhotoShareApi<C>) -> ApiResult<Self> {
        let photos = api.photos();
        let users = api.users();
        let (latest, trending, creators) = futures::try_join!(
            photos.list(1, PAGE_SIZE),
            photos.trending(),
            users.creators(),
        )?;
        Ok(Self {
            latest,
            trending,
            creators,
        })
    }

    /// 数量为 0 时显示占位文字
    pub fn counters(&self) -> [HeroCounter; 3] {
        let counter = |label, count: usize, placeholder: &str| HeroCounter {
            label,
            value: if count > 0 {
                count.to_string()
            } else {
                placeholder.to_string()
            },
        };
        [
            counter("Photos", self.latest.len(), "1.2k+"),
            counter("Creators", self.creators.len(), "350+"),
            counter("Trending", self.trending.len(), "Hot now"),
        ]
    }

    /// 前三张热门照片，以及需要补齐的占位块数量
    pub fn hero_tiles(&self) -> (&[Photo], usize) {
        let shown = &self.trending[..self.trending.len().min(HERO_TILES)];
        (shown, HERO_TILES - shown.len())
    }

    pub fn featured_creators(&self) -> &[User] {
        &self.creators[..self.creators.len().min(FEATURED_CREATORS)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::testing::{mock_api, photos_json, url};
    use serde_json::json;

    #[tokio::test]
    async fn loads_three_feeds() {
        let api = mock_api();
        let client = api.client();
        client.mock_response(
            HttpMethod::Get,
            &url("/photos?page=1&pageSize=12"),
            200,
            photos_json(&["p1", "p2"], "u1"),
        );
        client.mock_response(
            HttpMethod::Get,
            &url("/photos/trending"),
            200,
            photos_json(&["p2"], "u1"),
        );
        client.mock_response(
            HttpMethod::Get,
            &url("/users/creators"),
            200,
            json!({ "data": null }),
        );

        let feed = HomeFeed::load(&api).await.unwrap();
        assert_eq!(feed.latest.len(), 2);
        assert_eq!(feed.trending[0].id, "p2");
        assert!(feed.creators.is_empty());

        let counters = feed.counters();
        assert_eq!(counters[0].value, "2");
        assert_eq!(counters[1].value, "350+");
        assert_eq!(counters[2].value, "1");

        let (tiles, placeholders) = feed.hero_tiles();
        assert_eq!(tiles.len(), 1);
        assert_eq!(placeholders, 2);
    }

    #[tokio::test]
    async fn any_failure_fails_the_join() {
        let api = mock_api();
        api.client().mock_response(
            HttpMethod::Get,
            &url("/photos?page=1&pageSize=12"),
            200,
            photos_json(&["p1"], "u1"),
        );
        api.client()
            .mock_network_error(HttpMethod::Get, &url("/photos/trending"));

        assert!(HomeFeed::load(&api).await.is_err());
    }

    #[test]
    fn featured_creators_are_capped() {
        let feed = HomeFeed {
            creators: vec![User::default(); 9],
            ..Default::default()
        };
        assert_eq!(feed.featured_creators().len(), FEATURED_CREATORS);
        assert_eq!(feed.hero_tiles().1, HERO_TILES);
    }
}
