use crate::api::PhotoShareApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use photoshare_shared::format::pluralize;
use photoshare_shared::{Comment, Photo, RatingSummary};

pub const NO_COMMENTS: &str = "No comments yet. Be the first!";

/// 照片详情页的全部数据
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDetail {
    pub photo: Photo,
    pub comments: Vec<Comment>,
    pub ratings: RatingSummary,
    /// 当前用户的评分，未登录或未评分为 0
    pub my_rating: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Found(Box<PhotoDetail>),
    NotFound,
    Failed(String),
}

impl PhotoDetail {
    /// 加载照片、评论与评分汇总
    ///
    /// 已登录时再获取本人评分，失败时静默降级为 0。
    pub async fn load<C: HttpClient>(
        api: &PhotoShareApi<C>,
        id: &str,
        signed_in: bool,
    ) -> DetailOutcome {
        let photos = api.photos();
        let comments = api.comments();
        let ratings = api.ratings();
        let joined = futures::try_join!(
            photos.get(id),
            comments.list(id),
            ratings.summary(id),
        );

        let (photo, comments, ratings) = match joined {
            Ok(parts) => parts,
            Err(e) if e.is_not_found() => return DetailOutcome::NotFound,
            Err(e) => {
                tracing::error!(photo = id, error = %e, "failed to load photo");
                return DetailOutcome::Failed(e.message);
            }
        };

        let my_rating = if signed_in {
            match api.ratings().mine(id).await {
                Ok(rating) => rating.value,
                Err(e) => {
                    tracing::debug!(photo = id, error = %e, "no rating for viewer");
                    0
                }
            }
        } else {
            0
        };

        DetailOutcome::Found(Box::new(Self {
            photo,
            comments,
            ratings,
            my_rating,
        }))
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn comments_label(&self) -> String {
        pluralize(self.comment_count(), "comment", "comments")
    }

    pub fn ratings_label(&self) -> String {
        pluralize(self.ratings.total as usize, "rating", "ratings")
    }

    /// 评分成功后写入本人评分与服务端最新汇总
    pub fn apply_rating(&mut self, value: u8, summary: RatingSummary) {
        self.my_rating = value;
        self.ratings = summary;
    }

    pub fn prepend_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }
}

/// 提交评分，然后重新获取汇总
///
/// 返回的汇总总是来自服务端，而不是本地计算的平均值。
pub async fn submit_rating<C: HttpClient>(
    api: &PhotoShareApi<C>,
    photo_id: &str,
    value: u8,
) -> ApiResult<RatingSummary> {
    if !(1..=5).contains(&value) {
        return Err(ApiError::invalid_input("Rating must be between 1 and 5"));
    }
    api.ratings().rate(photo_id, value).await?;
    api.ratings().summary(photo_id).await
}

/// 去掉首尾空白后为空的评论不允许提交
pub fn comment_draft(content: &str) -> Option<&str> {
    Some(content.trim()).filter(|c| !c.is_empty())
}

pub async fn post_comment<C: HttpClient>(
    api: &PhotoShareApi<C>,
    photo_id: &str,
    content: &str,
) -> ApiResult<Comment> {
    let content =
        comment_draft(content).ok_or_else(|| ApiError::invalid_input("Comment cannot be empty"))?;
    api.comments().create(photo_id, content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::request::HttpMethod;
    use crate::testing::{mock_api, photo_json, url};
    use photoshare_shared::Sentiment;
    use serde_json::json;

    fn mock_photo(api: &PhotoShareApi<crate::request::MockHttpClient>) {
        let client = api.client();
        client.mock_response(
            HttpMethod::Get,
            &url("/photos/p1"),
            200,
            json!({ "data": photo_json("p1", "u1") }),
        );
        client.mock_response(
            HttpMethod::Get,
            &url("/ratings/p1"),
            200,
            json!({ "data": { "average": 4.0, "total": 2 } }),
        );
    }

    fn expect_found(outcome: DetailOutcome) -> PhotoDetail {
        match outcome {
            DetailOutcome::Found(detail) => *detail,
            other => panic!("expected photo, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn zero_comments_shows_empty_message() {
        let api = mock_api();
        mock_photo(&api);
        api.client()
            .mock_response(HttpMethod::Get, &url("/comments/p1"), 200, json!({ "data": [] }));

        let detail = expect_found(PhotoDetail::load(&api, "p1", false).await);
        assert_eq!(detail.comment_count(), 0);
        assert_eq!(detail.comments_label(), "0 comments");
        assert_eq!(detail.my_rating, 0);
        assert_eq!(api.client().count(HttpMethod::Get, &url("/ratings/p1/me")), 0);
    }

    #[tokio::test]
    async fn viewer_rating_failure_degrades_to_zero() {
        let api = mock_api();
        mock_photo(&api);
        api.client()
            .mock_response(HttpMethod::Get, &url("/comments/p1"), 200, json!({ "data": null }));
        api.client()
            .mock_network_error(HttpMethod::Get, &url("/ratings/p1/me"));

        let detail = expect_found(PhotoDetail::load(&api, "p1", true).await);
        assert_eq!(detail.my_rating, 0);
        assert_eq!(detail.ratings.total, 2);
    }

    #[tokio::test]
    async fn viewer_rating_is_loaded_when_signed_in() {
        let api = mock_api();
        mock_photo(&api);
        api.client().mock_response(
            HttpMethod::Get,
            &url("/comments/p1"),
            200,
            json!({ "data": [{ "_id": "c1", "content": "wow", "userDisplayName": "Bo", "sentiment": "positive" }] }),
        );
        api.client().mock_response(
            HttpMethod::Get,
            &url("/ratings/p1/me"),
            200,
            json!({ "data": { "value": 3 } }),
        );

        let detail = expect_found(PhotoDetail::load(&api, "p1", true).await);
        assert_eq!(detail.my_rating, 3);
        assert_eq!(detail.comments_label(), "1 comment");
        assert_eq!(detail.comments[0].sentiment, Some(Sentiment::Positive));
    }

    #[tokio::test]
    async fn missing_photo_is_not_found_and_other_errors_fail() {
        let api = mock_api();
        assert_eq!(PhotoDetail::load(&api, "gone", false).await, DetailOutcome::NotFound);

        api.client().mock_response(
            HttpMethod::Get,
            &url("/photos/p2"),
            500,
            json!({ "message": "database unavailable" }),
        );
        api.client()
            .mock_response(HttpMethod::Get, &url("/comments/p2"), 200, json!({ "data": [] }));
        api.client()
            .mock_response(HttpMethod::Get, &url("/ratings/p2"), 200, json!({ "data": null }));
        assert_eq!(
            PhotoDetail::load(&api, "p2", false).await,
            DetailOutcome::Failed("database unavailable".into())
        );
    }

    #[tokio::test]
    async fn rating_refetches_aggregate() {
        let api = mock_api();
        api.client()
            .mock_response(HttpMethod::Post, &url("/ratings/p1"), 200, json!({ "data": null }));
        api.client().mock_sequence(
            HttpMethod::Get,
            &url("/ratings/p1"),
            vec![
                (200, json!({ "data": { "average": 4.0, "total": 2 } })),
                (200, json!({ "data": { "average": 3.7, "total": 3 } })),
            ],
        );

        let mut detail = PhotoDetail {
            photo: Photo::default(),
            comments: vec![],
            ratings: api.ratings().summary("p1").await.unwrap(),
            my_rating: 0,
        };

        let summary = submit_rating(&api, "p1", 3).await.unwrap();
        detail.apply_rating(3, summary);

        assert_eq!(detail.my_rating, 3);
        // 服务端返回的平均值，而不是 (4.0 * 2 + 3) / 3
        assert_eq!(detail.ratings.average, 3.7);
        assert_eq!(detail.ratings.total, 3);
        assert_eq!(api.client().count(HttpMethod::Get, &url("/ratings/p1")), 2);
        assert_eq!(detail.ratings_label(), "3 ratings");
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected_locally() {
        let api = mock_api();
        for value in [0, 6] {
            let err = submit_rating(&api, "p1", value).await.unwrap_err();
            assert_eq!(err.kind, ApiErrorKind::InvalidInput);
        }
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn blank_comment_never_sent_and_new_comment_goes_first() {
        let api = mock_api();
        let err = post_comment(&api, "p1", "   ").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidInput);
        assert_eq!(api.client().request_count(), 0);

        api.client().mock_response(
            HttpMethod::Post,
            &url("/comments/p1"),
            201,
            json!({ "data": { "_id": "c2", "content": "second", "userDisplayName": "Ann" } }),
        );
        let mut detail = PhotoDetail {
            photo: Photo::default(),
            comments: vec![Comment {
                id: "c1".into(),
                content: "first".into(),
                user_display_name: "Bo".into(),
                created_at: None,
                sentiment: None,
            }],
            ratings: RatingSummary::default(),
            my_rating: 0,
        };
        let created = post_comment(&api, "p1", " second ").await.unwrap();
        detail.prepend_comment(created);

        assert_eq!(detail.comments[0].id, "c2");
        assert_eq!(detail.comment_count(), 2);
    }

    #[test]
    fn draft_trimming() {
        assert_eq!(comment_draft(" hi "), Some("hi"));
        assert_eq!(comment_draft("\n\t"), None);
        assert!(NO_COMMENTS.starts_with("No comments"));
    }
}
