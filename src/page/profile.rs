use crate::api::PhotoShareApi;
use crate::request::HttpClient;
use crate::session::Session;
use photoshare_shared::{User, UserStats};

/// 个人主页的四个计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileCounters {
    pub photos: u64,
    pub views: u64,
    pub comments: u64,
    pub ratings: u64,
}

impl ProfileCounters {
    /// 统计接口的值优先，其次使用用户快照，都没有时为 0
    pub fn resolve(stats: Option<&UserStats>, user: &User) -> Self {
        let stat = |f: fn(&UserStats) -> Option<u64>| stats.and_then(f);
        Self {
            photos: stat(|s| s.photo_count).or(user.photo_count).unwrap_or(0),
            views: stat(|s| s.total_views).or(user.total_views).unwrap_or(0),
            comments: stat(|s| s.comment_count)
                .or(user.comment_count)
                .unwrap_or(0),
            ratings: stat(|s| s.total_ratings)
                .or_else(|| stat(|s| s.rating_count))
                .or(user.rating_count)
                .unwrap_or(0),
        }
    }
}

/// 获取统计数据，失败时记录日志并返回 `None`
pub async fn load_stats<C: HttpClient>(
    api: &PhotoShareApi<C>,
    session: &Session,
) -> Option<UserStats> {
    match api.authorized(&session.token).users().my_stats().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::error!(error = %e, "failed to load profile stats");
            None
        }
    }
}

/// 角色标签
pub fn role_label(user: &User) -> &'static str {
    user.role.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::testing::{mock_api, session_with, url};
    use photoshare_shared::Role;
    use serde_json::json;

    #[test]
    fn stats_take_precedence_over_snapshot() {
        let user = User {
            photo_count: Some(1),
            total_views: Some(2),
            comment_count: Some(3),
            rating_count: Some(4),
            ..Default::default()
        };
        let stats = UserStats {
            photo_count: Some(10),
            rating_count: Some(40),
            ..Default::default()
        };

        let counters = ProfileCounters::resolve(Some(&stats), &user);
        assert_eq!(
            counters,
            ProfileCounters {
                photos: 10,
                views: 2,
                comments: 3,
                ratings: 40,
            }
        );
    }

    #[test]
    fn total_ratings_beats_rating_count() {
        let stats = UserStats {
            total_ratings: Some(7),
            rating_count: Some(40),
            ..Default::default()
        };
        let counters = ProfileCounters::resolve(Some(&stats), &User::default());
        assert_eq!(counters.ratings, 7);
        assert_eq!(counters.photos, 0);
    }

    #[test]
    fn missing_everything_is_zero() {
        assert_eq!(
            ProfileCounters::resolve(None, &User::default()),
            ProfileCounters::default()
        );
    }

    #[tokio::test]
    async fn stats_request_is_authorized_and_failure_is_none() {
        let api = mock_api();
        let session = session_with(Role::Consumer);
        api.client().mock_response(
            HttpMethod::Get,
            &url("/users/me/stats"),
            200,
            json!({ "data": { "commentCount": 5 } }),
        );

        let stats = load_stats(&api, &session).await.unwrap();
        assert_eq!(stats.comment_count, Some(5));
        let req = api.client().last_request().unwrap();
        assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer t");

        api.client()
            .mock_response(HttpMethod::Get, &url("/users/me/stats"), 500, json!({}));
        assert!(load_stats(&api, &session).await.is_none());
        assert_eq!(role_label(&session.user), "consumer");
    }
}
