//! 创作者后台

use crate::api::PhotoShareApi;
use crate::error::ApiResult;
use crate::page::access::CreatorPass;
use crate::request::HttpClient;
use photoshare_shared::format::format_rating;
use photoshare_shared::{CREATOR_FALLBACK_LIMIT, Photo, User};

// =========================================================
// 创作者身份匹配策略
// =========================================================

/// 判断一张照片是否属于某个创作者
///
/// 服务端的 `creatorId` 可能是 `odId`、`_id` 或邮箱中的任意一个，
/// 按这个顺序逐一比对，命中任意一个即视为本人的照片。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorIdentity {
    keys: Vec<String>,
}

impl CreatorIdentity {
    pub fn of(user: &User) -> Self {
        let keys = [
            user.od_id.as_deref(),
            user.id.as_deref(),
            Some(user.email.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();
        Self { keys }
    }

    /// 按优先级排列的候选 id
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 首选查询 id：`odId`，其次 `_id`
    pub fn primary(user: &User) -> Option<&str> {
        user.creator_key()
    }

    pub fn owns(&self, photo: &Photo) -> bool {
        photo
            .creator_id
            .as_deref()
            .is_some_and(|creator| self.keys.iter().any(|k| k == creator))
    }
}

// =========================================================
// 加载
// =========================================================

/// 加载当前创作者的照片
///
/// 按创作者查询失败或返回空列表时，退回到获取最近 100 张照片并在本地过滤；
/// 退回查询也失败时只记录日志并返回空列表。
pub async fn load_creator_photos<C: HttpClient>(
    api: &PhotoShareApi<C>,
    pass: CreatorPass<'_>,
) -> Vec<Photo> {
    let user = &pass.session().user;
    let identity = CreatorIdentity::of(user);
    let api = api.authorized(&pass.session().token);

    if let Some(key) = CreatorIdentity::primary(user) {
        match api.photos().by_creator(key).await {
            Ok(photos) if !photos.is_empty() => return photos,
            Ok(_) => tracing::warn!(creator = key, "no photos by creator id, filtering recent photos"),
            Err(e) => {
                tracing::warn!(creator = key, error = %e, "creator lookup failed, filtering recent photos")
            }
        }
    }

    match api.photos().list(1, CREATOR_FALLBACK_LIMIT).await {
        Ok(photos) => {
            let mine: Vec<Photo> = photos.into_iter().filter(|p| identity.owns(p)).collect();
            tracing::debug!(found = mine.len(), "creator fallback matched photos");
            mine
        }
        Err(e) => {
            tracing::error!(error = %e, "creator fallback failed");
            Vec::new()
        }
    }
}

pub async fn delete_photo<C: HttpClient>(
    api: &PhotoShareApi<C>,
    pass: CreatorPass<'_>,
    photo_id: &str,
) -> ApiResult<()> {
    api.authorized(&pass.session().token)
        .photos()
        .delete(photo_id)
        .await
}

/// 删除成功后从本地列表移除
pub fn remove_photo(photos: &mut Vec<Photo>, photo_id: &str) {
    photos.retain(|p| p.id != photo_id);
}

// =========================================================
// 统计
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardStats {
    pub photos: usize,
    pub total_views: u64,
    pub total_ratings: u64,
    /// 各照片平均分的平均值，没有照片时为 0
    pub average_rating: f64,
}

impl DashboardStats {
    pub fn from_photos(photos: &[Photo]) -> Self {
        let average_rating = if photos.is_empty() {
            0.0
        } else {
            photos.iter().map(|p| p.average_rating).sum::<f64>() / photos.len() as f64
        };
        Self {
            photos: photos.len(),
            total_views: photos.iter().map(|p| p.view_count).sum(),
            total_ratings: photos.iter().map(|p| p.rating_count).sum(),
            average_rating,
        }
    }

    pub fn average_label(&self) -> String {
        format_rating(self.average_rating)
    }
}
