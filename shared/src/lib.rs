use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod date;
pub mod format;
pub mod protocol;

pub use protocol::{Endpoint, HttpMethod};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 列表页固定分页大小
pub const PAGE_SIZE: u32 = 12;
/// 按创作者查询失败时，回退查询的最大条数
pub const CREATOR_FALLBACK_LIMIT: u32 = 100;
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 响应信封 (Envelope)
// =========================================================

/// 取出 `{ "data": ... }` 信封中的数据
///
/// - `{ "data": x }` 返回 `Some(x)`，`data` 为 `null` 时返回 `None`
/// - 不含 `data` 字段的对象或数组视为未包装的裸数据
pub fn unwrap_envelope(value: Value) -> Option<Value> {
    match value {
        Value::Object(mut map) if map.contains_key("data") => match map.remove("data") {
            Some(Value::Null) | None => None,
            Some(inner) => Some(inner),
        },
        Value::Null => None,
        other => Some(other),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Creator,
    /// 未知角色按普通用户处理
    #[default]
    #[serde(other)]
    Consumer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "consumer",
            Role::Creator => "creator",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub od_id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    pub avatar: Option<String>,
    pub bio: Option<String>,

    // 服务端缓存的统计值
    pub photo_count: Option<u64>,
    pub total_views: Option<u64>,
    pub comment_count: Option<u64>,
    pub rating_count: Option<u64>,
}

impl User {
    pub fn is_creator(&self) -> bool {
        self.role == Role::Creator
    }

    /// `displayName`，其次 `name`，都为空时为 "User"
    pub fn display_name(&self) -> &str {
        [&self.display_name, &self.name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("User")
    }

    /// 按创作者查询时使用的 id：`odId` 优先，其次 `_id`
    pub fn creator_key(&self) -> Option<&str> {
        self.od_id.as_deref().or(self.id.as_deref())
    }

    /// 自定义头像，否则根据显示名生成
    pub fn avatar_url(&self, avatar_base: &str, size: Option<u32>) -> String {
        match self.avatar.as_deref().filter(|a| !a.is_empty()) {
            Some(avatar) => avatar.to_string(),
            None => format::avatar_url(avatar_base, self.display_name(), size),
        }
    }
}

/// AI 分析结果的只读视图
///
/// 只包含非空的部分；三者皆空时 [`Photo::ai_analysis`] 返回 `None`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiAnalysis<'a> {
    pub tags: &'a [String],
    pub description: Option<&'a str>,
    pub colors: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// 缺失时为空串；列表解码时跳过这样的记录
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub caption: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blob_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u64,
    pub creator_id: Option<String>,
    #[serde(default, with = "date::lenient")]
    pub created_at: Option<DateTime<Utc>>,

    // AI 分析字段：缺失与空值语义不同
    pub ai_tags: Option<Vec<String>>,
    pub ai_description: Option<String>,
    pub dominant_colors: Option<Vec<String>>,
}

impl Photo {
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let title = self.title.trim();
        if title.is_empty() { fallback } else { title }
    }

    pub fn display_title(&self) -> &str {
        self.title_or("Untitled")
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// 前 `n` 个 AI 标签
    pub fn preview_tags(&self, n: usize) -> &[String] {
        let tags = self.ai_tags.as_deref().unwrap_or_default();
        &tags[..tags.len().min(n)]
    }

    pub fn ai_analysis(&self) -> Option<AiAnalysis<'_>> {
        let analysis = AiAnalysis {
            tags: self.ai_tags.as_deref().unwrap_or_default(),
            description: self.ai_description.as_deref().filter(|d| !d.is_empty()),
            colors: self.dominant_colors.as_deref().unwrap_or_default(),
        };
        if analysis.tags.is_empty() && analysis.description.is_none() && analysis.colors.is_empty()
        {
            None
        } else {
            Some(analysis)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    #[serde(other)]
    Unknown,
}

impl Sentiment {
    /// 未知情绪不显示标记
    pub fn emoji(&self) -> Option<&'static str> {
        match self {
            Sentiment::Positive => Some("😊"),
            Sentiment::Neutral => Some("😐"),
            Sentiment::Negative => Some("😞"),
            Sentiment::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_display_name: String,
    #[serde(default, with = "date::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    pub sentiment: Option<Sentiment>,
}

impl Comment {
    pub fn author(&self) -> &str {
        let name = self.user_display_name.trim();
        if name.is_empty() { "User" } else { name }
    }

    pub fn sentiment_emoji(&self) -> Option<&'static str> {
        self.sentiment.and_then(|s| s.emoji())
    }
}

/// 照片评分聚合
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
}

/// 当前用户对某张照片的评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRating {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub photo_count: Option<u64>,
    pub total_views: Option<u64>,
    pub comment_count: Option<u64>,
    pub total_ratings: Option<u64>,
    pub rating_count: Option<u64>,
}

// =========================================================
// 请求体 (Request Bodies)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRequest {
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub display_name: String,
}

/// 登录/注册成功后返回的会话数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// 上传表单中除图片外的字段
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub title: String,
    pub caption: String,
    pub location: String,
    /// 逗号分隔，原样发送
    pub people: String,
    pub enable_ai: bool,
}

impl Default for NewPhoto {
    fn default() -> Self {
        Self {
            title: String::new(),
            caption: String::new(),
            location: String::new(),
            people: String::new(),
            enable_ai: true,
        }
    }
}
