//! 展示用的格式化工具

use url::Url;

pub const DEFAULT_AVATAR_BASE: &str = "https://ui-avatars.com/api/";
const AVATAR_BACKGROUND: &str = "6366f1";

/// 根据名字生成头像 URL
///
/// `base` 无法解析时退回默认的头像服务。
pub fn avatar_url(base: &str, name: &str, size: Option<u32>) -> String {
    let Ok(mut url) = Url::parse(base).or_else(|_| Url::parse(DEFAULT_AVATAR_BASE)) else {
        return String::new();
    };
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("name", name)
            .append_pair("background", AVATAR_BACKGROUND)
            .append_pair("color", "fff");
        if let Some(size) = size {
            query.append_pair("size", &size.to_string());
        }
    }
    url.into()
}

/// 千分位格式，如 `12,345`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 一位小数的评分
pub fn format_rating(value: f64) -> String {
    format!("{:.1}", value)
}

/// 单复数
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
