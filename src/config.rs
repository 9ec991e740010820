use photoshare_shared::format::DEFAULT_AVATAR_BASE;
use url::Url;

// =========================================================
// 运行时配置
// =========================================================

pub const DEFAULT_API_URL: &str = "/api";
pub const API_URL_KEY: &str = "PHOTOSHARE_API_URL";
pub const AVATAR_URL_KEY: &str = "PHOTOSHARE_AVATAR_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL `{0}`: {1}")]
    InvalidBaseUrl(String, url::ParseError),
    #[error("API base URL `{0}` cannot carry a path")]
    NotABase(String),
    #[error("relative API base URL `{0}` requires a page origin")]
    MissingOrigin(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: Url,
    pub avatar_base: String,
}

impl ClientConfig {
    /// 通过 `lookup` 读取配置项，缺失或为空时使用默认值
    ///
    /// 相对的 API 地址（如默认的 `/api`）会基于 `origin` 解析为绝对地址。
    pub fn from_lookup<F>(lookup: F, origin: Option<&str>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let raw_api = read(API_URL_KEY, DEFAULT_API_URL);
        let api_base = resolve_base(&raw_api, origin)?;

        Ok(Self {
            api_base,
            avatar_base: read(AVATAR_URL_KEY, DEFAULT_AVATAR_BASE),
        })
    }

    /// 直接指定 API 地址，其余使用默认值
    pub fn with_api_base(api_base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: resolve_base(api_base, None)?,
            avatar_base: DEFAULT_AVATAR_BASE.to_string(),
        })
    }
}

fn resolve_base(raw: &str, origin: Option<&str>) -> Result<Url, ConfigError> {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let origin = origin.ok_or_else(|| ConfigError::MissingOrigin(raw.to_string()))?;
            Url::parse(origin)
                .and_then(|o| o.join(raw))
                .map_err(|e| ConfigError::InvalidBaseUrl(raw.to_string(), e))?
        }
        Err(e) => return Err(ConfigError::InvalidBaseUrl(raw.to_string(), e)),
    };

    if parsed.cannot_be_a_base() {
        return Err(ConfigError::NotABase(raw.to_string()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_resolve_against_origin() {
        let cfg = ClientConfig::from_lookup(|_| None, Some("https://photos.example")).unwrap();
        assert_eq!(cfg.api_base.as_str(), "https://photos.example/api");
        assert_eq!(cfg.avatar_base, DEFAULT_AVATAR_BASE);
    }

    #[test]
    fn lookup_overrides_and_blank_values_fall_back() {
        let mut vars = HashMap::new();
        vars.insert(API_URL_KEY, "https://api.example/v1/".to_string());
        vars.insert(AVATAR_URL_KEY, "   ".to_string());

        let cfg = ClientConfig::from_lookup(|k| vars.get(k).cloned(), None).unwrap();
        assert_eq!(cfg.api_base.as_str(), "https://api.example/v1/");
        assert_eq!(cfg.avatar_base, DEFAULT_AVATAR_BASE);
    }

    #[test]
    fn relative_base_without_origin_is_rejected() {
        let err = ClientConfig::from_lookup(|_| None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingOrigin(_)));

        let err = ClientConfig::with_api_base("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, ConfigError::NotABase(_)));
    }
}
