//! API 上下文
//!
//! 浏览器端的 [`PhotoShareApi`] 实例与运行时配置，通过 Context 在组件间共享。

use crate::web::{FetchHttpClient, LocalStorage};
use leptos::prelude::*;
use photoshare::config::{API_URL_KEY, AVATAR_URL_KEY};
use photoshare::{ClientConfig, ConfigError, PhotoShareApi};

pub type Api = PhotoShareApi<FetchHttpClient>;

/// 构建期通过环境变量注入的默认值
fn build_time(key: &str) -> Option<String> {
    match key {
        API_URL_KEY => option_env!("PHOTOSHARE_API_URL"),
        AVATAR_URL_KEY => option_env!("PHOTOSHARE_AVATAR_URL"),
        _ => None,
    }
    .map(str::to_string)
}

/// 读取配置：LocalStorage 覆盖 > 构建期变量 > 默认值
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    ClientConfig::from_lookup(
        |key| LocalStorage::get(key).or_else(|| build_time(key)),
        origin.as_deref(),
    )
}

pub fn provide_api(config: ClientConfig) -> Api {
    let api = PhotoShareApi::new(FetchHttpClient, &config);
    provide_context(config);
    provide_context(api.clone());
    api
}

pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>().expect("ClientConfig should be provided")
}
