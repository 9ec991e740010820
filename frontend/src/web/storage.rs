//! LocalStorage 访问
//!
//! 保存会话快照与可选的配置覆盖（`PHOTOSHARE_API_URL` 等）。
//! 隐私模式或配额已满时写入会失败，调用方只记录日志，不中断流程。

use wasm_bindgen::JsValue;

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 读取非空值；空白字符串视为未设置，以便配置回落到构建期默认值
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?
            .get_item(key)
            .ok()?
            .filter(|v| !v.trim().is_empty())
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::write(key, |s| s.set_item(key, value))
    }

    pub fn delete(key: &str) -> bool {
        Self::write(key, |s| s.remove_item(key))
    }

    fn write(key: &str, op: impl FnOnce(&web_sys::Storage) -> Result<(), JsValue>) -> bool {
        let Some(storage) = Self::storage() else {
            tracing::warn!(key, "localStorage unavailable");
            return false;
        };
        match op(&storage) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = ?e, "localStorage write failed");
                false
            }
        }
    }
}
