//! 页面数据加载的生命周期
//!
//! `Idle → Loading → {Ready | Empty | Failed}`，参数变化时重新进入 `Loading`。
//! 每次加载都从 [`LoadTracker`] 领取一张票据，只有票据仍然有效时才写回结果。

use crate::error::ApiResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Empty,
    Failed(String),
}

impl<T> ViewState<T> {
    /// `is_empty` 为真的结果进入 `Empty`
    pub fn from_result(result: ApiResult<T>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(value) if is_empty(&value) => ViewState::Empty,
            Ok(value) => ViewState::Ready(value),
            Err(e) => ViewState::Failed(e.message),
        }
    }

    /// 尚未有结果（包括还未开始）
    pub fn is_pending(&self) -> bool {
        matches!(self, ViewState::Idle | ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> ViewState<Vec<T>> {
    pub fn from_list(result: ApiResult<Vec<T>>) -> Self {
        Self::from_result(result, Vec::is_empty)
    }
}

// =========================================================
// 取消与过期检测
// =========================================================

#[derive(Debug, Default)]
struct TrackerState {
    generation: AtomicU64,
    cancelled: AtomicBool,
}

/// 一个组件实例对应一个 tracker
///
/// 组件卸载时调用 [`LoadTracker::cancel`]，之后所有票据都失效。
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    state: Arc<TrackerState>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始一次新的加载，之前的票据随即过期
    pub fn begin(&self) -> LoadTicket {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            state: Arc::clone(&self.state),
        }
    }

    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    state: Arc<TrackerState>,
}

impl LoadTicket {
    pub fn is_current(&self) -> bool {
        !self.state.cancelled.load(Ordering::SeqCst)
            && self.state.generation.load(Ordering::SeqCst) == self.generation
    }

    /// 票据有效时执行 `apply`，否则丢弃结果
    pub fn apply<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_current() {
            apply(value);
            true
        } else {
            tracing::debug!(generation = self.generation, "dropping stale load result");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn list_results_map_to_states() {
        assert_eq!(ViewState::from_list(Ok(vec![1, 2])), ViewState::Ready(vec![1, 2]));
        assert_eq!(ViewState::<Vec<i32>>::from_list(Ok(vec![])), ViewState::Empty);

        let failed = ViewState::<Vec<i32>>::from_list(Err(ApiError::network("offline")));
        assert_eq!(failed.error(), Some("offline"));
        assert!(!failed.is_pending());
        assert!(ViewState::<()>::Idle.is_pending());
    }

    #[test]
    fn newer_load_supersedes_older() {
        let tracker = LoadTracker::new();
        let first = tracker.begin();
        assert!(first.is_current());

        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());

        let mut applied = Vec::new();
        assert!(!first.apply("old", |v| applied.push(v)));
        assert!(second.apply("new", |v| applied.push(v)));
        assert_eq!(applied, vec!["new"]);
    }

    #[test]
    fn cancel_invalidates_everything() {
        let tracker = LoadTracker::new();
        let ticket = tracker.begin();
        tracker.clone().cancel();

        assert!(!ticket.is_current());
        assert!(!tracker.begin().is_current());
    }

    #[test]
    fn action_results_are_dropped_after_unmount() {
        let page = LoadTracker::new();
        let actions = LoadTracker::new();
        let load = page.begin();
        let rate = actions.begin();

        // 页面加载与交互请求互不影响
        let retry = actions.begin();
        assert!(load.is_current());
        assert!(!rate.is_current());

        let mut summary = None;
        actions.cancel();
        assert!(!retry.apply(4.5, |v| summary = Some(v)));
        assert_eq!(summary, None);
        assert!(load.is_current());
    }
}
