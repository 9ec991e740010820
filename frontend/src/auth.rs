//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::api::Api;
use crate::web::LocalStorage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::ApiResult;
use photoshare::session::{self, Credentials, SESSION_STORAGE_KEY, Session, SessionStore};
use photoshare::shared::User;

/// 以 JSON 形式保存在 LocalStorage 中的会话
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Option<Session> {
        let raw = LocalStorage::get(SESSION_STORAGE_KEY)?;
        match Session::from_snapshot(&raw) {
            Ok(Some(session)) => Some(session),
            Ok(None) => {
                LocalStorage::delete(SESSION_STORAGE_KEY);
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session is unreadable");
                LocalStorage::delete(SESSION_STORAGE_KEY);
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        match session.to_snapshot() {
            Ok(raw) => {
                LocalStorage::set(SESSION_STORAGE_KEY, &raw);
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize session"),
        }
    }

    fn clear(&self) {
        LocalStorage::delete(SESSION_STORAGE_KEY);
    }
}

/// 认证状态
#[derive(Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// 启动时正在校验已保存的令牌
    pub is_loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_creator(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_creator)
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::is_authenticated))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 存在已保存的令牌时向 `/users/me` 校验，校验完成前 `is_loading` 为 true。
pub fn init_auth(ctx: &AuthContext, api: Api) {
    if LocalSessionStore.load().is_none() {
        return;
    }

    ctx.set_state.update(|state| state.is_loading = true);
    let set_state = ctx.set_state;
    spawn_local(async move {
        let restored = session::restore(&api, &LocalSessionStore).await;
        set_state.update(|state| {
            state.session = restored;
            state.is_loading = false;
        });
    });
}

/// 登录或注册
///
/// 成功后会话写入 LocalStorage 与内存状态；
/// 离开登录页的跳转由路由服务监听认证状态自动完成。
pub async fn login(ctx: &AuthContext, api: &Api, credentials: Credentials) -> ApiResult<()> {
    let session = session::login(api, &LocalSessionStore, credentials).await?;
    ctx.set_state.update(|state| {
        state.session = Some(session);
        state.is_loading = false;
    });
    Ok(())
}

/// 注销并清除状态
pub fn logout(ctx: &AuthContext) {
    session::logout(&LocalSessionStore);
    ctx.set_state.update(|state| state.session = None);
}
