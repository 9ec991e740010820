//! PhotoShareApp 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `api`: API 实例与运行时配置
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层
//!
//! 数据加载、会话与访问控制的逻辑位于 `photoshare` crate，这里只负责浏览器端的接线与渲染。

mod api;
mod auth;
mod components {
    pub mod common;
    pub mod dashboard;
    pub mod explore;
    pub mod home;
    pub mod icons;
    pub mod login;
    pub mod navbar;
    pub mod photo_card;
    pub mod photo_detail;
    pub mod photo_grid;
    pub mod profile;
    pub mod signup;
    pub mod star_rating;
    pub mod upload;
}
pub(crate) mod web;

use crate::api::{load_config, provide_api};
use crate::auth::{AuthContext, init_auth};
use crate::components::common::Guard;
use crate::components::dashboard::DashboardPage;
use crate::components::explore::ExplorePage;
use crate::components::home::HomePage;
use crate::components::icons::CircleAlert;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::photo_detail::PhotoDetailPage;
use crate::components::profile::ProfilePage;
use crate::components::signup::SignupPage;
use crate::components::upload::UploadPage;

use leptos::prelude::*;
use photoshare::Session;
use tracing::Level;

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 安装浏览器控制台日志；debug 构建输出到 DEBUG，release 构建输出到 INFO
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    web::console::init(level);
}

fn dashboard(session: Session) -> AnyView {
    view! { <DashboardPage session=session /> }.into_any()
}

fn profile(session: Session) -> AnyView {
    view! { <ProfilePage session=session /> }.into_any()
}

fn upload(session: Session) -> AnyView {
    view! { <UploadPage session=session /> }.into_any()
}

fn not_found() -> AnyView {
    view! {
        <div class="flex min-h-[70vh] items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="mt-4 text-xl">"Page not found"</p>
                <Link to=AppRoute::Home class="btn btn-primary mt-6">"Back to Home"</Link>
            </div>
        </div>
    }
    .into_any()
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。受保护的页面经由 [`Guard`] 渲染。
fn route_matcher(route: AppRoute) -> AnyView {
    let requirement = route.requirement();
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Explore { .. } => match route.listing_mode() {
            Some(mode) => view! { <ExplorePage mode=mode /> }.into_any(),
            None => not_found(),
        },
        AppRoute::Photo(id) => view! { <PhotoDetailPage id=id /> }.into_any(),
        AppRoute::Dashboard => view! { <Guard requirement=requirement render=dashboard /> }.into_any(),
        AppRoute::Profile => view! { <Guard requirement=requirement render=profile /> }.into_any(),
        AppRoute::Upload => view! { <Guard requirement=requirement render=upload /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::NotFound => not_found(),
    }
}

/// 配置无效时的启动错误页
#[component]
fn ConfigError(message: String) -> impl IntoView {
    view! {
        <div class="flex min-h-screen items-center justify-center bg-base-200 px-4">
            <div role="alert" class="alert alert-error max-w-lg">
                <CircleAlert attr:class="h-6 w-6 shrink-0" />
                <div>
                    <h3 class="font-bold">"Invalid configuration"</h3>
                    <div class="text-xs">{message}</div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取运行时配置
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid client configuration");
            return view! { <ConfigError message=e.to_string() /> }.into_any();
        }
    };
    let api = provide_api(config);

    // 2. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 3. 恢复已保存的会话
    init_auth(&auth_ctx, api);

    // 4. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200">
                <Navbar />
                <main>
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
    .into_any()
}
