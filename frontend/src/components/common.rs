//! 页面共用的小组件与工具

use crate::auth::use_auth;
use crate::components::icons::{ArrowLeft, Lock};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use photoshare::page::access::{Denied, Requirement, check};
use photoshare::{LoadTracker, Session};

/// 绑定到当前组件生命周期的 tracker，组件卸载时所有票据失效
pub fn use_load_tracker() -> LoadTracker {
    let tracker = LoadTracker::new();
    on_cleanup({
        let tracker = tracker.clone();
        move || tracker.cancel()
    });
    tracker
}

/// 阻塞式提示框
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// 确认对话框，无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="flex min-h-[60vh] items-center justify-center">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 访问被拒绝时的页面
#[component]
pub fn AccessDenied(denied: Denied) -> impl IntoView {
    view! {
        <div class="flex min-h-[60vh] items-center justify-center px-4">
            <div class="card w-full max-w-md bg-base-100 shadow-xl">
                <div class="card-body items-center text-center">
                    <div class="rounded-2xl bg-warning/10 p-3 text-warning">
                        <Lock attr:class="h-8 w-8" />
                    </div>
                    <h2 class="card-title">{denied.title()}</h2>
                    <p class="text-base-content/70">{denied.message()}</p>
                    <div class="card-actions pt-2">
                        {match denied {
                            Denied::SignInRequired => view! {
                                <Link to=AppRoute::Login class="btn btn-primary">"Log In"</Link>
                            }
                            .into_any(),
                            Denied::CreatorRequired => view! {
                                <Link to=AppRoute::Home class="btn btn-primary">"Back to Home"</Link>
                            }
                            .into_any(),
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

/// 带返回按钮的提示页（照片不存在、加载失败）
#[component]
pub fn BackNotice(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
) -> impl IntoView {
    let router = use_router();

    view! {
        <div class="flex min-h-[60vh] flex-col items-center justify-center gap-4 px-4 text-center">
            <h2 class="text-2xl font-bold">{title}</h2>
            <p class="text-base-content/70">{message}</p>
            <button class="btn btn-outline gap-2" on:click=move |_| router.back()>
                <ArrowLeft attr:class="h-4 w-4" />
                "Go Back"
            </button>
        </div>
    }
}

/// 表单顶部的错误横幅
#[component]
pub fn ErrorBanner(message: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error py-2 text-sm">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// 访问控制包装
///
/// 会话恢复期间显示加载动画；不满足要求时渲染拒绝视图，满足时把会话交给 `render`。
#[component]
pub fn Guard(requirement: Requirement, render: fn(Session) -> AnyView) -> impl IntoView {
    let auth = use_auth();

    move || {
        let state = auth.state.get();
        if state.is_loading {
            return view! { <LoadingScreen /> }.into_any();
        }
        match (check(requirement, state.session.as_ref()), state.session) {
            (Ok(()), Some(session)) => render(session),
            (Ok(()), None) => view! { <AccessDenied denied=Denied::SignInRequired /> }.into_any(),
            (Err(denied), _) => view! { <AccessDenied denied=denied /> }.into_any(),
        }
    }
}
