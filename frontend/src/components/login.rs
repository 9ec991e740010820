use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::common::ErrorBanner;
use crate::components::icons::{Film, ShieldCheck};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::Credentials;

/// 失败时的提示，服务端没有给出原因时使用 `fallback`
pub(crate) fn failure_text(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        set_is_submitting.set(true);

        let credentials = Credentials::new(&email.get_untracked(), &password.get_untracked(), None, None);
        let api = api.clone();
        spawn_local(async move {
            match login(&auth, &api, credentials).await {
                Ok(()) => router.go(AppRoute::auth_success_redirect()),
                Err(e) => set_error_msg.set(Some(failure_text(&e.message, "Login failed"))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content w-full max-w-md flex-col">
                <div class="flex w-full items-center justify-between">
                    <div class="flex items-center gap-2">
                        <span class="flex h-9 w-9 items-center justify-center rounded-xl bg-primary/20 text-primary">
                            <Film attr:class="h-5 w-5" />
                        </span>
                        <div>
                            <p class="font-semibold">"PhotoShareApp"</p>
                            <p class="text-xs text-base-content/60">"Your space for visual stories"</p>
                        </div>
                    </div>
                    <Link to=AppRoute::Signup class="link link-primary text-sm">"Create account"</Link>
                </div>

                <div class="text-center">
                    <div class="flex flex-col items-center gap-2">
                        <div class="rounded-2xl bg-primary/10 p-3 text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome back"</h1>
                        <p class="text-base-content/70">"Sign in to continue to PhotoShareApp."</p>
                    </div>
                </div>

                <div class="card w-full shrink-0 bg-base-100 shadow-2xl">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorBanner message=error_msg />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
