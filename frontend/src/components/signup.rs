use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::common::ErrorBanner;
use crate::components::icons::{Camera, Eye, Film, Sparkles};
use crate::components::login::failure_text;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::Credentials;
use photoshare::session::MIN_PASSWORD_LEN;
use photoshare::shared::Role;

#[component]
fn RoleOption(
    role: Role,
    selected: ReadSignal<Role>,
    set_selected: WriteSignal<Role>,
    #[prop(into)] title: String,
    #[prop(into)] hint: String,
    children: Children,
) -> impl IntoView {
    let class = move || {
        if selected.get() == role {
            "flex cursor-pointer flex-col items-center gap-1 rounded-xl border border-primary bg-primary/15 px-3 py-3 text-center text-primary"
        } else {
            "flex cursor-pointer flex-col items-center gap-1 rounded-xl border border-base-300 bg-base-200 px-3 py-3 text-center hover:border-base-content/40"
        }
    };

    view! {
        <label class=class>
            <input
                type="radio"
                name="role"
                class="hidden"
                value=role.as_str()
                prop:checked=move || selected.get() == role
                on:change=move |_| set_selected.set(role)
            />
            {children()}
            <span class="text-sm font-semibold">{title}</span>
            <small class="text-xs text-base-content/60">{hint}</small>
        </label>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::Consumer);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let credentials = Credentials::new(
            &email.get_untracked(),
            &password.get_untracked(),
            Some(role.get_untracked()),
            Some(&name.get_untracked()),
        );
        // 密码长度等在发请求前校验
        if let Err(e) = credentials.validate() {
            set_error_msg.set(Some(e.message));
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            match login(&auth, &api, credentials).await {
                Ok(()) => router.go(AppRoute::auth_success_redirect()),
                Err(e) => set_error_msg.set(Some(failure_text(&e.message, "Signup failed"))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content w-full max-w-4xl flex-col gap-10 lg:flex-row lg:items-stretch">
                <div class="hidden flex-1 flex-col justify-between lg:flex">
                    <div class="space-y-6">
                        <div class="flex items-center gap-3">
                            <span class="flex h-11 w-11 items-center justify-center rounded-2xl bg-primary/20 text-primary">
                                <Film attr:class="h-6 w-6" />
                            </span>
                            <div>
                                <h1 class="text-2xl font-bold">"PhotoShareApp"</h1>
                                <p class="text-sm text-base-content/60">"Share. Discover. Inspire."</p>
                            </div>
                        </div>
                        <p class="text-sm text-base-content/70">
                            "Create a free account to share your photos, explore creative work from others, and let AI help you organize your visual stories."
                        </p>
                        <ul class="space-y-3 text-sm">
                            <li class="flex items-center gap-2">
                                <Sparkles attr:class="h-4 w-4 text-primary" />
                                "Instant uploads with automatic AI tagging."
                            </li>
                            <li class="flex items-center gap-2">
                                <Eye attr:class="h-4 w-4 text-info" />
                                "Discover photos from creators around the world."
                            </li>
                        </ul>
                    </div>
                    <p class="text-sm text-base-content/60">
                        "Already with us? "
                        <Link to=AppRoute::Login class="link link-primary">"Sign in instead"</Link>
                    </p>
                </div>

                <div class="card w-full flex-1 bg-base-100 shadow-2xl">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">"Create your PhotoShareApp account"</h2>
                        <p class="text-sm text-base-content/60">"A few details and you're ready to share."</p>

                        <ErrorBanner message=error_msg />

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Display Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="How should we call you?"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="name@example.com"
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
                                placeholder=format!("At least {} characters", MIN_PASSWORD_LEN)
                                minlength=MIN_PASSWORD_LEN.to_string()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="form-control">
                            <span class="label label-text">"Account Type"</span>
                            <div class="grid grid-cols-2 gap-3">
                                <RoleOption
                                    role=Role::Consumer
                                    selected=role
                                    set_selected=set_role
                                    title="Consumer"
                                    hint="Browse & react to photos"
                                >
                                    <Eye attr:class="h-5 w-5" />
                                </RoleOption>
                                <RoleOption
                                    role=Role::Creator
                                    selected=role
                                    set_selected=set_role
                                    title="Creator"
                                    hint="Upload & share your work"
                                >
                                    <Camera attr:class="h-5 w-5" />
                                </RoleOption>
                            </div>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
