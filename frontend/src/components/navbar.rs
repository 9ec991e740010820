use crate::api::use_config;
use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

const AVATAR_SIZE: u32 = 64;

/// 搜索表单，桌面端与移动端各渲染一份
#[component]
fn SearchForm(
    query: ReadSignal<String>,
    set_query: WriteSignal<String>,
    #[prop(into)] class: String,
) -> impl IntoView {
    let router = use_router();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let q = query.get_untracked();
        // 空白查询不跳转
        if !q.trim().is_empty() {
            router.go(AppRoute::search(&q));
        }
    };

    view! {
        <form class=class on:submit=on_submit>
            <label class="input input-bordered input-sm flex w-full items-center gap-2">
                <Search attr:class="h-4 w-4 opacity-60" />
                <input
                    type="text"
                    class="grow"
                    placeholder="Search photos..."
                    prop:value=query
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </label>
        </form>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let config = use_config();

    let (query, set_query) = signal(String::new());
    let (show_dropdown, set_show_dropdown) = signal(false);
    let dropdown_ref = NodeRef::<html::Div>::new();

    // 点击菜单外部时关闭
    let handle = window_event_listener(ev::click, move |ev| {
        if !show_dropdown.get_untracked() {
            return;
        }
        let inside = match (dropdown_ref.get_untracked(), ev.target()) {
            (Some(menu), Some(target)) => target
                .dyn_ref::<web_sys::Node>()
                .is_some_and(|node| menu.contains(Some(node))),
            _ => false,
        };
        if !inside {
            set_show_dropdown.set(false);
        }
    });
    on_cleanup(move || handle.remove());

    let is_creator = move || auth.state.with(|s| s.is_creator());
    let close = move |_| set_show_dropdown.set(false);

    let user_menu = move || {
        let state = auth.state.get();
        let Some(user) = state.user().cloned() else {
            return view! {
                <div class="flex items-center gap-2">
                    <Link to=AppRoute::Login class="btn btn-outline btn-sm rounded-full">"Log In"</Link>
                    <Link to=AppRoute::Signup class="btn btn-primary btn-sm rounded-full">"Sign Up"</Link>
                </div>
            }
            .into_any();
        };

        let avatar = user.avatar_url(&config.avatar_base, Some(AVATAR_SIZE));
        let name = user.display_name().to_string();
        let role = user.role.as_str();

        view! {
            <Show when=is_creator>
                <Link to=AppRoute::Upload class="hidden sm:flex text-primary hover:text-primary/80">
                    <CirclePlus attr:class="h-6 w-6" />
                </Link>
            </Show>

            <div class="relative" node_ref=dropdown_ref>
                <button
                    class="avatar h-9 w-9 overflow-hidden rounded-full border border-base-300"
                    on:click=move |_| set_show_dropdown.update(|open| *open = !*open)
                >
                    <img src=avatar alt="User" class="h-full w-full object-cover" />
                </button>

                <Show when=move || show_dropdown.get()>
                    <ul class="menu absolute right-0 mt-2 w-48 rounded-box border border-base-300 bg-base-100 p-0 shadow-xl z-50">
                        <li class="menu-title border-b border-base-300 px-4 py-2">
                            <span class="font-semibold text-base-content">{name.clone()}</span>
                            <span class="text-xs capitalize">{role}</span>
                        </li>
                        <li on:click=close>
                            <Link to=AppRoute::Profile>
                                <UserIcon attr:class="h-4 w-4" />
                                "Profile"
                            </Link>
                        </li>
                        <Show when=is_creator>
                            <li on:click=close>
                                <Link to=AppRoute::Dashboard>
                                    <ChartLine attr:class="h-4 w-4 text-primary" />
                                    "Dashboard"
                                </Link>
                            </li>
                        </Show>
                        <li>
                            <button
                                class="text-error"
                                on:click=move |_| {
                                    logout(&auth);
                                    set_show_dropdown.set(false);
                                }
                            >
                                <LogOut attr:class="h-4 w-4" />
                                "Logout"
                            </button>
                        </li>
                    </ul>
                </Show>
            </div>
        }
        .into_any()
    };

    view! {
        <nav class="sticky top-0 z-50 w-full border-b border-base-300 bg-base-100/80 backdrop-blur">
            <div class="navbar mx-auto max-w-7xl gap-6 px-4">
                <Link to=AppRoute::Home class="flex items-center gap-2 font-semibold hover:text-primary">
                    <span class="flex h-9 w-9 items-center justify-center rounded-xl bg-primary/20 text-primary">
                        <Film attr:class="h-5 w-5" />
                    </span>
                    <span class="hidden sm:block text-lg tracking-wide">"PhotoShareApp"</span>
                </Link>

                <SearchForm query=query set_query=set_query class="hidden flex-1 sm:flex" />

                <div class="flex items-center gap-4">
                    <Link to=AppRoute::Home class="text-base-content/60 hover:text-primary">
                        <House attr:class="h-5 w-5" />
                    </Link>
                    <Link to=AppRoute::explore() class="text-base-content/60 hover:text-primary">
                        <Compass attr:class="h-5 w-5" />
                    </Link>
                    {user_menu}
                </div>
            </div>

            <SearchForm query=query set_query=set_query class="px-4 pb-3 sm:hidden" />
        </nav>
    }
}
