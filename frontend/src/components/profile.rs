use crate::api::{use_api, use_config};
use crate::components::common::use_load_tracker;
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::Session;
use photoshare::page::profile::{ProfileCounters, load_stats, role_label};
use photoshare::shared::format::format_count;

const PROFILE_AVATAR_SIZE: u32 = 120;

#[component]
fn Counter(label: &'static str, value: Signal<u64>, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 border border-base-300 shadow-lg">
            <div class="card-body gap-1 p-4">
                <div class="flex items-center justify-between">
                    <span class="text-xs uppercase tracking-wide text-base-content/60">{label}</span>
                    {children()}
                </div>
                <span class="mt-1 text-2xl font-semibold">{move || format_count(value.get())}</span>
            </div>
        </div>
    }
}

/// 个人资料页；统计加载完成前显示用户快照中的计数
#[component]
pub fn ProfilePage(session: Session) -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let tracker = use_load_tracker();

    let user = session.user.clone();
    let (counters, set_counters) = signal(ProfileCounters::resolve(None, &user));

    {
        let ticket = tracker.begin();
        spawn_local(async move {
            let stats = load_stats(&api, &session).await;
            let resolved = ProfileCounters::resolve(stats.as_ref(), &session.user);
            ticket.apply(resolved, |c| set_counters.set(c));
        });
    }

    let is_creator = user.is_creator();
    let name = user.display_name().to_string();
    let avatar = user.avatar_url(&config.avatar_base, Some(PROFILE_AVATAR_SIZE));
    let badge = if is_creator {
        "badge badge-primary badge-outline gap-2 capitalize"
    } else {
        "badge badge-info badge-outline gap-2 capitalize"
    };

    let photos = Signal::derive(move || counters.get().photos);
    let views = Signal::derive(move || counters.get().views);
    let comments = Signal::derive(move || counters.get().comments);
    let ratings = Signal::derive(move || counters.get().ratings);

    view! {
        <div class="mx-auto max-w-5xl px-4 py-10">
            <div class="card bg-base-100 border border-base-300 shadow-2xl">
                <div class="card-body flex-col gap-6 sm:flex-row sm:items-center">
                    <div class="flex items-center gap-4">
                        <img src=avatar alt=name.clone() class="h-24 w-24 rounded-3xl border border-base-300 object-cover" />
                        <div>
                            <h1 class="text-2xl font-semibold">{name.clone()}</h1>
                            <div class="mt-2 flex flex-wrap items-center gap-2">
                                <span class=badge>
                                    {if is_creator {
                                        view! { <Camera attr:class="h-3 w-3" /> }.into_any()
                                    } else {
                                        view! { <Eye attr:class="h-3 w-3" /> }.into_any()
                                    }}
                                    {role_label(&user)}
                                </span>
                                <span class="break-all text-xs text-base-content/60">{user.email.clone()}</span>
                            </div>
                            {user.bio.clone().filter(|b| !b.is_empty()).map(|bio| view! {
                                <p class="mt-3 max-w-md text-sm text-base-content/70">{bio}</p>
                            })}
                        </div>
                    </div>

                    {is_creator.then(|| view! {
                        <div class="flex flex-col gap-3 sm:ml-auto sm:items-end">
                            <Link to=AppRoute::Upload class="btn btn-primary btn-sm rounded-full gap-2">
                                <Upload attr:class="h-4 w-4" />
                                "Upload Photo"
                            </Link>
                            <Link to=AppRoute::Dashboard class="btn btn-outline btn-sm rounded-full gap-2">
                                <ChartLine attr:class="h-4 w-4" />
                                "Dashboard"
                            </Link>
                        </div>
                    })}
                </div>
            </div>

            <div class="mt-8 grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                <Counter label="Photos" value=photos>
                    <Camera attr:class="h-4 w-4" />
                </Counter>
                <Counter label="Views" value=views>
                    <Eye attr:class="h-4 w-4 text-info" />
                </Counter>
                <Counter label="Comments" value=comments>
                    <MessageCircle attr:class="h-4 w-4 text-success" />
                </Counter>
                <Counter label="Ratings" value=ratings>
                    <StarIcon filled=true attr:class="h-4 w-4 text-warning" />
                </Counter>
            </div>
        </div>
    }
}
