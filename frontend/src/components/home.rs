use crate::api::{use_api, use_config};
use crate::components::common::use_load_tracker;
use crate::components::icons::{Compass, Flame, Sparkles, StarIcon, UserIcon};
use crate::components::photo_grid::PhotoGrid;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::ViewState;
use photoshare::page::home::HomeFeed;

const CREATOR_AVATAR_SIZE: u32 = 80;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let tracker = use_load_tracker();

    let (feed, set_feed) = signal(ViewState::<HomeFeed>::Loading);

    let ticket = tracker.begin();
    spawn_local(async move {
        // 失败时记录日志，页面显示各自的空状态
        let loaded = HomeFeed::load(&api).await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to load home feed");
            HomeFeed::default()
        });
        ticket.apply(ViewState::Ready(loaded), |state| set_feed.set(state));
    });

    let loading = Signal::derive(move || feed.with(ViewState::is_pending));
    let data = Memo::new(move |_| feed.with(|f| f.ready().cloned().unwrap_or_default()));
    let latest = Signal::derive(move || data.with(|d| d.latest.clone()));

    let counters = move || {
        data.with(|d| d.counters())
            .into_iter()
            .map(|c| {
                view! {
                    <div class="rounded-2xl border border-base-300 bg-base-100/60 px-4 py-3">
                        <p class="text-base-content/60">{c.label}</p>
                        <p class="text-lg font-semibold">{c.value}</p>
                    </div>
                }
            })
            .collect_view()
    };

    let hero_tiles = move || {
        data.with(|d| {
            let (tiles, placeholders) = d.hero_tiles();
            let photos = tiles
                .iter()
                .enumerate()
                .map(|(i, photo)| {
                    let span = if i == 0 { "row-span-2" } else { "row-span-1" };
                    view! {
                        <div class=format!("col-span-1 overflow-hidden rounded-2xl border border-base-300 shadow-lg {}", span)>
                            <img
                                src=photo.blob_url.clone()
                                alt=photo.display_title().to_string()
                                class="h-full w-full object-cover transition duration-500 hover:scale-105"
                            />
                        </div>
                    }
                })
                .collect_view();
            let padding = (0..placeholders)
                .map(|_| view! {
                    <div class="col-span-1 row-span-1 flex items-center justify-center rounded-2xl border border-dashed border-base-300 text-xs text-base-content/50">
                        "Coming soon"
                    </div>
                })
                .collect_view();
            (photos, padding)
        })
    };

    let trending_strip = move || {
        data.with(|d| {
            (!d.trending.is_empty()).then(|| {
                let cards = d
                    .trending
                    .iter()
                    .map(|photo| {
                        // Link 的子节点必须持有自己的数据
                        let route = AppRoute::Photo(photo.id.clone());
                        let src = photo.blob_url.clone();
                        let title = photo.display_title().to_string();
                        let alt = title.clone();
                        view! {
                            <Link
                                to=route
                                class="group relative h-52 w-40 flex-shrink-0 overflow-hidden rounded-2xl border border-base-300 shadow-md transition hover:border-info"
                            >
                                <img
                                    src=src
                                    alt=alt
                                    class="h-full w-full object-cover transition duration-300 group-hover:scale-110"
                                />
                                <div class="pointer-events-none absolute inset-x-0 bottom-0 bg-gradient-to-t from-black/80 to-transparent p-2">
                                    <span class="line-clamp-1 text-xs font-medium text-white">{title}</span>
                                </div>
                            </Link>
                        }
                    })
                    .collect_view();
                view! {
                    <section class="space-y-4">
                        <div class="flex items-center justify-between gap-4">
                            <div>
                                <h2 class="flex items-center gap-2 text-lg font-semibold sm:text-xl">
                                    <span class="inline-flex h-8 w-8 items-center justify-center rounded-full bg-warning/10 text-warning">
                                        <Flame attr:class="h-4 w-4" />
                                    </span>
                                    "Trending now"
                                </h2>
                                <p class="text-xs text-base-content/60 sm:text-sm">"Most loved photos from the community."</p>
                            </div>
                            <Link to=AppRoute::trending() class="link link-info text-xs sm:text-sm">"See all →"</Link>
                        </div>
                        <div class="flex gap-4 overflow-x-auto pb-2">{cards}</div>
                    </section>
                }
            })
        })
    };

    let creators = move || {
        data.with(|d| {
            let featured = d.featured_creators();
            (!featured.is_empty()).then(|| {
                let cards = featured
                    .iter()
                    .map(|creator| {
                        let name = creator.display_name().to_string();
                        let photo_count = creator.photo_count.unwrap_or(0);
                        view! {
                            <div class="flex items-center gap-3 rounded-2xl border border-base-300 bg-base-100 p-3 shadow-sm">
                                <div class="avatar">
                                    <div class="h-12 w-12 rounded-full">
                                        <img
                                            src=creator.avatar_url(&config.avatar_base, Some(CREATOR_AVATAR_SIZE))
                                            alt=name.clone()
                                        />
                                    </div>
                                </div>
                                <div class="flex flex-col">
                                    <h4 class="text-sm font-semibold">{name}</h4>
                                    <span class="text-xs text-base-content/60">{format!("{} photos", photo_count)}</span>
                                </div>
                            </div>
                        }
                    })
                    .collect_view();
                view! {
                    <section class="space-y-4">
                        <div>
                            <h2 class="flex items-center gap-2 text-lg font-semibold sm:text-xl">
                                <span class="inline-flex h-8 w-8 items-center justify-center rounded-full bg-accent/10 text-accent">
                                    <StarIcon filled=true attr:class="h-4 w-4" />
                                </span>
                                "Featured creators"
                            </h2>
                            <p class="text-xs text-base-content/60 sm:text-sm">"Follow the people behind the most inspiring shots."</p>
                        </div>
                        <div class="grid gap-4 sm:grid-cols-2 md:grid-cols-3">{cards}</div>
                    </section>
                }
            })
        })
    };

    view! {
        <div class="min-h-screen">
            <section class="hero">
                <div class="hero-content mx-auto max-w-6xl flex-col gap-10 px-4 pb-16 pt-20 md:flex-row md:items-stretch lg:gap-16">
                    <div class="flex-1 space-y-6">
                        <span class="badge badge-outline gap-2 px-4 py-3 text-xs uppercase tracking-widest">
                            <span class="h-1.5 w-1.5 rounded-full bg-success"></span>
                            "Live photo-sharing prototype"
                        </span>
                        <h1 class="text-4xl font-bold leading-tight sm:text-5xl lg:text-6xl">
                            "Share your "
                            <span class="bg-gradient-to-r from-primary via-secondary to-accent bg-clip-text text-transparent">
                                "best moments"
                            </span>
                        </h1>
                        <p class="max-w-xl text-sm text-base-content/70 sm:text-base">
                            "Upload, explore, and be inspired by stunning photos from creators all over the world."
                        </p>
                        <div class="flex flex-wrap items-center gap-4 pt-2">
                            <Link to=AppRoute::explore() class="btn btn-primary rounded-full gap-2">
                                <Compass attr:class="h-4 w-4" />
                                "Explore Photos"
                            </Link>
                            <Link to=AppRoute::Signup class="btn btn-outline rounded-full gap-2">
                                <UserIcon attr:class="h-4 w-4" />
                                "Join Now"
                            </Link>
                        </div>
                        <div class="mt-6 grid max-w-md grid-cols-3 gap-4 text-xs sm:text-sm">{counters}</div>
                    </div>

                    <div class="flex-1">
                        <div class="relative mx-auto grid h-[320px] w-full max-w-md grid-cols-3 gap-3 rounded-3xl border border-base-300 bg-base-100/60 p-4 shadow-2xl">
                            {hero_tiles}
                        </div>
                    </div>
                </div>
            </section>

            <main class="mx-auto mt-4 flex max-w-6xl flex-col gap-10 px-4 pb-16">
                {trending_strip}

                <section class="space-y-4">
                    <div class="flex items-center justify-between gap-4">
                        <div>
                            <h2 class="flex items-center gap-2 text-lg font-semibold sm:text-xl">
                                <span class="inline-flex h-8 w-8 items-center justify-center rounded-full bg-info/10 text-info">
                                    <Sparkles attr:class="h-4 w-4" />
                                </span>
                                "Latest uploads"
                            </h2>
                            <p class="text-xs text-base-content/60 sm:text-sm">"Fresh photos just added to the feed."</p>
                        </div>
                        <Link to=AppRoute::explore() class="link link-info text-xs sm:text-sm">"View all →"</Link>
                    </div>
                    <div class="rounded-3xl border border-base-300 bg-base-100/70 p-3 sm:p-4">
                        <PhotoGrid photos=latest loading=loading />
                    </div>
                </section>

                {creators}
            </main>
        </div>
    }
}
