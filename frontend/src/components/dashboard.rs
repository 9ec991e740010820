use crate::api::use_api;
use crate::components::common::{alert, confirm, use_load_tracker};
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::{ApiError, ApiErrorKind, Session};
use photoshare::page::access::require_creator;
use photoshare::page::dashboard::{DashboardStats, delete_photo, load_creator_photos, remove_photo};
use photoshare::shared::Photo;
use photoshare::shared::date::format_optional;
use photoshare::shared::format::{format_count, format_rating};

/// 创作者面板，仅在通过创作者校验后渲染
#[component]
pub fn DashboardPage(session: Session) -> impl IntoView {
    let api = use_api();
    let tracker = use_load_tracker();

    let (photos, set_photos) = signal(Vec::<Photo>::new());
    let (loading, set_loading) = signal(true);

    {
        let api = api.clone();
        let session = session.clone();
        let ticket = tracker.begin();
        spawn_local(async move {
            let Ok(pass) = require_creator(Some(&session)) else {
                return;
            };
            let mine = load_creator_photos(&api, pass).await;
            ticket.apply(mine, |mine| {
                set_photos.set(mine);
                set_loading.set(false);
            });
        });
    }

    // 同一时间只允许一个删除请求
    let delete_tracker = use_load_tracker();
    let (deleting, set_deleting) = signal(false);

    let handle_delete = {
        let session = session.clone();
        Callback::new(move |photo_id: String| {
            if deleting.get_untracked() || !confirm("Delete this photo?") {
                return;
            }
            let api = api.clone();
            let session = session.clone();
            let ticket = delete_tracker.begin();
            set_deleting.set(true);
            spawn_local(async move {
                let result = match require_creator(Some(&session)) {
                    Ok(pass) => delete_photo(&api, pass, &photo_id).await,
                    Err(denied) => Err(ApiError::new(ApiErrorKind::Forbidden, denied.message())),
                };
                ticket.apply(result, |result| {
                    set_deleting.set(false);
                    match result {
                        Ok(()) => set_photos.update(|list| remove_photo(list, &photo_id)),
                        Err(e) => alert(&e.message),
                    }
                });
            });
        })
    };

    let stats = Memo::new(move |_| photos.with(|p| DashboardStats::from_photos(p)));
    let name = session.user.display_name().to_string();

    view! {
        <div class="mx-auto max-w-6xl px-4 pb-16 pt-10">
            <div class="mb-8 flex flex-col items-start justify-between gap-4 sm:flex-row sm:items-center">
                <div>
                    <div class="badge badge-outline gap-2 px-4 py-3 text-xs uppercase tracking-widest">
                        <span class="h-1.5 w-1.5 rounded-full bg-success"></span>
                        "Creator Dashboard"
                    </div>
                    <h1 class="mt-3 flex items-center gap-3 text-2xl font-bold sm:text-3xl">
                        <span class="inline-flex h-10 w-10 items-center justify-center rounded-2xl bg-primary/20 text-primary">
                            <ChartLine attr:class="h-5 w-5" />
                        </span>
                        "Welcome back, "
                        <span class="bg-gradient-to-r from-primary to-info bg-clip-text text-transparent">{name}</span>
                    </h1>
                    <p class="mt-1 text-xs text-base-content/60 sm:text-sm">
                        "Track performance, manage your gallery, and keep your best photos in the spotlight."
                    </p>
                </div>
                <Link to=AppRoute::Upload class="btn btn-primary rounded-full gap-2">
                    <CirclePlus attr:class="h-4 w-4" />
                    "New Photo"
                </Link>
            </div>

            <div class="stats stats-vertical mb-8 w-full bg-base-100 shadow lg:stats-horizontal">
                <div class="stat">
                    <div class="stat-figure text-primary"><Camera attr:class="h-8 w-8" /></div>
                    <div class="stat-title">"Photos"</div>
                    <div class="stat-value text-primary">{move || stats.get().photos}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-info"><Eye attr:class="h-8 w-8" /></div>
                    <div class="stat-title">"Total Views"</div>
                    <div class="stat-value text-info">{move || format_count(stats.get().total_views)}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-warning"><StarIcon filled=true attr:class="h-8 w-8" /></div>
                    <div class="stat-title">"Avg Rating"</div>
                    <div class="stat-value text-warning">{move || stats.get().average_label()}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-success"><Heart attr:class="h-8 w-8" /></div>
                    <div class="stat-title">"Ratings"</div>
                    <div class="stat-value text-success">{move || format_count(stats.get().total_ratings)}</div>
                </div>
            </div>

            <section class="card bg-base-100 border border-base-300 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">
                        <Camera attr:class="h-5 w-5" />
                        "Your Photos"
                    </h2>
                    <p class="text-xs text-base-content/60 sm:text-sm">
                        "Manage your uploads, track performance, and clean up your gallery."
                    </p>
                    {move || {
                        if loading.get() {
                            view! {
                                <div class="flex h-40 items-center justify-center">
                                    <span class="loading loading-spinner loading-lg"></span>
                                </div>
                            }
                            .into_any()
                        } else if photos.with(Vec::is_empty) {
                            view! {
                                <div class="flex flex-col items-center justify-center gap-3 py-10 text-center">
                                    <Camera attr:class="h-10 w-10 opacity-60" />
                                    <p class="text-sm">"No photos yet. Upload your first photo and start building your gallery."</p>
                                    <Link to=AppRoute::Upload class="btn btn-primary btn-sm rounded-full">"Upload Photo"</Link>
                                </div>
                            }
                            .into_any()
                        } else {
                            view! { <PhotoTable photos=photos on_delete=handle_delete /> }.into_any()
                        }
                    }}
                </div>
            </section>
        </div>
    }
}

#[component]
fn PhotoTable(photos: ReadSignal<Vec<Photo>>, on_delete: Callback<String>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Photo"</th>
                        <th>"Title"</th>
                        <th>"Views"</th>
                        <th>"Rating"</th>
                        <th>"Date"</th>
                        <th class="text-center">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || photos.get()
                        key=|p| p.id.clone()
                        children=move |photo| {
                            let id = photo.id.clone();
                            let route = AppRoute::Photo(photo.id.clone());
                            let title = photo.display_title().to_string();
                            let alt = title.clone();
                            let rating = format_rating(photo.average_rating);
                            let created = format_optional(photo.created_at.as_ref(), "-");
                            view! {
                                <tr>
                                    <td>
                                        <div class="h-12 w-16 overflow-hidden rounded-lg border border-base-300">
                                            <img src=photo.blob_url alt=alt class="h-full w-full object-cover" />
                                        </div>
                                    </td>
                                    <td>
                                        <Link to=route class="link link-info line-clamp-2 font-medium">
                                            {title}
                                        </Link>
                                    </td>
                                    <td>{photo.view_count}</td>
                                    <td>
                                        <span class="badge badge-ghost gap-1 text-warning">
                                            <StarIcon filled=true attr:class="h-3 w-3" />
                                            {rating}
                                        </span>
                                    </td>
                                    <td>{created}</td>
                                    <td class="text-center">
                                        <button
                                            class="btn btn-ghost btn-sm btn-circle text-error"
                                            title="Delete photo"
                                            on:click=move |_| on_delete.run(id.clone())
                                        >
                                            <Trash2 attr:class="h-4 w-4" />
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
