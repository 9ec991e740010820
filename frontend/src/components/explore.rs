use crate::api::use_api;
use crate::components::common::use_load_tracker;
use crate::components::icons::{Camera, Compass, Flame, Search};
use crate::components::photo_grid::PhotoGrid;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::ViewState;
use photoshare::page::explore::{Listing, ListingMode, fetch_page};

/// 探索 / 搜索 / 热门列表
///
/// 查询参数变化时路由会重新挂载本组件，旧的加载随组件一起失效。
#[component]
pub fn ExplorePage(mode: ListingMode) -> impl IntoView {
    let api = use_api();
    let tracker = use_load_tracker();

    let (listing, set_listing) = signal(ViewState::<Listing>::Loading);
    let (loading_more, set_loading_more) = signal(false);

    {
        let api = api.clone();
        let mode = mode.clone();
        let ticket = tracker.begin();
        spawn_local(async move {
            let result = Listing::load(&api, mode).await;
            if let Err(e) = &result {
                tracing::error!(error = %e, "failed to load listing");
            }
            let state = ViewState::from_result(result, |l| l.photos.is_empty());
            ticket.apply(state, |state| set_listing.set(state));
        });
    }

    let load_more = move |_| {
        let Some((mode, page)) = listing.with_untracked(|l| {
            l.ready()
                .and_then(|l| l.next_page().map(|page| (l.mode.clone(), page)))
        }) else {
            return;
        };

        set_loading_more.set(true);
        let api = api.clone();
        let ticket = tracker.begin();
        spawn_local(async move {
            match fetch_page(&api, &mode, page).await {
                Ok(batch) => {
                    ticket.apply(batch, |batch| {
                        set_listing.update(|state| {
                            if let Some(l) = state.ready_mut() {
                                l.append(page, batch);
                            }
                        })
                    });
                }
                Err(e) => tracing::error!(error = %e, page, "failed to load more photos"),
            }
            if ticket.is_current() {
                set_loading_more.set(false);
            }
        });
    };

    let loading = Signal::derive(move || listing.with(ViewState::is_pending));
    let photos = Signal::derive(move || {
        listing.with(|l| l.ready().map(|l| l.photos.clone()).unwrap_or_default())
    });
    let summary = move || {
        listing.with(|l| match l.ready() {
            Some(l) => l.summary(),
            None => "0 photos found".to_string(),
        })
    };
    let can_load_more = move || {
        !loading_more.get() && listing.with(|l| l.ready().is_some_and(Listing::can_load_more))
    };
    let no_results = move || listing.with(|l| !l.is_pending() && l.ready().is_none());

    let heading = match &mode {
        ListingMode::Search(q) => view! {
            <span class="inline-flex h-10 w-10 items-center justify-center rounded-2xl bg-info/20 text-info">
                <Search attr:class="h-5 w-5" />
            </span>
            "Search: "
            <span class="bg-gradient-to-r from-primary to-info bg-clip-text text-transparent">{q.clone()}</span>
        }
        .into_any(),
        ListingMode::Trending => view! {
            <span class="inline-flex h-10 w-10 items-center justify-center rounded-2xl bg-warning/20 text-warning">
                <Flame attr:class="h-5 w-5" />
            </span>
            {mode.title()}
        }
        .into_any(),
        ListingMode::Latest => view! {
            <span class="inline-flex h-10 w-10 items-center justify-center rounded-2xl bg-success/20 text-success">
                <Compass attr:class="h-5 w-5" />
            </span>
            {mode.title()}
        }
        .into_any(),
    };

    view! {
        <div class="mx-auto max-w-6xl px-4 py-10">
            <div class="mb-6 text-center">
                <h1 class="flex items-center justify-center gap-3 text-3xl font-bold">{heading}</h1>
                <p class="mt-2 text-sm text-base-content/60">{summary}</p>
            </div>

            <div class="rounded-3xl border border-base-300 bg-base-100/70 p-3 shadow-xl sm:p-4">
                <PhotoGrid photos=photos loading=loading />
            </div>

            <Show when=can_load_more>
                <div class="mt-8 flex justify-center">
                    <button class="btn btn-outline rounded-full" on:click=load_more.clone()>
                        "Load More"
                    </button>
                </div>
            </Show>
            <Show when=move || loading_more.get()>
                <div class="mt-8 flex justify-center">
                    <span class="loading loading-dots loading-md"></span>
                </div>
            </Show>

            <Show when=no_results>
                <div class="mt-20 flex flex-col items-center gap-3 text-center">
                    <div class="flex h-16 w-16 items-center justify-center rounded-2xl bg-base-200">
                        <Camera attr:class="h-7 w-7" />
                    </div>
                    <p class="text-sm text-base-content/70">"Nothing found... try a different search term."</p>
                </div>
            </Show>
        </div>
    }
}
