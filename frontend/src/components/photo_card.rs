use crate::components::icons::{Heart, MapPin, MessageCircle};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use photoshare::shared::Photo;

const PREVIEW_TAGS: usize = 3;

#[component]
pub fn PhotoCard(photo: Photo) -> impl IntoView {
    // 图片加载完成前显示骨架
    let (loaded, set_loaded) = signal(false);

    let title = photo.display_title().to_string();
    let location = photo.location().map(str::to_string);
    let tags = photo.preview_tags(PREVIEW_TAGS).to_vec();
    let route = AppRoute::Photo(photo.id.clone());

    view! {
        <Link
            to=route
            class="group card card-compact bg-base-100 border border-base-300 shadow-lg overflow-hidden transition hover:border-primary hover:shadow-primary/20"
        >
            <figure class="relative aspect-[4/3] w-full bg-base-300">
                <Show when=move || !loaded.get()>
                    <div class="skeleton absolute inset-0 rounded-none"></div>
                </Show>
                <img
                    src=photo.blob_url.clone()
                    alt=title.clone()
                    on:load=move |_| set_loaded.set(true)
                    class=move || {
                        if loaded.get() {
                            "h-full w-full object-cover transition-opacity duration-500 opacity-100"
                        } else {
                            "h-full w-full object-cover transition-opacity duration-500 opacity-0"
                        }
                    }
                />
                <div class="absolute inset-0 flex items-end justify-end p-2 opacity-0 transition group-hover:opacity-100 bg-gradient-to-t from-black/40 to-transparent">
                    <div class="flex items-center gap-3 text-xs font-medium text-white">
                        <span class="flex items-center gap-1">
                            <Heart attr:class="h-3.5 w-3.5 text-error" />
                            {photo.rating_count}
                        </span>
                        <span class="flex items-center gap-1">
                            <MessageCircle attr:class="h-3.5 w-3.5 text-info" />
                            {photo.comment_count}
                        </span>
                    </div>
                </div>
            </figure>

            <div class="card-body gap-1">
                <h3 class="truncate font-medium group-hover:text-primary">{title.clone()}</h3>
                {location.map(|location| view! {
                    <span class="flex items-center gap-1 text-xs text-base-content/60">
                        <MapPin attr:class="h-3 w-3" />
                        {location}
                    </span>
                })}
                {(!tags.is_empty()).then(|| view! {
                    <div class="flex flex-wrap gap-1 pt-1">
                        {tags.into_iter().map(|tag| view! {
                            <span class="badge badge-primary badge-outline badge-sm capitalize">{tag}</span>
                        }).collect_view()}
                    </div>
                })}
            </div>
        </Link>
    }
}
