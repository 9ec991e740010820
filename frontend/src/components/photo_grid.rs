use crate::components::icons::Camera;
use crate::components::photo_card::PhotoCard;
use leptos::prelude::*;
use photoshare::shared::Photo;

const SKELETON_CARDS: usize = 8;

/// 照片网格：加载中显示骨架，空列表显示提示，否则渲染卡片
#[component]
pub fn PhotoGrid(
    #[prop(into)] photos: Signal<Vec<Photo>>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    move || {
        if loading.get() {
            view! {
                <div class="grid grid-cols-2 gap-4 sm:grid-cols-3 lg:grid-cols-4">
                    {(0..SKELETON_CARDS)
                        .map(|_| view! {
                            <div class="flex flex-col overflow-hidden rounded-2xl border border-base-300 bg-base-100 shadow">
                                <div class="skeleton aspect-[4/3] w-full rounded-none"></div>
                                <div class="p-3 space-y-2">
                                    <div class="skeleton h-4 w-3/4"></div>
                                    <div class="skeleton h-3 w-1/2"></div>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        } else if photos.with(Vec::is_empty) {
            view! {
                <div class="flex flex-col items-center gap-3 rounded-3xl border border-base-300 bg-base-100 p-8 text-center shadow-lg">
                    <div class="flex h-16 w-16 items-center justify-center rounded-2xl bg-base-200 text-primary">
                        <Camera attr:class="h-8 w-8" />
                    </div>
                    <h3 class="text-lg font-semibold">"No photos found"</h3>
                    <p class="text-sm text-base-content/60">"Be the first to share something amazing!"</p>
                </div>
            }
            .into_any()
        } else {
            view! {
                <div class="grid grid-cols-2 gap-4 sm:grid-cols-3 lg:grid-cols-4">
                    <For
                        each=move || photos.get()
                        key=|photo| photo.id.clone()
                        children=|photo| view! { <PhotoCard photo=photo /> }
                    />
                </div>
            }
            .into_any()
        }
    }
}
