use crate::components::icons::StarIcon;
use leptos::prelude::*;
use photoshare::shared::format::format_rating;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl StarSize {
    fn class(self) -> &'static str {
        match self {
            StarSize::Sm => "h-3.5 w-3.5",
            StarSize::Md => "h-4 w-4",
            StarSize::Lg => "h-5 w-5",
            StarSize::Xl => "h-7 w-7",
        }
    }
}

/// 五星评分
///
/// 悬停预览与已提交的值分开保存；`readonly` 时不响应任何交互。
#[component]
pub fn StarRating(
    #[prop(into)] value: Signal<f64>,
    #[prop(optional)] on_change: Option<Callback<u8>>,
    #[prop(optional)] readonly: bool,
    #[prop(optional)] size: StarSize,
) -> impl IntoView {
    let (hover, set_hover) = signal(0u8);

    let shown = move || {
        let h = hover.get();
        if h > 0 { f64::from(h) } else { value.get() }
    };

    let stars = (1..=5u8)
        .map(|star| {
            let active = move || f64::from(star) <= shown();
            view! {
                <button
                    type="button"
                    disabled=readonly
                    class=if readonly {
                        "cursor-default"
                    } else {
                        "cursor-pointer transition hover:scale-110 active:scale-90"
                    }
                    on:click=move |_| {
                        if !readonly {
                            if let Some(cb) = on_change {
                                cb.run(star);
                            }
                        }
                    }
                    on:mouseenter=move |_| {
                        if !readonly {
                            set_hover.set(star);
                        }
                    }
                    on:mouseleave=move |_| {
                        if !readonly {
                            set_hover.set(0);
                        }
                    }
                >
                    {move || {
                        let class = if active() {
                            format!("{} text-warning", size.class())
                        } else {
                            format!("{} text-base-content/40", size.class())
                        };
                        view! { <StarIcon filled=active() attr:class=class /> }
                    }}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="flex items-center gap-1">
            {stars}
            <Show when=move || { value.get() > 0.0 }>
                <span class="ml-1 text-xs font-medium text-base-content/60">
                    {move || format_rating(value.get())}
                </span>
            </Show>
        </div>
    }
}
