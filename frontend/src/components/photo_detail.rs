use crate::api::{use_api, use_config};
use crate::auth::use_auth;
use crate::components::common::{BackNotice, LoadingScreen, alert, use_load_tracker};
use crate::components::icons::{ArrowLeft, Eye, MapPin, MessageCircle, Sparkles};
use crate::components::star_rating::{StarRating, StarSize};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::page::detail::{
    DetailOutcome, NO_COMMENTS, PhotoDetail, comment_draft, post_comment, submit_rating,
};
use photoshare::shared::date::format_optional;
use photoshare::shared::format::{avatar_url, format_count, format_rating};
use photoshare::shared::{Comment, Photo, Sentiment};

const COMMENT_AVATAR_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    NotFound,
    Failed,
    Found,
}

/// 读取已加载的详情，尚未加载时返回默认值
fn with_found<T: Default>(
    detail: ReadSignal<Option<DetailOutcome>>,
    f: impl FnOnce(&PhotoDetail) -> T,
) -> T {
    detail.with(|d| match d {
        Some(DetailOutcome::Found(found)) => f(found),
        _ => T::default(),
    })
}

#[component]
pub fn PhotoDetailPage(id: String) -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let router = use_router();
    let tracker = use_load_tracker();

    let (detail, set_detail) = signal(Option::<DetailOutcome>::None);
    let (new_comment, set_new_comment) = signal(String::new());

    // 登录状态决定是否获取本人评分；会话恢复完成前不加载
    let viewer = Memo::new(move |_| {
        auth.state.with(|s| {
            (!s.is_loading).then(|| s.session.as_ref().map(|s| s.token.clone()))
        })
    });

    {
        let api = api.clone();
        let id = id.clone();
        let tracker = tracker.clone();
        Effect::new(move |_| {
            let Some(token) = viewer.get() else {
                return;
            };
            set_detail.set(None);
            let api = api.clone();
            let id = id.clone();
            let ticket = tracker.begin();
            spawn_local(async move {
                let outcome = match &token {
                    Some(token) => PhotoDetail::load(&api.authorized(token), &id, true).await,
                    None => PhotoDetail::load(&api, &id, false).await,
                };
                ticket.apply(outcome, |outcome| set_detail.set(Some(outcome)));
            });
        });
    }

    // 评分与评论各自一个 tracker，不会让正在进行的详情加载失效
    let rate_tracker = use_load_tracker();
    let comment_tracker = use_load_tracker();
    let (posting, set_posting) = signal(false);

    let handle_rate = {
        let api = api.clone();
        let id = id.clone();
        Callback::new(move |value: u8| {
            let Some(token) = auth.state.with_untracked(|s| s.session.as_ref().map(|s| s.token.clone()))
            else {
                router.go(AppRoute::Login);
                return;
            };
            let api = api.clone();
            let id = id.clone();
            // 连续点击时只采纳最后一次评分的结果
            let ticket = rate_tracker.begin();
            spawn_local(async move {
                let result = submit_rating(&api.authorized(&token), &id, value).await;
                ticket.apply(result, |result| match result {
                    Ok(summary) => set_detail.update(|d| {
                        if let Some(DetailOutcome::Found(found)) = d {
                            found.apply_rating(value, summary);
                        }
                    }),
                    Err(e) => alert(&e.message),
                });
            });
        })
    };

    let submit_comment = {
        let api = api.clone();
        let id = id.clone();
        Callback::new(move |()| {
            let Some(token) = auth.state.with_untracked(|s| s.session.as_ref().map(|s| s.token.clone()))
            else {
                router.go(AppRoute::Login);
                return;
            };
            let content = new_comment.get_untracked();
            if comment_draft(&content).is_none() || posting.get_untracked() {
                return;
            }
            let api = api.clone();
            let id = id.clone();
            let ticket = comment_tracker.begin();
            set_posting.set(true);
            spawn_local(async move {
                let result = post_comment(&api.authorized(&token), &id, &content).await;
                ticket.apply(result, |result| {
                    set_posting.set(false);
                    match result {
                        Ok(comment) => {
                            set_detail.update(|d| {
                                if let Some(DetailOutcome::Found(found)) = d {
                                    found.prepend_comment(comment);
                                }
                            });
                            set_new_comment.set(String::new());
                        }
                        Err(e) => alert(&e.message),
                    }
                });
            });
        })
    };

    let phase = Memo::new(move |_| {
        detail.with(|d| match d {
            None => Phase::Loading,
            Some(DetailOutcome::NotFound) => Phase::NotFound,
            Some(DetailOutcome::Failed(_)) => Phase::Failed,
            Some(DetailOutcome::Found(_)) => Phase::Found,
        })
    });

    move || match phase.get() {
        Phase::Loading => view! { <LoadingScreen /> }.into_any(),
        Phase::NotFound => view! {
            <BackNotice
                title="Photo not found"
                message="The photo you are looking for doesn't exist or has been removed."
            />
        }
        .into_any(),
        Phase::Failed => {
            let message = detail.with_untracked(|d| match d {
                Some(DetailOutcome::Failed(message)) => message.clone(),
                _ => String::new(),
            });
            view! { <BackNotice title="Something went wrong" message=message /> }.into_any()
        }
        Phase::Found => {
            let photo = with_found(detail, |d| Some(d.photo.clone()));
            match photo {
                Some(photo) => view! {
                    <DetailView
                        photo=photo
                        detail=detail
                        new_comment=new_comment
                        set_new_comment=set_new_comment
                        on_rate=handle_rate
                        on_comment=submit_comment
                    />
                }
                .into_any(),
                None => view! { <LoadingScreen /> }.into_any(),
            }
        }
    }
}

#[component]
fn DetailView(
    photo: Photo,
    detail: ReadSignal<Option<DetailOutcome>>,
    new_comment: ReadSignal<String>,
    set_new_comment: WriteSignal<String>,
    on_rate: Callback<u8>,
    on_comment: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let signed_in = move || auth.state.with(|s| s.is_authenticated());

    let average = Signal::derive(move || with_found(detail, |d| d.ratings.average));
    let my_rating = Signal::derive(move || with_found(detail, |d| f64::from(d.my_rating)));
    let comments = Signal::derive(move || with_found(detail, |d| d.comments.clone()));
    let comments_label = move || with_found(detail, PhotoDetail::comments_label);
    let ratings_label = move || with_found(detail, PhotoDetail::ratings_label);

    let title = photo.title_or("Untitled Photo").to_string();
    let analysis = photo.ai_analysis().map(|a| {
        (
            a.description.map(str::to_string),
            a.tags.to_vec(),
            a.colors.to_vec(),
        )
    });

    view! {
        <div class="mx-auto max-w-6xl px-4 py-8">
            <div class="grid gap-6 lg:grid-cols-[minmax(0,2fr)_minmax(0,1.4fr)]">
                <div class="relative">
                    <button
                        class="btn btn-circle btn-sm absolute left-3 top-3 z-10"
                        on:click=move |_| router.back()
                    >
                        <ArrowLeft attr:class="h-4 w-4" />
                    </button>
                    <div class="overflow-hidden rounded-3xl border border-base-300 bg-base-100 shadow-2xl">
                        <img src=photo.blob_url.clone() alt=title.clone() class="max-h-[80vh] w-full bg-base-300 object-contain" />
                    </div>
                </div>

                <div class="space-y-6">
                    <div class="card bg-base-100 border border-base-300 shadow-xl">
                        <div class="card-body gap-2">
                            <h1 class="text-xl font-semibold sm:text-2xl">{title.clone()}</h1>
                            {photo.location().map(|location| view! {
                                <span class="badge badge-ghost gap-2">
                                    <MapPin attr:class="h-3 w-3 text-secondary" />
                                    {location.to_string()}
                                </span>
                            })}
                            {photo.caption().map(|caption| view! {
                                <p class="mt-2 text-sm text-base-content/70">{caption.to_string()}</p>
                            })}
                        </div>
                    </div>

                    {analysis.map(|(description, tags, colors)| view! {
                        <div class="card bg-base-100 border border-base-300 shadow-xl">
                            <div class="card-body gap-3">
                                <h4 class="flex items-center gap-2 text-sm font-semibold">
                                    <span class="inline-flex h-7 w-7 items-center justify-center rounded-full bg-success/15 text-success">
                                        <Sparkles attr:class="h-4 w-4" />
                                    </span>
                                    "AI Analysis"
                                </h4>
                                {description.map(|d| view! { <p class="text-sm text-base-content/70 italic">{d}</p> })}
                                {(!tags.is_empty()).then(|| view! {
                                    <div class="flex flex-wrap gap-2">
                                        {tags.into_iter().map(|tag| view! {
                                            <span class="badge badge-neutral">{format!("#{}", tag)}</span>
                                        }).collect_view()}
                                    </div>
                                })}
                                {(!colors.is_empty()).then(|| view! {
                                    <div class="flex items-center gap-2">
                                        <span class="text-xs text-base-content/60">"Colors:"</span>
                                        <div class="flex gap-1.5">
                                            {colors.into_iter().map(|color| {
                                                let style = format!("background-color: {}", color.to_lowercase());
                                                view! {
                                                    <span title=color class="h-5 w-5 rounded-full border border-base-300" style=style></span>
                                                }
                                            }).collect_view()}
                                        </div>
                                    </div>
                                })}
                            </div>
                        </div>
                    })}

                    <div class="card bg-base-100 border border-base-300 shadow-xl">
                        <div class="card-body gap-4">
                            <div class="flex items-center justify-between gap-3">
                                <div class="flex items-center gap-3">
                                    <StarRating value=average readonly=true size=StarSize::Lg />
                                    <span class="text-xs text-base-content/60">"(" {ratings_label} ")"</span>
                                </div>
                                <span class="badge badge-ghost">
                                    {move || format!("{} / 5.0", format_rating(average.get()))}
                                </span>
                            </div>
                            <Show when=signed_in>
                                <div class="flex flex-wrap items-center gap-2 text-sm">
                                    <span>"Your rating:"</span>
                                    <StarRating value=my_rating on_change=on_rate />
                                </div>
                            </Show>

                            <div class="grid grid-cols-2 gap-3 text-sm">
                                <div class="flex items-center gap-2 rounded-2xl bg-base-200 px-3 py-2">
                                    <Eye attr:class="h-4 w-4 text-info" />
                                    {format!("{} views", format_count(photo.view_count))}
                                </div>
                                <div class="flex items-center gap-2 rounded-2xl bg-base-200 px-3 py-2">
                                    <MessageCircle attr:class="h-4 w-4 text-success" />
                                    {comments_label}
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 border border-base-300 shadow-xl">
                        <div class="card-body">
                            <h3 class="text-sm font-semibold">"Comments"</h3>
                            <Show when=signed_in>
                                <CommentForm
                                    new_comment=new_comment
                                    set_new_comment=set_new_comment
                                    on_comment=on_comment
                                />
                            </Show>
                            <div class="max-h-72 space-y-3 overflow-y-auto pr-1">
                                <For
                                    each=move || comments.get()
                                    key=|c| c.id.clone()
                                    children=|comment| view! { <CommentItem comment=comment /> }
                                />
                                <Show when=move || comments.with(Vec::is_empty)>
                                    <p class="text-xs text-base-content/60">{NO_COMMENTS}</p>
                                </Show>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn CommentForm(
    new_comment: ReadSignal<String>,
    set_new_comment: WriteSignal<String>,
    on_comment: Callback<()>,
) -> impl IntoView {
    // 去掉空白后为空时不允许提交
    let blank = move || new_comment.with(|c| comment_draft(c).is_none());

    view! {
        <form
            class="mb-4 flex items-center gap-2"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_comment.run(());
            }
        >
            <input
                type="text"
                placeholder="Add a comment..."
                class="input input-bordered input-sm flex-1"
                prop:value=new_comment
                on:input=move |ev| set_new_comment.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-info btn-sm" disabled=blank>
                "Post"
            </button>
        </form>
    }
}

#[component]
fn CommentItem(comment: Comment) -> impl IntoView {
    let config = use_config();
    let author = comment.author().to_string();
    let avatar = avatar_url(&config.avatar_base, &author, Some(COMMENT_AVATAR_SIZE));
    let sentiment = comment.sentiment.and_then(|s| {
        let tone = match s {
            Sentiment::Positive => "text-success",
            Sentiment::Neutral => "text-base-content/70",
            Sentiment::Negative => "text-error",
            Sentiment::Unknown => return None,
        };
        s.emoji().map(|emoji| (tone, emoji))
    });

    view! {
        <div class="flex items-start gap-3 rounded-2xl bg-base-200 p-3">
            <img src=avatar alt="" class="h-8 w-8 rounded-full border border-base-300" />
            <div class="flex-1">
                <div class="flex items-center justify-between gap-2">
                    <div class="flex items-center gap-2">
                        <strong class="text-xs">{author}</strong>
                        {sentiment.map(|(tone, emoji)| view! {
                            <span class=format!("text-xs {}", tone)>{emoji}</span>
                        })}
                    </div>
                    <span class="text-[10px] text-base-content/50">
                        {format_optional(comment.created_at.as_ref(), "")}
                    </span>
                </div>
                <p class="mt-1 text-xs">{comment.content}</p>
            </div>
        </div>
    }
}
