use crate::api::use_api;
use crate::components::common::ErrorBanner;
use crate::components::icons::{CirclePlus, Sparkles, Upload};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoshare::page::access::require_creator;
use photoshare::page::upload::{UploadForm, failure_message, submit};
use photoshare::{ImageFile, Session};
use wasm_bindgen_futures::JsFuture;

/// 读取浏览器文件内容
async fn read_image(file: &web_sys::File) -> Result<ImageFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(ImageFile {
        name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

fn revoke_preview(url: Option<String>) {
    if let Some(url) = url {
        let _ = web_sys::Url::revoke_object_url(&url);
    }
}

/// 上传页，仅创作者可见
#[component]
pub fn UploadPage(session: Session) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let file_input = NodeRef::<html::Input>::new();

    let (form, set_form) = signal(UploadForm::default());
    let (preview, set_preview) = signal(Option::<String>::None);
    let (is_uploading, set_is_uploading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    on_cleanup(move || revoke_preview(preview.try_get_untracked().flatten()));

    // 拖放时非图片静默忽略，点选时提示
    let take_file = move |file: web_sys::File, report: bool| {
        spawn_local(async move {
            let image = match read_image(&file).await {
                Ok(image) => image,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read selected file");
                    return;
                }
            };
            let mut next = form.get_untracked();
            match next.select_file(image) {
                Ok(()) => {
                    set_form.set(next);
                    set_error_msg.set(None);
                    let url = web_sys::Url::create_object_url_with_blob(&file).ok();
                    revoke_preview(preview.get_untracked());
                    set_preview.set(url);
                }
                Err(message) if report => set_error_msg.set(Some(message.to_string())),
                Err(_) => {}
            }
        });
    };

    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            take_file(file, true);
        }
        // 允许再次选择同一个文件
        input.set_value("");
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            take_file(file, false);
        }
    };

    let clear_file = move |_| {
        set_form.update(|f| f.file = None);
        revoke_preview(preview.get_untracked());
        set_preview.set(None);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !current.can_submit() || is_uploading.get_untracked() {
            return;
        }
        set_is_uploading.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let session = session.clone();
        spawn_local(async move {
            let result = match require_creator(Some(&session)) {
                Ok(pass) => submit(&api, pass, current).await.map_err(|e| failure_message(&e)),
                Err(denied) => Err(denied.message().to_string()),
            };
            set_is_uploading.set(false);
            match result {
                Ok(()) => router.go(AppRoute::Home),
                Err(message) => set_error_msg.set(Some(message)),
            }
        });
    };

    let enable_ai = move || form.with(|f| f.fields.enable_ai);

    view! {
        <div class="mx-auto max-w-3xl px-4 py-10">
            <h1 class="mb-6 flex items-center gap-3 text-2xl font-bold sm:text-3xl">
                <span class="inline-flex h-10 w-10 items-center justify-center rounded-2xl bg-primary/20 text-primary">
                    <Upload attr:class="h-5 w-5" />
                </span>
                "Upload Photo"
            </h1>

            <div class="mb-4">
                <ErrorBanner message=error_msg />
            </div>

            <form class="card bg-base-100 border border-base-300 shadow-xl" on:submit=on_submit>
                <div class="card-body gap-5">
                    <div
                        class=move || if preview.with(Option::is_some) {
                            "relative flex min-h-64 cursor-pointer items-center justify-center overflow-hidden rounded-2xl border-2 border-dashed border-base-content/40"
                        } else {
                            "relative flex min-h-64 cursor-pointer items-center justify-center rounded-2xl border-2 border-dashed border-base-300 hover:border-primary"
                        }
                        on:click=move |_| {
                            if let Some(input) = file_input.get() {
                                input.click();
                            }
                        }
                        on:dragover=|ev: web_sys::DragEvent| ev.prevent_default()
                        on:drop=on_drop
                    >
                        {move || match preview.get() {
                            Some(url) => view! {
                                <img src=url alt="Preview" class="max-h-96 w-full object-contain" />
                            }
                            .into_any(),
                            None => view! {
                                <div class="flex flex-col items-center gap-2 py-10 text-base-content/60">
                                    <CirclePlus attr:class="h-10 w-10" />
                                    <span class="font-medium">"Click or drag an image here"</span>
                                    <span class="text-xs">"JPG, PNG, GIF, WebP supported"</span>
                                </div>
                            }
                            .into_any(),
                        }}
                        <input
                            node_ref=file_input
                            type="file"
                            accept="image/*"
                            hidden
                            on:change=on_file_change
                        />
                    </div>

                    <Show when=move || preview.with(Option::is_some)>
                        <button type="button" class="btn btn-ghost btn-sm self-start" on:click=clear_file>
                            "Remove image"
                        </button>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="title">
                            <span class="label-text">"Title *"</span>
                        </label>
                        <input
                            id="title"
                            type="text"
                            required
                            placeholder="Give your photo a title"
                            class="input input-bordered"
                            prop:value=move || form.with(|f| f.fields.title.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                set_form.update(|f| f.fields.title = value);
                            }
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="caption">
                            <span class="label-text">"Caption"</span>
                        </label>
                        <textarea
                            id="caption"
                            rows="3"
                            placeholder="Tell the story behind this photo..."
                            class="textarea textarea-bordered"
                            prop:value=move || form.with(|f| f.fields.caption.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                set_form.update(|f| f.fields.caption = value);
                            }
                        ></textarea>
                    </div>

                    <div class="grid gap-4 sm:grid-cols-2">
                        <div class="form-control">
                            <label class="label" for="location">
                                <span class="label-text">"Location"</span>
                            </label>
                            <input
                                id="location"
                                type="text"
                                placeholder="Where was this taken?"
                                class="input input-bordered"
                                prop:value=move || form.with(|f| f.fields.location.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_form.update(|f| f.fields.location = value);
                                }
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="people">
                                <span class="label-text">"People"</span>
                            </label>
                            <input
                                id="people"
                                type="text"
                                placeholder="Tag people (comma separated)"
                                class="input input-bordered"
                                prop:value=move || form.with(|f| f.fields.people.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_form.update(|f| f.fields.people = value);
                                }
                            />
                        </div>
                    </div>

                    <div class="rounded-2xl border border-base-300 bg-base-200 p-4">
                        <label class="label cursor-pointer justify-start gap-3">
                            <input
                                type="checkbox"
                                class="toggle toggle-primary"
                                prop:checked=enable_ai
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    set_form.update(|f| f.fields.enable_ai = checked);
                                }
                            />
                            <span class="flex items-center gap-2 font-medium">
                                <Sparkles attr:class="h-4 w-4 text-primary" />
                                "AI Analysis"
                            </span>
                        </label>
                        <p class="mt-1 text-xs text-base-content/60">
                            {move || if enable_ai() {
                                "AI will generate tags, descriptions & colors automatically"
                            } else {
                                "Upload will skip AI analysis"
                            }}
                        </p>
                    </div>

                    <button
                        type="submit"
                        class="btn btn-primary w-full"
                        disabled=move || !form.with(UploadForm::can_submit) || is_uploading.get()
                    >
                        {move || if is_uploading.get() {
                            let label = if enable_ai() { "Uploading & Analyzing..." } else { "Uploading..." };
                            view! { <span class="loading loading-spinner"></span> {label} }.into_any()
                        } else {
                            view! { <Upload attr:class="h-4 w-4" /> "Upload Photo" }.into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
