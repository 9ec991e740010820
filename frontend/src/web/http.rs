//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 [`HttpClient`]，替代 `gloo-net`。

use photoshare::error::{ApiError, ApiResult};
use photoshare::request::{FormPart, MultipartForm, RequestBody};
use photoshare::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

fn build_error(what: &str, e: JsValue) -> ApiError {
    ApiError::network(format!("{}: {:?}", what, e))
}

/// 把 multipart 表单转换为浏览器的 `FormData`
///
/// boundary 与 Content-Type 由浏览器生成，调用方不应手动设置。
fn to_form_data(form: MultipartForm) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for (name, part) in form.parts {
        match part {
            FormPart::Text(value) => data.append_with_str(&name, &value)?,
            FormPart::File {
                file_name,
                content_type,
                bytes,
            } => {
                let chunk = js_sys::Uint8Array::from(bytes.as_slice());
                let parts = js_sys::Array::of1(&chunk);
                let bag = BlobPropertyBag::new();
                bag.set_type(&content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;
                data.append_with_blob_and_filename(&name, &blob, &file_name)?;
            }
        }
    }
    Ok(data)
}

/// 基于 `window.fetch` 的客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| build_error("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| build_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match req.body {
            Some(RequestBody::Json(body)) => opts.set_body(&JsValue::from_str(&body)),
            Some(RequestBody::Multipart(form)) => {
                let data = to_form_data(form).map_err(|e| build_error("构建表单失败", e))?;
                opts.set_body(&data.into());
            }
            None => {}
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| build_error("请求构建失败", e))?;

        let window = web_sys::window().ok_or_else(|| ApiError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| build_error("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::decode(format!("Response 类型转换失败: {:?}", e)))?;

        let promise = response
            .text()
            .map_err(|e| ApiError::decode(format!("响应解析失败: {:?}", e)))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::decode(format!("响应解析失败: {:?}", e)))?
            .as_string()
            .ok_or_else(|| ApiError::decode("响应体无法转换为字符串"))?;

        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}
