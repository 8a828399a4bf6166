//! `fetch` transport.
//!
//! Implements the shared `HttpTransport` on top of `web_sys::fetch`. Credentials are
//! attached by the shared client before a request reaches this module.

use bursary_shared::request::{FormValue, HttpRequest, HttpResponse, HttpTransport, MultipartForm, RequestBody};
use bursary_shared::{ApiError, ApiResult, CredentialsMode};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestCredentials, RequestInit, Response};

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn credentials(mode: CredentialsMode) -> RequestCredentials {
    match mode {
        CredentialsMode::Omit => RequestCredentials::Omit,
        CredentialsMode::SameOrigin => RequestCredentials::SameOrigin,
        CredentialsMode::Include => RequestCredentials::Include,
    }
}

/// Builds a `FormData`; the browser sets the multipart boundary header itself.
fn form_data(form: &MultipartForm) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for (name, value) in &form.fields {
        match value {
            FormValue::Text(text) => data.append_with_str(name, text)?,
            FormValue::File(file) => {
                let parts = js_sys::Array::new();
                parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
                let options = BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
                data.append_with_blob_and_filename(name, &blob, &file.file_name)?;
            }
        }
    }
    Ok(data)
}

/// Browser `fetch` transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    fn build(req: &HttpRequest) -> Result<Request, ApiError> {
        let headers = Headers::new()
            .map_err(|e| ApiError::request_build(format!("headers: {}", js_err(e))))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ApiError::request_build(format!("header {}: {}", key, js_err(e))))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_credentials(credentials(req.credentials));

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            RequestBody::Multipart(form) => {
                let data = form_data(form)
                    .map_err(|e| ApiError::request_build(format!("form data: {}", js_err(e))))?;
                opts.set_body(&data.into());
            }
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ApiError::request_build(js_err(e)))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let request = Self::build(&req).map_err(|e| e.in_op("http.build"))?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::network("no window object").in_op("http.send"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::network(js_err(e)).in_op_with("http.send", req.url.clone()))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::serialization(js_err(e)).in_op("http.response"))?;

        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|e| ApiError::serialization(js_err(e)).in_op("http.body"))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|e| ApiError::network(js_err(e)).in_op("http.body"))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
