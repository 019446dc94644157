//! HTTP transport for the browser.
//!
//! [`WebTransport`] turns an [`ApiRequest`] into a `fetch` call through
//! gloo-net and hands the raw status, content type and body back to the
//! client. Every request is aborted after [`FETCH_TIMEOUT_MS`].

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

use crate::config::{API_BASE_URL, FETCH_TIMEOUT_MS};
use crate::core::client::{ApiRequest, ApiResponse, Method, RequestBody, Transport};
use crate::core::error::FetchError;
use crate::models::LocalFile;

/// Sends requests to the backend at `base_url`.
#[derive(Clone, Debug)]
pub struct WebTransport {
    base_url: String,
}

impl Default for WebTransport {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl WebTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn builder(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.url(request.endpoint);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Delete => Request::delete(&url),
        };
        builder
            .header("Authorization", &request.authorization)
            .query(request.query.iter().map(|(k, v)| (*k, v.as_str())))
    }
}

impl Transport for WebTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let controller = AbortController::new()
            .map_err(|e| FetchError::RequestCreationFailed(js_error(&e)))?;
        let builder = self
            .builder(&request)
            .abort_signal(Some(&controller.signal()));

        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { fields, files } => builder.body(form_data(&fields, &files)?),
        }
        .map_err(|e| FetchError::RequestCreationFailed(e.to_string()))?;

        let timed_out = Rc::new(Cell::new(false));
        let timer = {
            let timed_out = timed_out.clone();
            Timeout::new(FETCH_TIMEOUT_MS, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let result = prepared.send().await;
        drop(timer);

        match result {
            Ok(response) => read_response(response).await,
            Err(_) if timed_out.get() => Err(FetchError::Timeout),
            Err(e) => Err(FetchError::NetworkError(e.to_string())),
        }
    }
}

async fn read_response(response: Response) -> Result<ApiResponse, FetchError> {
    let status = response.status();
    let content_type = response.headers().get("content-type");
    let body = response
        .binary()
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;
    Ok(ApiResponse {
        status,
        content_type,
        body,
    })
}

/// Builds a `multipart/form-data` body. Files go under the `file` field.
fn form_data(fields: &[(&'static str, String)], files: &[LocalFile]) -> Result<FormData, FetchError> {
    let creation = |e: JsValue| FetchError::RequestCreationFailed(js_error(&e));
    let form = FormData::new().map_err(creation)?;
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(creation)?;
    }
    for file in files {
        let blob = bytes_to_blob(&file.bytes, &file.mime).map_err(creation)?;
        form.append_with_blob_and_filename("file", &blob, &file.name)
            .map_err(creation)?;
    }
    Ok(form)
}

/// Copies `bytes` into a JS `Blob` of type `mime`.
pub fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
