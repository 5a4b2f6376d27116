//! `window.fetch` transport for controller requests.

use todo_core::{ApiError, HttpRequest, HttpResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

/// Run one request. Any status comes back as `Ok`; only a rejected fetch
/// (network failure, blocked request) is an error.
pub async fn execute(window: &Window, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    if let Some(body) = &request.body {
        init.set_body(&JsValue::from_str(body));
    }

    let js_request = Request::new_with_str_and_init(&request.path, &init).map_err(transport)?;
    let headers = js_request.headers();
    for (name, value) in &request.headers {
        headers.set(name, value).map_err(transport)?;
    }

    let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    let status = response.status();
    let body = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    Ok(HttpResponse::new(status, body.as_string().unwrap_or_default()))
}

fn transport(value: JsValue) -> ApiError {
    ApiError::Transport(format!("{value:?}"))
}
