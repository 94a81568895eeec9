//! Backend API Wrappers
//!
//! Frontend bindings to the HTTP endpoints, organized by domain.
//! Every call returns `Result<T, String>`; the error is the response text
//! (or the transport error when the request never completed).

mod item;
mod session;
mod store;
mod suggestion;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

// Re-export all public items
pub use item::*;
pub use session::*;
pub use store::*;
pub use suggestion::*;

/// Absolute URL for an API path; the fetch backend needs an origin
fn url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{}{}", origin, path)
}

fn request(method: Method, path: &str) -> RequestBuilder {
    Client::new().request(method, url(path))
}

/// Send and turn any non-2xx status into its response text
async fn send(builder: RequestBuilder) -> Result<Response, String> {
    let response = builder.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(if text.is_empty() { status.to_string() } else { text })
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, String> {
    send(builder).await?.json::<T>().await.map_err(|e| e.to_string())
}
