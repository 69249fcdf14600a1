use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: gloo_net::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode events from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: gloo_net::Error,
    },
    #[error("browser global `{0}` is not available")]
    MissingGlobal(&'static str),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
