use thiserror::Error;
use wasm_bindgen::JsValue;

/// Transport or decode failure talking to the graph server.
///
/// Application-level failures (a reply carrying an `error` field) are not
/// errors at this layer; they decode to [`super::Ack::Error`].
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("no browser window available")]
	NoWindow,
	#[error("could not build request: {0}")]
	Request(String),
	#[error("request failed: {0}")]
	Transport(String),
	#[error("could not read response body: {0}")]
	Body(String),
	#[error("invalid response body: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("reply carried neither a message nor an error")]
	UnexpectedReply,
}

/// Renders a thrown JS value for log output.
pub(crate) fn describe_js(value: &JsValue) -> String {
	value
		.as_string()
		.or_else(|| {
			js_sys::Reflect::get(value, &JsValue::from_str("message"))
				.ok()
				.and_then(|m| m.as_string())
		})
		.unwrap_or_else(|| format!("{:?}", value))
}
